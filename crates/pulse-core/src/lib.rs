//! # pulse-core
//!
//! Feed aggregation, feedback voting and onboarding logic for the CryptoPulse
//! dashboard.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       DashboardView                          │
//! │  ┌────────────┐  ┌────────────┐  ┌────────────┐              │
//! │  │ PriceFeed  │  │  NewsFeed  │  │InsightFeed │──┐           │
//! │  └─────┬──────┘  └─────┬──────┘  └─────┬──────┘  │ RequestScope
//! │        │               │               │         │ (cancelled on drop)
//! │  PriceSource      NewsSource      LlmProvider ◀──┘           │
//! │                                                              │
//! │  VoteBoard ──▶ FeedbackRecorder ──▶ Backend ──▶ Notification │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every outbound call goes through a strategy trait (`PriceSource`,
//! `NewsSource`, `LlmProvider`, `Backend`) so the HTTP implementations in
//! `pulse-runtime` and the in-memory ones in [`mock`] are interchangeable.

pub mod auth;
pub mod backend;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod feedback;
pub mod feeds;
pub mod message;
pub mod mock;
pub mod model;
pub mod notify;
pub mod onboarding;
pub mod provider;
pub mod scope;
pub mod session;
pub mod source;

pub use auth::AuthFlow;
pub use backend::{Backend, Credentials, Feedback, LoginResponse};
pub use config::PulseConfig;
pub use dashboard::{DashboardFeeds, DashboardState, DashboardView, FeedUpdate};
pub use error::{PulseError, Result};
pub use feedback::{FeedbackRecorder, PendingFeedback, VoteBoard, VotePolicy};
pub use feeds::{InsightFeed, InsightState, NewsFeed, NewsState, PriceFeed, PriceFeedState};
pub use message::{Message, Role};
pub use model::{Coin, InvestorType, NewsItem, Preferences, Section, Vote};
pub use notify::{Notification, Route, Transition, Variant};
pub use onboarding::{Onboarding, PrimaryAction, Step};
pub use provider::LlmProvider;
pub use scope::{RequestScope, ScopeHandle};
pub use session::{AuthToken, Session, TokenStore};
pub use source::{NewsSource, PriceQuote, PriceSource};
