//! Mock Collaborators
//!
//! For testing and offline demos. Every source returns realistic static data
//! or a configured failure, and the backend records what it receives.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::backend::{Backend, Credentials, Feedback, LoginResponse};
use crate::error::{PulseError, Result};
use crate::message::Message;
use crate::model::{NewsItem, Preferences};
use crate::provider::{Completion, GenerationOptions, LlmProvider};
use crate::source::{NewsSource, PriceQuote, PriceSource};

/// A failure a mock should produce on every call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockFailure {
    Status { status: u16, message: Option<String> },
    Transport(String),
    Malformed(String),
}

impl MockFailure {
    pub fn to_error(&self) -> PulseError {
        match self {
            Self::Status { status, message } => PulseError::Status {
                status: *status,
                message: message.clone(),
            },
            Self::Transport(msg) => PulseError::Transport(msg.clone()),
            Self::Malformed(msg) => PulseError::Malformed(msg.clone()),
        }
    }
}

fn quote(usd: Decimal, usd_24h_change: Decimal) -> PriceQuote {
    PriceQuote {
        usd,
        usd_24h_change: Some(usd_24h_change),
    }
}

/// Price source with static quotes
pub struct MockPriceSource {
    quotes: BTreeMap<String, PriceQuote>,
    failure: Option<MockFailure>,
}

impl Default for MockPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPriceSource {
    /// Quotes for the five dashboard assets
    pub fn new() -> Self {
        let quotes = [
            ("bitcoin", quote(dec!(97500), dec!(2.5))),
            ("ethereum", quote(dec!(3450), dec!(1.8))),
            ("solana", quote(dec!(195), dec!(4.2))),
            ("cardano", quote(dec!(0.95), dec!(-1.2))),
            ("dogecoin", quote(dec!(0.38), dec!(12.0))),
        ]
        .into_iter()
        .map(|(id, q)| (id.to_string(), q))
        .collect();

        Self { quotes, failure: None }
    }

    /// Serve exactly these quotes, whatever ids are requested
    pub fn with_quotes(quotes: BTreeMap<String, PriceQuote>) -> Self {
        Self { quotes, failure: None }
    }

    pub fn failing(failure: MockFailure) -> Self {
        Self {
            quotes: BTreeMap::new(),
            failure: Some(failure),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PriceSource for MockPriceSource {
    async fn simple_prices(&self, ids: &[&str]) -> Result<BTreeMap<String, PriceQuote>> {
        if let Some(failure) = &self.failure {
            return Err(failure.to_error());
        }
        tracing::debug!(requested = ids.len(), "Serving mock quotes");
        Ok(self.quotes.clone())
    }

    fn name(&self) -> &str {
        "MockPrices"
    }
}

/// News source with a fixed batch of posts
pub struct MockNewsSource {
    posts: Vec<NewsItem>,
    failure: Option<MockFailure>,
}

impl MockNewsSource {
    pub const fn new(posts: Vec<NewsItem>) -> Self {
        Self { posts, failure: None }
    }

    /// `count` posts published one hour apart, oldest first
    pub fn hourly(count: u64) -> Self {
        let now = Utc::now();
        let posts = (0..count)
            .map(|i| {
                let hours_ago = i64::try_from(count - i).unwrap_or(i64::MAX);
                NewsItem {
                    id: i + 1,
                    title: format!("Headline {}", i + 1),
                    kind: "news".into(),
                    published_at: now - Duration::hours(hours_ago),
                }
            })
            .collect();
        Self::new(posts)
    }

    pub const fn failing(failure: MockFailure) -> Self {
        Self {
            posts: Vec::new(),
            failure: Some(failure),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl NewsSource for MockNewsSource {
    async fn latest_posts(&self) -> Result<Vec<NewsItem>> {
        match &self.failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(self.posts.clone()),
        }
    }

    fn name(&self) -> &str {
        "MockNews"
    }
}

/// LLM provider that answers every prompt with the same text
pub struct MockLlmProvider {
    reply: String,
    failure: Option<MockFailure>,
    prompts: Mutex<Vec<(Vec<Message>, GenerationOptions)>>,
}

impl MockLlmProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            failure: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(failure: MockFailure) -> Self {
        Self {
            reply: String::new(),
            failure: Some(failure),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<(Vec<Message>, GenerationOptions)> {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl LlmProvider for MockLlmProvider {
    async fn complete(&self, messages: &[Message], options: &GenerationOptions) -> Result<Completion> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((messages.to_vec(), options.clone()));

        if let Some(failure) = &self.failure {
            return Err(failure.to_error());
        }
        Ok(Completion {
            content: self.reply.clone(),
            model: options.model.clone(),
            usage: None,
        })
    }

    fn name(&self) -> &str {
        "MockLlm"
    }
}

/// Backend that records submissions and optionally fails them
#[derive(Default)]
pub struct MockBackend {
    token: Option<String>,
    failure: Option<MockFailure>,
    feedback: Mutex<Vec<Feedback>>,
    preferences: Mutex<Vec<Preferences>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token handed out on login
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Fail every call with this status and optional message body
    #[must_use]
    pub fn failing(mut self, status: u16, message: Option<&str>) -> Self {
        self.failure = Some(MockFailure::Status {
            status,
            message: message.map(str::to_string),
        });
        self
    }

    #[must_use]
    pub fn failing_with(mut self, failure: MockFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn feedback(&self) -> Vec<Feedback> {
        self.feedback.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn preferences(&self) -> Vec<Preferences> {
        self.preferences.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn check(&self) -> Result<()> {
        self.failure.as_ref().map_or(Ok(()), |f| Err(f.to_error()))
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Backend for MockBackend {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse> {
        self.check()?;
        Ok(LoginResponse { token: self.token.clone() })
    }

    async fn submit_feedback(&self, feedback: &Feedback) -> Result<()> {
        self.feedback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(feedback.clone());
        self.check()
    }

    async fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        self.preferences
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(preferences.clone());
        self.check()
    }
}
