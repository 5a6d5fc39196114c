//! Dashboard Feeds
//!
//! One fetcher per dashboard section. Each issues a single request per
//! activation, turns the response into a small typed record and reports the
//! outcome as view state. None of them retries.

mod insight;
mod news;
mod prices;

pub use insight::{INSIGHT_MAX_TOKENS, INSIGHT_PROMPT, INSIGHT_TEMPERATURE, InsightFeed, InsightState};
pub use news::{NEWS_LIMIT, NewsFeed, NewsState, latest_first};
pub use prices::{PriceFeed, PriceFeedState, coins_from_quotes};
