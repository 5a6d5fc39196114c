//! Feed Sources
//!
//! Abstractions over the market-data and news APIs. Implement these for each
//! provider: CoinGecko and CryptoPanic live in `pulse-runtime`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::NewsItem;

/// USD quote for one asset as returned by the simple-price endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub usd: Decimal,
    /// Absent or `null` when the API has no 24h history for the asset
    #[serde(default)]
    pub usd_24h_change: Option<Decimal>,
}

/// Market-data source (Strategy pattern)
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait PriceSource: Send + Sync {
    /// USD price and 24h change for every id, in one request
    async fn simple_prices(&self, ids: &[&str]) -> Result<BTreeMap<String, PriceQuote>>;

    /// Source name for logs
    fn name(&self) -> &str;
}

/// News source (Strategy pattern)
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait NewsSource: Send + Sync {
    /// Most recent posts in whatever order the API returns them
    async fn latest_posts(&self) -> Result<Vec<NewsItem>>;

    /// Source name for logs
    fn name(&self) -> &str;
}
