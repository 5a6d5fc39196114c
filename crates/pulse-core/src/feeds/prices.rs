//! Price Feed
//!
//! USD price and 24h change for the five dashboard assets, fetched together
//! in one request.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{PulseError, Result};
use crate::model::{ASSET_IDS, Coin};
use crate::source::{PriceQuote, PriceSource};

/// Observable state of the prices section
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceFeedState {
    /// True until the request settles
    pub loading: bool,

    /// Set only when the request failed
    pub error: Option<String>,

    /// Empty until the first successful response
    pub coins: Vec<Coin>,
}

impl Default for PriceFeedState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            coins: Vec::new(),
        }
    }
}

impl PriceFeedState {
    /// Settle the state with a fetch outcome
    pub fn settle(&mut self, result: Result<Vec<Coin>>) {
        self.loading = false;
        match result {
            Ok(coins) => {
                self.error = None;
                self.coins = coins;
            }
            Err(e) => {
                tracing::warn!("Price feed failed: {}", e);
                self.error = Some(match e {
                    PulseError::Status { .. } => "Failed to fetch coin data".to_string(),
                    other => other.to_string(),
                });
            }
        }
    }
}

/// Turn a simple-price response into display records.
///
/// Records follow the fixed asset order; ids outside it come after, in
/// lexicographic order, with no display name. A quote without a 24h change
/// renders as flat.
pub fn coins_from_quotes(quotes: BTreeMap<String, PriceQuote>) -> Vec<Coin> {
    let mut coins: Vec<Coin> = quotes
        .into_iter()
        .map(|(id, q)| Coin::new(id, q.usd, q.usd_24h_change.unwrap_or_default()))
        .collect();

    let rank = |coin: &Coin| {
        ASSET_IDS
            .iter()
            .position(|id| *id == coin.id)
            .unwrap_or(ASSET_IDS.len())
    };
    // Stable sort keeps the BTreeMap's lexicographic order among unknown ids.
    coins.sort_by_key(rank);
    coins
}

/// Fetcher for the prices section
#[derive(Clone)]
pub struct PriceFeed {
    source: Arc<dyn PriceSource>,
}

impl PriceFeed {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self { source }
    }

    pub async fn fetch(&self) -> Result<Vec<Coin>> {
        tracing::debug!(source = self.source.name(), "Fetching prices");
        let quotes = self.source.simple_prices(&ASSET_IDS).await?;
        Ok(coins_from_quotes(quotes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockFailure, MockPriceSource};
    use crate::model::display_name;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn quotes(raw: &str) -> BTreeMap<String, PriceQuote> {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_partial_response_maps_names_and_values() {
        let coins = coins_from_quotes(quotes(
            r#"{"bitcoin":{"usd":65000,"usd_24h_change":2.5},"ethereum":{"usd":3200,"usd_24h_change":-1.1}}"#,
        ));

        assert_eq!(
            coins,
            vec![
                Coin {
                    id: "bitcoin".into(),
                    name: Some("Bitcoin (BTC)".into()),
                    price: dec!(65000),
                    change_24h: dec!(2.5),
                },
                Coin {
                    id: "ethereum".into(),
                    name: Some("Ethereum (ETH)".into()),
                    price: dec!(3200),
                    change_24h: dec!(-1.1),
                },
            ]
        );
    }

    #[test]
    fn test_fixed_order_regardless_of_response_order() {
        let coins = coins_from_quotes(quotes(
            r#"{"tether":{"usd":1,"usd_24h_change":0},"dogecoin":{"usd":0.38,"usd_24h_change":12},
                "aave":{"usd":90,"usd_24h_change":1},"bitcoin":{"usd":97500,"usd_24h_change":2.5}}"#,
        ));
        let ids: Vec<&str> = coins.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["bitcoin", "dogecoin", "aave", "tether"]);
        assert_eq!(coins[2].name, None);
    }

    #[tokio::test]
    async fn test_null_change_keeps_every_coin() {
        let source = MockPriceSource::with_quotes(quotes(
            r#"{"bitcoin":{"usd":65000,"usd_24h_change":2.5},"tether":{"usd":1.0,"usd_24h_change":null},
                "solana":{"usd":195}}"#,
        ));
        let feed = PriceFeed::new(Arc::new(source));
        let mut state = PriceFeedState::default();
        state.settle(feed.fetch().await);

        assert_eq!(state.error, None);
        let ids: Vec<&str> = state.coins.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["bitcoin", "solana", "tether"]);
        assert_eq!(state.coins[0].change_24h, dec!(2.5));
        assert_eq!(state.coins[1].change_24h, Decimal::ZERO);
        assert_eq!(state.coins[2].change_24h, Decimal::ZERO);
        assert!(state.coins[2].is_positive());
    }

    #[tokio::test]
    async fn test_full_response_has_five_named_entries() {
        let feed = PriceFeed::new(Arc::new(MockPriceSource::new()));
        let coins = feed.fetch().await.unwrap();

        assert_eq!(coins.len(), 5);
        for coin in &coins {
            assert!(coin.price >= Decimal::ZERO);
            assert_eq!(coin.name.as_deref(), display_name(&coin.id));
            assert!(coin.name.is_some());
        }
    }

    #[tokio::test]
    async fn test_http_error_sets_error_and_keeps_coins_empty() {
        let feed = PriceFeed::new(Arc::new(MockPriceSource::failing(MockFailure::Status {
            status: 500,
            message: None,
        })));
        let mut state = PriceFeedState::default();
        assert!(state.loading);

        state.settle(feed.fetch().await);
        assert!(!state.loading);
        assert!(state.coins.is_empty());
        assert_eq!(state.error.as_deref(), Some("Failed to fetch coin data"));
    }

    #[tokio::test]
    async fn test_transport_error_message_is_kept() {
        let feed = PriceFeed::new(Arc::new(MockPriceSource::failing(MockFailure::Transport(
            "dns failure".into(),
        ))));
        let mut state = PriceFeedState::default();
        state.settle(feed.fetch().await);
        assert!(state.error.unwrap().contains("dns failure"));
    }
}
