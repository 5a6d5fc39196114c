//! CoinGecko price source

use std::collections::BTreeMap;

use async_trait::async_trait;
use pulse_core::{PriceQuote, PriceSource, PulseConfig, Result};

use crate::http::{build_client, read_json, request_error};

/// `PriceSource` backed by CoinGecko's simple-price endpoint
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &PulseConfig) -> Result<Self> {
        Ok(Self::new(build_client(config.timeout_secs)?, &config.coingecko_url))
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PriceSource for CoinGeckoClient {
    async fn simple_prices(&self, ids: &[&str]) -> Result<BTreeMap<String, PriceQuote>> {
        let url = format!("{}/simple/price", self.base_url);
        let joined = ids.join(",");
        tracing::debug!(%url, ids = %joined, "GET simple price");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ids", joined.as_str()),
                ("vs_currencies", "usd"),
                ("include_24hr_change", "true"),
            ])
            .send()
            .await
            .map_err(request_error)?;

        read_json(response).await
    }

    fn name(&self) -> &str {
        "coingecko"
    }
}
