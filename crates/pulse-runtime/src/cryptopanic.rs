//! CryptoPanic news source
//!
//! The API token travels as a query parameter, so request URLs are stripped
//! from errors before they reach a log line.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulse_core::{NewsItem, NewsSource, PulseConfig, PulseError, Result};
use serde::Deserialize;

use crate::http::{build_client, read_json, request_error};

#[derive(Deserialize)]
struct PostsResponse {
    results: Vec<Post>,
}

#[derive(Deserialize)]
struct Post {
    id: u64,
    title: String,
    #[serde(default)]
    kind: String,
    published_at: DateTime<Utc>,
}

impl From<Post> for NewsItem {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            kind: post.kind,
            published_at: post.published_at,
        }
    }
}

/// `NewsSource` backed by the CryptoPanic posts endpoint
pub struct CryptoPanicClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl CryptoPanicClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &PulseConfig) -> Result<Self> {
        if config.cryptopanic_token.trim().is_empty() {
            return Err(PulseError::Config("CRYPTOPANIC_TOKEN not set".into()));
        }
        Ok(Self::new(
            build_client(config.timeout_secs)?,
            &config.cryptopanic_url,
            &config.cryptopanic_token,
        ))
    }
}

impl std::fmt::Debug for CryptoPanicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoPanicClient")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl NewsSource for CryptoPanicClient {
    async fn latest_posts(&self) -> Result<Vec<NewsItem>> {
        let url = format!("{}/posts/", self.base_url);
        tracing::debug!(%url, "GET posts");

        let response = self
            .client
            .get(&url)
            .query(&[("auth_token", self.token.as_str())])
            .send()
            .await
            .map_err(|e| request_error(e.without_url()))?;

        let body: PostsResponse = read_json(response).await?;
        Ok(body.results.into_iter().map(NewsItem::from).collect())
    }

    fn name(&self) -> &str {
        "cryptopanic"
    }
}
