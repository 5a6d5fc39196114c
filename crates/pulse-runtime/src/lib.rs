//! # pulse-runtime
//!
//! HTTP implementations of the `pulse-core` strategy traits.
//!
//! ## Clients
//!
//! - **CoinGecko**: [`PriceSource`](pulse_core::PriceSource) over `/simple/price`
//! - **CryptoPanic**: [`NewsSource`](pulse_core::NewsSource) over `/posts/`
//! - **OpenRouter**: [`LlmProvider`](pulse_core::LlmProvider) over `/chat/completions`
//! - **ApiClient**: [`Backend`](pulse_core::Backend) for feedback, preferences and login
//!
//! All of them build on `reqwest`, so they run natively and in the browser.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pulse_runtime::Clients;
//!
//! let config = PulseConfig::from_env()?;
//! let clients = Clients::from_config(&config, Arc::new(Session::new()))?;
//! let mut view = DashboardView::new(clients.feeds(&config), clients.recorder(), &config.meme_url);
//! view.load().await;
//! ```

pub mod api;
pub mod coingecko;
pub mod cryptopanic;
pub mod http;
pub mod openrouter;

use std::sync::Arc;

pub use api::ApiClient;
pub use coingecko::CoinGeckoClient;
pub use cryptopanic::CryptoPanicClient;
pub use openrouter::OpenRouterProvider;

use pulse_core::{
    AuthFlow, DashboardFeeds, FeedbackRecorder, InsightFeed, NewsFeed, PriceFeed, PulseConfig, Result, Session,
};

/// Every client the app needs, wired from one configuration
#[derive(Clone)]
pub struct Clients {
    pub prices: Arc<CoinGeckoClient>,
    pub news: Arc<CryptoPanicClient>,
    pub insight: Arc<OpenRouterProvider>,
    pub backend: Arc<ApiClient>,
}

impl Clients {
    pub fn from_config(config: &PulseConfig, session: Arc<Session>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            prices: Arc::new(CoinGeckoClient::from_config(config)?),
            news: Arc::new(CryptoPanicClient::from_config(config)?),
            insight: Arc::new(OpenRouterProvider::from_config(config)?),
            backend: Arc::new(ApiClient::from_config(config, session)?),
        })
    }

    pub fn feeds(&self, config: &PulseConfig) -> DashboardFeeds {
        DashboardFeeds::new(
            PriceFeed::new(self.prices.clone()),
            NewsFeed::new(self.news.clone()),
            InsightFeed::new(self.insight.clone(), &config.insight_model),
        )
    }

    pub fn recorder(&self) -> FeedbackRecorder {
        self.backend.recorder()
    }

    pub fn auth(&self) -> AuthFlow {
        self.backend.auth()
    }
}
