//! Dashboard Configuration
//!
//! All credentials are supplied from outside the binary. Loading fails fast
//! with [`PulseError::Config`] when a required value is missing, so nothing
//! ever falls back to a baked-in key.

use serde::{Deserialize, Serialize};

use crate::error::{PulseError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_CRYPTOPANIC_URL: &str = "https://cryptopanic.com/api/developer/v2";
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_INSIGHT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MEME_URL: &str =
    "https://pbs.twimg.com/profile_images/953381776474476544/2y22y5d0_400x400.jpg";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration for every outbound collaborator
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PulseConfig {
    /// Base URL of the CryptoPulse backend (auth, feedback, preferences)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// CoinGecko API root
    #[serde(default = "default_coingecko_url")]
    pub coingecko_url: String,

    /// CryptoPanic API root
    #[serde(default = "default_cryptopanic_url")]
    pub cryptopanic_url: String,

    /// CryptoPanic access token
    pub cryptopanic_token: String,

    /// OpenRouter API root
    #[serde(default = "default_openrouter_url")]
    pub openrouter_url: String,

    /// OpenRouter bearer credential
    pub openrouter_api_key: String,

    /// Model used for the insight of the day
    #[serde(default = "default_insight_model")]
    pub insight_model: String,

    /// Image shown in the meme section
    #[serde(default = "default_meme_url")]
    pub meme_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String { DEFAULT_API_URL.into() }
fn default_coingecko_url() -> String { DEFAULT_COINGECKO_URL.into() }
fn default_cryptopanic_url() -> String { DEFAULT_CRYPTOPANIC_URL.into() }
fn default_openrouter_url() -> String { DEFAULT_OPENROUTER_URL.into() }
fn default_insight_model() -> String { DEFAULT_INSIGHT_MODEL.into() }
fn default_meme_url() -> String { DEFAULT_MEME_URL.into() }
const fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }

impl PulseConfig {
    /// Build from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, a map in tests, ...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self::read(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Build from the environment for backend-only work (login, votes,
    /// onboarding). The feed credentials may be absent.
    pub fn backend_from_env() -> Result<Self> {
        Self::backend_from_lookup(|key| std::env::var(key).ok())
    }

    pub fn backend_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self::read(lookup)?;
        config.validate_backend()?;
        Ok(config)
    }

    fn read(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let timeout_secs = match lookup("PULSE_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                PulseError::Config(format!("PULSE_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url: optional("PULSE_API_URL", DEFAULT_API_URL),
            coingecko_url: optional("COINGECKO_URL", DEFAULT_COINGECKO_URL),
            cryptopanic_url: optional("CRYPTOPANIC_URL", DEFAULT_CRYPTOPANIC_URL),
            cryptopanic_token: lookup("CRYPTOPANIC_TOKEN").unwrap_or_default(),
            openrouter_url: optional("OPENROUTER_URL", DEFAULT_OPENROUTER_URL),
            openrouter_api_key: lookup("OPENROUTER_API_KEY").unwrap_or_default(),
            insight_model: optional("INSIGHT_MODEL", DEFAULT_INSIGHT_MODEL),
            meme_url: optional("PULSE_MEME_URL", DEFAULT_MEME_URL),
            timeout_secs,
        })
    }

    /// Parse a JSON document (the web frontend's `/pulse-config.json`)
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| PulseError::Config(format!("invalid configuration document: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every credential is present
    pub fn validate(&self) -> Result<()> {
        self.validate_backend()?;
        if self.openrouter_api_key.trim().is_empty() {
            return Err(PulseError::Config("OPENROUTER_API_KEY not set".into()));
        }
        if self.cryptopanic_token.trim().is_empty() {
            return Err(PulseError::Config("CRYPTOPANIC_TOKEN not set".into()));
        }
        Ok(())
    }

    /// Check what the backend client needs; feed credentials are not required
    pub fn validate_backend(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(PulseError::Config("PULSE_TIMEOUT_SECS must be positive".into()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for PulseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PulseConfig")
            .field("api_url", &self.api_url)
            .field("coingecko_url", &self.coingecko_url)
            .field("cryptopanic_url", &self.cryptopanic_url)
            .field("cryptopanic_token", &"<redacted>")
            .field("openrouter_url", &self.openrouter_url)
            .field("openrouter_api_key", &"<redacted>")
            .field("insight_model", &self.insight_model)
            .field("meme_url", &self.meme_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
