//! Domain Models
//!
//! Core data types for the dashboard feed and the onboarding questionnaire.
//! Prices use `rust_decimal` - never f64 for money.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PulseError;

/// Market-data identifiers fetched together on every price load
pub const ASSET_IDS: [&str; 5] = ["bitcoin", "ethereum", "solana", "cardano", "dogecoin"];

/// Display name for a market-data identifier
pub fn display_name(id: &str) -> Option<&'static str> {
    match id {
        "bitcoin" => Some("Bitcoin (BTC)"),
        "ethereum" => Some("Ethereum (ETH)"),
        "solana" => Some("Solana (SOL)"),
        "cardano" => Some("Cardano (ADA)"),
        "dogecoin" => Some("Dogecoin (DOGE)"),
        _ => None,
    }
}

/// A priced asset as shown in the prices section
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Market-data identifier (e.g. "bitcoin")
    pub id: String,

    /// Display name; `None` for identifiers outside the static lookup
    pub name: Option<String>,

    /// Price in USD
    pub price: Decimal,

    /// 24-hour change in percent
    pub change_24h: Decimal,
}

impl Coin {
    pub fn new(id: impl Into<String>, price: Decimal, change_24h: Decimal) -> Self {
        let id = id.into();
        Self {
            name: display_name(&id).map(str::to_string),
            id,
            price,
            change_24h,
        }
    }

    /// Name to render, falling back to the raw identifier
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Flat or rising over 24h
    pub fn is_positive(&self) -> bool {
        self.change_24h >= Decimal::ZERO
    }
}

/// A news headline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: u64,
    pub title: String,
    /// Post category as reported by the news API ("news", "media", ...)
    pub kind: String,
    pub published_at: DateTime<Utc>,
}

/// A dashboard region that can receive a vote
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    News,
    Prices,
    Ai,
    Meme,
}

impl Section {
    pub const ALL: [Self; 4] = [Self::News, Self::Prices, Self::Ai, Self::Meme];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Prices => "prices",
            Self::Ai => "ai",
            Self::Meme => "meme",
        }
    }

    /// Card heading
    pub const fn title(self) -> &'static str {
        match self {
            Self::News => "Market News",
            Self::Prices => "Coin Prices",
            Self::Ai => "AI Insight of the Day",
            Self::Meme => "Daily Crypto Meme",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::News => "Latest crypto headlines",
            Self::Prices => "Real-time market data",
            Self::Ai => "Personalized market analysis",
            Self::Meme => "Because crypto needs fun too",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::News => 0,
            Self::Prices => 1,
            Self::Ai => 2,
            Self::Meme => 3,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PulseError::InvalidInput(format!("unknown section: {s}")))
    }
}

/// Thumbs up or down
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vote {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(PulseError::InvalidInput(format!("unknown vote: {other}"))),
        }
    }
}

/// Investor profile picked in onboarding step 2
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestorType {
    Hodler,
    Trader,
    Nft,
}

impl InvestorType {
    pub const ALL: [Self; 3] = [Self::Hodler, Self::Trader, Self::Nft];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hodler => "hodler",
            Self::Trader => "trader",
            Self::Nft => "nft",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Hodler => "HODLer",
            Self::Trader => "Day Trader",
            Self::Nft => "NFT Collector",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Hodler => "Long-term investor",
            Self::Trader => "Active trading",
            Self::Nft => "Focus on NFTs",
        }
    }
}

impl FromStr for InvestorType {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PulseError::InvalidInput(format!("unknown investor type: {s}")))
    }
}

/// Assets offered in onboarding step 1
pub const CRYPTO_OPTIONS: [&str; 5] = [
    "Bitcoin (BTC)",
    "Ethereum (ETH)",
    "Solana (SOL)",
    "Cardano (ADA)",
    "Dogecoin (DOGE)",
];

/// Content types offered in onboarding step 3
pub const CONTENT_OPTIONS: [&str; 4] = ["Market News", "Price Charts", "Social Trends", "Fun Memes"];

/// Accumulated onboarding selections, submitted as one payload
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub crypto_assets: Vec<String>,
    /// Sent as `""` until one is picked
    #[serde(default, with = "investor_type_or_empty")]
    pub investor_type: Option<InvestorType>,
    pub content_types: Vec<String>,
}

mod investor_type_or_empty {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::InvestorType;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<InvestorType>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.map_or("", InvestorType::as_str))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<InvestorType>, D::Error> {
        match Option::<String>::deserialize(deserializer)?.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}
