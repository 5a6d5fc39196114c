//! Backend Contract
//!
//! Request/response shapes of the CryptoPulse backend and the trait the
//! dashboard talks to it through. The backend itself is an external service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Preferences, Section, Vote};

/// Login form payload
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login endpoint response
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// One vote as submitted to the feedback endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub section: Section,
    pub vote: Vote,
    pub timestamp: DateTime<Utc>,
}

/// CryptoPulse backend (Strategy pattern)
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Backend: Send + Sync {
    /// Exchange credentials for a bearer token
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// Record a section vote
    async fn submit_feedback(&self, feedback: &Feedback) -> Result<()>;

    /// Store the onboarding answers
    async fn save_preferences(&self, preferences: &Preferences) -> Result<()>;
}
