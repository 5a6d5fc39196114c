//! CryptoPulse backend client
//!
//! One `ApiClient` per app, sharing the [`Session`] with the login flow: the
//! bearer token is read on every call, so it appears right after login and
//! disappears after logout.

use std::sync::Arc;

use async_trait::async_trait;
use pulse_core::{AuthFlow, Backend, Credentials, FeedbackRecorder, Feedback, LoginResponse, Preferences, PulseConfig, Result, Session};
use serde::Serialize;

use crate::http::{build_client, ensure_success, read_json, request_error};

/// `Backend` over HTTP
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, session: Arc<Session>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn from_config(config: &PulseConfig, session: Arc<Session>) -> Result<Self> {
        Ok(Self::new(build_client(config.timeout_secs)?, &config.api_url, session))
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn recorder(self: &Arc<Self>) -> FeedbackRecorder {
        FeedbackRecorder::new(self.clone())
    }

    pub fn auth(self: &Arc<Self>) -> AuthFlow {
        AuthFlow::new(self.clone(), self.session.clone())
    }

    /// POST a JSON body, attaching the session token when there is one
    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.post(&url).json(body);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token.as_str());
        }

        tracing::debug!(%url, authenticated = self.session.is_authenticated(), "POST");
        let response = request.send().await.map_err(request_error)?;
        ensure_success(response).await
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Backend for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let response = self.post("/api/auth/login", credentials).await?;
        read_json(response).await
    }

    async fn submit_feedback(&self, feedback: &Feedback) -> Result<()> {
        self.post("/api/feedback", feedback).await.map(drop)
    }

    async fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        self.post("/api/user/preferences", preferences).await.map(drop)
    }
}
