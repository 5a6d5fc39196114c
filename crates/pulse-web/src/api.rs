//! Browser glue
//!
//! Runtime configuration is fetched from the page origin instead of being
//! compiled into the bundle, and the session token lives in local storage.

use std::sync::Arc;

use pulse_core::{AuthToken, PulseConfig, PulseError, Result, Session, TokenStore};
use pulse_runtime::Clients;
use pulse_runtime::http::{ensure_success, request_error};

/// Served next to `index.html`
pub const CONFIG_PATH: &str = "/pulse-config.json";

const TOKEN_KEY: &str = "cryptopulse.token";

fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:8080".into())
}

/// Fetch and validate the configuration document
pub async fn load_config() -> Result<PulseConfig> {
    let url = format!("{}{}", origin(), CONFIG_PATH);
    let response = reqwest::get(&url).await.map_err(request_error)?;
    let body = ensure_success(response)
        .await?
        .text()
        .await
        .map_err(request_error)?;
    PulseConfig::from_json(&body)
}

/// Everything the app needs before mounting
pub async fn boot() -> Result<(PulseConfig, Clients)> {
    let config = load_config().await?;
    let session = Arc::new(Session::with_store(Arc::new(LocalStorageTokenStore::new(TOKEN_KEY)))?);
    let clients = Clients::from_config(&config, session)?;
    Ok((config, clients))
}

/// Token persistence in `window.localStorage`
#[derive(Debug)]
pub struct LocalStorageTokenStore {
    key: String,
}

impl LocalStorageTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

fn storage() -> Result<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| PulseError::Storage("local storage unavailable".into()))
}

#[allow(clippy::needless_pass_by_value)]
fn js_error(e: wasm_bindgen::JsValue) -> PulseError {
    PulseError::Storage(format!("{e:?}"))
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Result<Option<AuthToken>> {
        Ok(storage()?
            .get_item(&self.key)
            .map_err(js_error)?
            .filter(|token| !token.is_empty())
            .map(AuthToken::new))
    }

    fn save(&self, token: &AuthToken) -> Result<()> {
        storage()?.set_item(&self.key, token.as_str()).map_err(js_error)
    }

    fn clear(&self) -> Result<()> {
        storage()?.remove_item(&self.key).map_err(js_error)
    }
}
