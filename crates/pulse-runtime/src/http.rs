//! Shared HTTP plumbing
//!
//! Client construction and the mapping from `reqwest` outcomes onto the
//! transport / status / malformed split of [`PulseError`].

use pulse_core::{PulseError, Result};
use serde::de::DeserializeOwned;

/// Build a client for the configured timeout.
///
/// Browsers enforce their own timeouts, so `fetch`-backed clients ignore it.
pub fn build_client(timeout_secs: u64) -> Result<reqwest::Client> {
    #[cfg(not(target_arch = "wasm32"))]
    let builder = reqwest::Client::builder().timeout(std::time::Duration::from_secs(timeout_secs));
    #[cfg(target_arch = "wasm32")]
    let builder = {
        let _ = timeout_secs;
        reqwest::Client::builder()
    };

    builder
        .build()
        .map_err(|e| PulseError::Config(format!("failed to build HTTP client: {e}")))
}

/// Classify a `reqwest` failure
pub fn request_error(e: reqwest::Error) -> PulseError {
    if e.is_decode() {
        PulseError::Malformed(e.to_string())
    } else {
        PulseError::Transport(e.to_string())
    }
}

/// Pull a human-readable message out of an error body, if there is one
pub fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::to_string)
}

/// Turn a non-success response into [`PulseError::Status`]
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(PulseError::Status {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Check the status and decode a JSON body
pub async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    ensure_success(response)
        .await?
        .json::<T>()
        .await
        .map_err(request_error)
}
