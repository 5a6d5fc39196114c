//! OpenRouter LLM Provider
//!
//! Implementation of `LlmProvider` for OpenAI-compatible chat completions
//! served by OpenRouter.

use async_trait::async_trait;
use pulse_core::message::Message;
use pulse_core::provider::{Completion, GenerationOptions, LlmProvider, TokenUsage};
use pulse_core::{PulseConfig, PulseError, Result};
use serde::{Deserialize, Serialize};

use crate::http::{build_client, read_json, request_error};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenRouter chat-completion provider
pub struct OpenRouterProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenRouterProvider {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create from configuration. The API key is mandatory.
    pub fn from_config(config: &PulseConfig) -> Result<Self> {
        if config.openrouter_api_key.trim().is_empty() {
            return Err(PulseError::Config("OPENROUTER_API_KEY not set".into()));
        }
        Ok(Self::new(
            build_client(config.timeout_secs)?,
            &config.openrouter_url,
            &config.openrouter_api_key,
        ))
    }

    /// First choice's text as a completion
    fn convert_completion(response: ChatResponse, requested_model: &str) -> Result<Completion> {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PulseError::Malformed("completion has no choices".into()))?;

        Ok(Completion {
            content,
            model: response.model.unwrap_or_else(|| requested_model.to_string()),
            usage: response.usage,
        })
    }
}

impl std::fmt::Debug for OpenRouterProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl LlmProvider for OpenRouterProvider {
    async fn complete(&self, messages: &[Message], options: &GenerationOptions) -> Result<Completion> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(%url, model = %options.model, "POST chat completion");

        let request = ChatRequest {
            model: &options.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        let body: ChatResponse = read_json(response).await?;
        let completion = Self::convert_completion(body, &options.model)?;
        if let Some(usage) = &completion.usage {
            tracing::debug!(total_tokens = usage.total_tokens, "Completion usage");
        }
        Ok(completion)
    }

    fn name(&self) -> &str {
        "openrouter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let messages = [Message::user("Give me an AI Insight of the Day in 1 sentence.")];
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            temperature: 0.7,
            max_tokens: 150,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 150);
    }

    #[test]
    fn test_first_choice_is_used() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Stay calm."}},
                           {"message":{"role":"assistant","content":"Ignored."}}]}"#,
        )
        .unwrap();
        let completion = OpenRouterProvider::convert_completion(body, "gpt-4o-mini").unwrap();
        assert_eq!(completion.content, "Stay calm.");
        assert_eq!(completion.model, "gpt-4o-mini");
    }

    #[test]
    fn test_empty_choices_is_malformed() {
        let body: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            OpenRouterProvider::convert_completion(body, "m"),
            Err(PulseError::Malformed(_))
        ));
    }
}
