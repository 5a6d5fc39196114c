//! Insight of the Day
//!
//! One sentence of AI market commentary per page load.

use std::sync::Arc;

use crate::error::{PulseError, Result};
use crate::message::Message;
use crate::provider::{GenerationOptions, LlmProvider};

pub const INSIGHT_PROMPT: &str = "Give me an AI Insight of the Day in 1 sentence.";
pub const INSIGHT_TEMPERATURE: f32 = 0.7;
pub const INSIGHT_MAX_TOKENS: u32 = 150;

/// Observable state of the AI section. A failure is logged and the insight
/// simply stays absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InsightState {
    #[default]
    Pending,
    Ready(String),
    Unavailable,
}

impl InsightState {
    pub fn settle(&mut self, result: Result<String>) {
        *self = match result {
            Ok(text) => Self::Ready(text),
            Err(e) => {
                tracing::error!("Insight request failed: {}", e);
                Self::Unavailable
            }
        };
    }

    pub fn insight(&self) -> Option<&str> {
        match self {
            Self::Ready(text) => Some(text),
            Self::Pending | Self::Unavailable => None,
        }
    }
}

/// Fetcher for the AI section
#[derive(Clone)]
pub struct InsightFeed {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
}

impl InsightFeed {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            options: GenerationOptions {
                model: model.into(),
                temperature: INSIGHT_TEMPERATURE,
                max_tokens: INSIGHT_MAX_TOKENS,
            },
        }
    }

    pub async fn fetch(&self) -> Result<String> {
        tracing::debug!(provider = self.provider.name(), model = %self.options.model, "Requesting insight");
        let completion = self
            .provider
            .complete(&[Message::user(INSIGHT_PROMPT)], &self.options)
            .await?;

        let text = completion.content.trim();
        if text.is_empty() {
            return Err(PulseError::Malformed("empty completion".into()));
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;
    use crate::mock::{MockFailure, MockLlmProvider};

    #[tokio::test]
    async fn test_sends_fixed_prompt_and_parameters() {
        let provider = Arc::new(MockLlmProvider::new("  Volatility is opportunity.\n"));
        let feed = InsightFeed::new(provider.clone(), "gpt-4o-mini");

        assert_eq!(feed.fetch().await.unwrap(), "Volatility is opportunity.");

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let (messages, options) = &requests[0];
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, INSIGHT_PROMPT);
        assert_eq!(options.max_tokens, 150);
        assert!((options.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_failure_leaves_insight_absent() {
        let feed = InsightFeed::new(
            Arc::new(MockLlmProvider::failing(MockFailure::Status {
                status: 401,
                message: Some("bad key".into()),
            })),
            "gpt-4o-mini",
        );
        let mut state = InsightState::default();
        state.settle(feed.fetch().await);

        assert_eq!(state, InsightState::Unavailable);
        assert_eq!(state.insight(), None);
    }

    #[tokio::test]
    async fn test_blank_completion_is_malformed() {
        let feed = InsightFeed::new(Arc::new(MockLlmProvider::new("   ")), "m");
        assert!(matches!(feed.fetch().await, Err(PulseError::Malformed(_))));
    }
}
