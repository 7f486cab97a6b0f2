//! Fake recommendation provider for tests and offline development.
//!
//! Responses are matched by checking whether the prompt contains a registered
//! substring, so one provider can answer differently per season.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::services::recommendation::{RecommendationPrompt, RecommendationProvider};

/// A deterministic provider that never touches the network
#[derive(Debug, Default)]
pub struct FakeProvider {
    /// Prompt substring -> response, checked in registration order
    responses: Vec<(String, String)>,
    /// Response when no pattern matches
    default_response: Option<String>,
    /// Error returned instead of any response
    failure: Option<ProviderError>,
    /// Simulated latency before answering
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeProvider {
    /// Create a FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a FakeProvider whose every call fails with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Answer `response` for prompts containing `prompt_contains` (case-insensitive).
    pub fn with_response(mut self, prompt_contains: &str, response: &str) -> Self {
        self.responses
            .push((prompt_contains.to_lowercase(), response.to_string()));
        self
    }

    /// Set the response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Wait `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `generate` calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Canned per-season answers, used when the provider kind is "fake".
    pub fn with_seasonal_responses() -> Self {
        Self::new()
            .with_response(
                "Season: Kharif",
                r#"{"crops": [
                    {"name": "Rice", "description": "Paddy thrives on heavy monsoon rainfall and warm temperatures.", "icon": "🌾", "score": 0.92},
                    {"name": "Cotton", "description": "Warm days and moderate rain suit cotton bolls.", "icon": "☁️", "score": 0.81},
                    {"name": "Maize", "description": "A hardy kharif cereal that tolerates variable rain.", "icon": "🌽", "score": 0.77}
                ]}"#,
            )
            .with_response(
                "Season: Rabi",
                r#"{"crops": [
                    {"name": "Wheat", "description": "Cool winters and residual soil moisture favour wheat.", "icon": "🌾", "score": 0.9},
                    {"name": "Mustard", "description": "Needs little water and handles cool nights well.", "icon": "🌼", "score": 0.83},
                    {"name": "Chickpea", "description": "A drought-tolerant pulse that fixes nitrogen.", "icon": "🫘", "score": 0.74}
                ]}"#,
            )
            .with_response(
                "Season: Zaid",
                r#"{"crops": [
                    {"name": "Watermelon", "description": "Loves the hot, dry summer window.", "icon": "🍉", "score": 0.88},
                    {"name": "Cucumber", "description": "Fast-growing with modest irrigation.", "icon": "🥒", "score": 0.8},
                    {"name": "Moong", "description": "A short-duration pulse that fits between seasons.", "icon": "🌱", "score": 0.71}
                ]}"#,
            )
    }
}

#[async_trait]
impl RecommendationProvider for FakeProvider {
    async fn generate(&self, prompt: &RecommendationPrompt) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let prompt_lower = prompt.user.to_lowercase();
        if let Some((_, response)) = self
            .responses
            .iter()
            .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()))
        {
            return Ok(response.clone());
        }

        self.default_response.clone().ok_or_else(|| {
            ProviderError::NetworkFailure(format!(
                "FakeProvider: no response configured for prompt (first 100 chars): {}",
                prompt.user.chars().take(100).collect::<String>()
            ))
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
