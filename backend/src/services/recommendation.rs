//! Recommendation client
//!
//! Turns a parameter snapshot into a provider prompt and the provider's raw
//! output into ranked crop recommendations. One provider call per request, no
//! retries, no caching.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use shared::{parse_recommendations, QueryParameters, RecommendationSet};

use crate::error::ProviderError;

/// Prompt sent to a recommendation provider
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationPrompt {
    pub system: String,
    pub user: String,
}

/// Trait for generative-AI recommendation providers.
///
/// Implementations make exactly one call per `generate` and return the model's
/// text output untouched; parsing happens in [`RecommendationClient`].
#[async_trait]
pub trait RecommendationProvider: Send + Sync + fmt::Debug {
    async fn generate(&self, prompt: &RecommendationPrompt) -> Result<String, ProviderError>;

    /// Provider name (e.g. "gemini", "fake")
    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

const SYSTEM_INSTRUCTION: &str = "You are an expert agronomist advising smallholder farmers. \
Recommend crops strictly from the environmental conditions you are given and answer only with JSON.";

/// Build the prompt for one parameter snapshot
pub fn build_prompt(params: &QueryParameters) -> RecommendationPrompt {
    let mut user = format!(
        "Recommend the top 3 crops to grow under these conditions.\n\
         Temperature: {}°C\n\
         Annual rainfall: {} mm\n\
         Season: {}\n",
        params.temperature, params.rainfall, params.season
    );
    if let Some(location) = params.location {
        user.push_str(&format!(
            "Location (latitude, longitude): {}\n",
            location
        ));
    }
    user.push_str(
        "Respond with a JSON object {\"crops\": [...]} ordered from most to least suitable. \
         Each entry must have \"name\" (crop name), \"description\" (one sentence on why it suits \
         these conditions), \"icon\" (a single emoji) and \"score\" (suitability between 0 and 1).",
    );

    RecommendationPrompt {
        system: SYSTEM_INSTRUCTION.to_string(),
        user,
    }
}

/// Client that asks a provider for crop recommendations
#[derive(Clone, Debug)]
pub struct RecommendationClient {
    provider: Arc<dyn RecommendationProvider>,
}

impl RecommendationClient {
    pub fn new(provider: Arc<dyn RecommendationProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Request ranked recommendations for a parameter snapshot.
    ///
    /// The response is accepted whole or rejected whole: any entry that fails
    /// validation fails the call with `MalformedResponse`.
    pub async fn recommend(
        &self,
        params: &QueryParameters,
    ) -> Result<RecommendationSet, ProviderError> {
        let prompt = build_prompt(params);

        tracing::debug!(
            provider = self.provider.provider_name(),
            model = self.provider.model_name(),
            temperature = params.temperature,
            rainfall = params.rainfall,
            season = %params.season,
            has_location = params.location.is_some(),
            "Requesting crop recommendations"
        );

        let raw = self.provider.generate(&prompt).await?;
        let crops = parse_recommendations(&raw)?;

        tracing::info!(count = crops.len(), "Received crop recommendations");

        Ok(RecommendationSet::new(
            crops,
            self.provider.provider_name(),
            self.provider.model_name(),
        ))
    }
}
