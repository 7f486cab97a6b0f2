//! External API integrations

pub mod fake;
pub mod gemini;
pub mod ip_geolocation;

pub use fake::FakeProvider;
pub use gemini::GeminiProvider;
pub use ip_geolocation::IpGeolocationClient;

use std::sync::Arc;
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::error::{AppError, AppResult};
use crate::services::RecommendationProvider;

/// Build the recommendation provider selected by configuration.
///
/// - `gemini`: Gemini API, key from `CROP__PROVIDER__API_KEY` or `GEMINI_API_KEY`
/// - `fake`: canned per-season answers, no network
pub fn provider_from_config(config: &ProviderConfig) -> AppResult<Arc<dyn RecommendationProvider>> {
    match config.kind.as_str() {
        "fake" => Ok(Arc::new(FakeProvider::with_seasonal_responses())),
        "gemini" => {
            if config.api_key.trim().is_empty() {
                tracing::warn!("No Gemini API key configured, recommendation requests will fail");
            }
            let provider = GeminiProvider::with_base_url(
                config.api_key.clone(),
                config.model.clone(),
                config.base_url.clone(),
                Duration::from_secs(config.timeout_secs),
            )
            .map_err(|e| AppError::Configuration(e.to_string()))?;
            Ok(Arc::new(provider))
        }
        other => Err(AppError::Configuration(format!(
            "Unknown provider kind: {}",
            other
        ))),
    }
}
