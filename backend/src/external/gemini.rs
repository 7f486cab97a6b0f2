//! Gemini recommendation provider
//!
//! Client for the Google Generative Language API `generateContent` endpoint,
//! using structured JSON output so the reply can be parsed without scraping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ProviderError;
use crate::services::recommendation::{RecommendationPrompt, RecommendationProvider};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Gemini generative-AI API
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    api_key: String,
    model: String,
    base_url: String,
    http_client: Client,
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
    temperature: f32,
}

/// Response body from `generateContent`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Error body returned by Google APIs
#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleApiError,
}

#[derive(Debug, Deserialize)]
struct GoogleApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Schema the model must follow: an object holding the ranked crops array
fn crops_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "crops": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "icon": { "type": "STRING", "description": "A single emoji for the crop" },
                        "score": { "type": "NUMBER", "description": "Suitability between 0 and 1" }
                    },
                    "required": ["name", "description", "icon", "score"],
                    "propertyOrdering": ["name", "description", "icon", "score"]
                }
            }
        },
        "required": ["crops"]
    })
}

/// Map a non-success status and body to the provider error taxonomy
fn classify_error(status: StatusCode, body: &str) -> ProviderError {
    let detail = serde_json::from_str::<GoogleErrorResponse>(body)
        .map(|e| e.error)
        .ok();
    let message = detail
        .as_ref()
        .map(|e| e.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());

    let rejected_credentials = status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || body.contains("API_KEY_INVALID")
        || detail
            .as_ref()
            .is_some_and(|e| e.status == "UNAUTHENTICATED" || e.status == "PERMISSION_DENIED");

    if rejected_credentials {
        ProviderError::AuthFailure(format!("API returned {}: {}", status, message))
    } else {
        ProviderError::NetworkFailure(format!("API returned {}: {}", status, message))
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider against the public endpoint
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL.to_string(), timeout)
    }

    /// Create a new Gemini provider with a custom base URL (for testing)
    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(&self, prompt: &RecommendationPrompt) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(prompt.system.clone()),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.user.clone()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: crops_schema(),
                temperature: 0.2,
            },
        }
    }
}

#[async_trait]
impl RecommendationProvider for GeminiProvider {
    async fn generate(&self, prompt: &RecommendationPrompt) -> Result<String, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::AuthFailure(
                "Gemini API key is not configured".to_string(),
            ));
        }

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&self.build_request(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_error(status, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(format!("Failed to parse response: {}", e)))?;

        if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ProviderError::MalformedResponse(format!(
                "Prompt was blocked: {}",
                reason
            )));
        }

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::MalformedResponse("No candidates in response".to_string()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::MalformedResponse(format!(
                "Candidate has no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
