//! Validation utilities for the Smart Crop Advisor
//!
//! Slider bounds for the query parameters and the structural checks applied to
//! provider output before it is accepted.

use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::models::CropRecommendation;

// ============================================================================
// Parameter Bounds
// ============================================================================

pub const TEMPERATURE_MIN: f64 = 0.0;
pub const TEMPERATURE_MAX: f64 = 60.0;
pub const RAINFALL_MIN: u32 = 0;
pub const RAINFALL_MAX: u32 = 3000;
pub const RAINFALL_STEP: u32 = 50;

/// Clamp a temperature reading to the slider range. NaN maps to the minimum.
pub fn clamp_temperature(value: f64) -> f64 {
    if value.is_nan() {
        return TEMPERATURE_MIN;
    }
    value.clamp(TEMPERATURE_MIN, TEMPERATURE_MAX)
}

/// Clamp rainfall to the slider range and snap it to the nearest step.
pub fn clamp_rainfall(value: f64) -> u32 {
    if value.is_nan() {
        return RAINFALL_MIN;
    }
    let clamped = value.clamp(f64::from(RAINFALL_MIN), f64::from(RAINFALL_MAX));
    let steps = (clamped / f64::from(RAINFALL_STEP)).round() as u32;
    (steps * RAINFALL_STEP).min(RAINFALL_MAX)
}

// ============================================================================
// Provider Output
// ============================================================================

/// Reasons a provider payload is rejected
#[derive(Debug, Error)]
pub enum RecommendationParseError {
    #[error("Response is not valid recommendation JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Recommendation #{index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

#[derive(Debug, Deserialize)]
struct CropsPayload {
    crops: Vec<CropRecommendation>,
}

/// Parse the provider's structured output into ranked recommendations.
///
/// The payload must be `{"crops": [...]}` with every field present on every
/// entry. A surrounding Markdown code fence is tolerated. Entry order is kept
/// exactly as received.
pub fn parse_recommendations(text: &str) -> Result<Vec<CropRecommendation>, RecommendationParseError> {
    let payload: CropsPayload = serde_json::from_str(strip_code_fence(text))?;

    for (index, crop) in payload.crops.iter().enumerate() {
        crop.validate()
            .map_err(|e| RecommendationParseError::InvalidEntry {
                index,
                reason: e.to_string(),
            })?;
    }

    Ok(payload.crops)
}

/// Remove a leading ```/```json fence and its closing fence, if present
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
