//! Crop recommendation models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single ranked crop suggestion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct CropRecommendation {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    /// Display glyph, usually a single emoji
    pub icon: String,
    /// Relative suitability in [0, 1]
    #[validate(range(min = 0.0, max = 1.0))]
    pub score: f64,
}

impl CropRecommendation {
    /// Suitability as a whole percentage for display
    pub fn score_percent(&self) -> u8 {
        (self.score.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// Ordered recommendations returned by one provider call, best first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationSet {
    pub crops: Vec<CropRecommendation>,
    pub provider: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

impl RecommendationSet {
    pub fn new(crops: Vec<CropRecommendation>, provider: &str, model: &str) -> Self {
        Self {
            crops,
            provider: provider.to_string(),
            model: model.to_string(),
            generated_at: Utc::now(),
        }
    }

    pub fn top(&self) -> Option<&CropRecommendation> {
        self.crops.first()
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}
