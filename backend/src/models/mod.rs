//! View models for the Smart Crop Advisor
//!
//! Re-exports models from the shared crate and adds the session view rendered
//! by the HTTP surface.

use serde::{Deserialize, Serialize};

pub use shared::models::*;
pub use shared::types::*;

/// Render state of the recommendation request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Loading,
    Success,
    Failure,
}

/// A recommendation as displayed, with its rounded percentage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationView {
    pub rank: usize,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub score: f64,
    pub score_percent: u8,
}

impl RecommendationView {
    pub fn from_ranked(index: usize, crop: &CropRecommendation) -> Self {
        Self {
            rank: index + 1,
            name: crop.name.clone(),
            description: crop.description.clone(),
            icon: crop.icon.clone(),
            score: crop.score,
            score_percent: crop.score_percent(),
        }
    }
}

/// Everything the form needs to render one frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionView {
    pub parameters: QueryParameters,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<RecommendationView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Partial parameter update from the form widgets
#[derive(Debug, Default, Deserialize)]
pub struct UpdateParametersInput {
    pub temperature: Option<f64>,
    pub rainfall: Option<f64>,
    pub season: Option<String>,
}
