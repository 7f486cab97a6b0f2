//! WebAssembly module for Smart Crop Advisor
//!
//! Provides client-side helpers for:
//! - Slider clamping (temperature, rainfall)
//! - Season parsing
//! - Validating and rendering recommendation JSON offline

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("crop advisor wasm ready"));
}

/// Clamp a temperature slider value to 0..=60 °C
#[wasm_bindgen]
pub fn clamp_temperature_celsius(value: f64) -> f64 {
    clamp_temperature(value)
}

/// Clamp a rainfall slider value to 0..=3000 mm in steps of 50
#[wasm_bindgen]
pub fn clamp_rainfall_mm(value: f64) -> u32 {
    clamp_rainfall(value)
}

/// Canonical season name, or an empty string if unrecognised
#[wasm_bindgen]
pub fn normalize_season(value: &str) -> String {
    value
        .parse::<Season>()
        .map(|season| season.to_string())
        .unwrap_or_default()
}

/// Season names in display order
#[wasm_bindgen]
pub fn season_options() -> js_sys::Array {
    Season::ALL
        .iter()
        .map(|season| JsValue::from_str(season.as_str()))
        .collect()
}

/// Format a suitability score as a whole percentage, e.g. `0.874` -> `"87%"`
#[wasm_bindgen]
pub fn format_score_percent(score: f64) -> String {
    let crop = CropRecommendation {
        name: String::new(),
        description: String::new(),
        icon: String::new(),
        score,
    };
    format!("{}%", crop.score_percent())
}

#[derive(Debug, Serialize)]
struct RenderedCrop {
    rank: usize,
    name: String,
    description: String,
    icon: String,
    score_percent: u8,
}

fn render_recommendations(text: &str) -> Result<String, String> {
    let crops = parse_recommendations(text).map_err(|e| e.to_string())?;
    let rendered: Vec<RenderedCrop> = crops
        .iter()
        .enumerate()
        .map(|(index, crop)| RenderedCrop {
            rank: index + 1,
            name: crop.name.clone(),
            description: crop.description.clone(),
            icon: crop.icon.clone(),
            score_percent: crop.score_percent(),
        })
        .collect();
    serde_json::to_string(&rendered).map_err(|e| e.to_string())
}

/// Validate a raw `{"crops": [...]}` payload and return ranked display rows as JSON
#[wasm_bindgen]
pub fn validate_recommendations(text: &str) -> Result<String, JsValue> {
    render_recommendations(text)
        .map_err(|e| JsValue::from_str(&format!("Invalid recommendations: {}", e)))
}
