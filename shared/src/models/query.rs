//! Query parameter models

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::GeoLocation;
use crate::validation::{clamp_rainfall, clamp_temperature};

pub const DEFAULT_TEMPERATURE_CELSIUS: f64 = 28.0;
pub const DEFAULT_RAINFALL_MM: u32 = 1200;

/// Agricultural cropping season
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Season {
    /// Monsoon crops, sown June-July
    #[default]
    Kharif,
    /// Winter crops, sown October-November
    Rabi,
    /// Short summer crops between Rabi and Kharif
    Zaid,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Kharif, Season::Rabi, Season::Zaid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown season '{0}', expected one of Kharif, Rabi, Zaid")]
pub struct ParseSeasonError(pub String);

impl std::str::FromStr for Season {
    type Err = ParseSeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Season::ALL
            .into_iter()
            .find(|season| season.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseSeasonError(s.to_string()))
    }
}

/// Environmental parameters sent to the recommendation provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryParameters {
    /// Degrees Celsius, always within [0, 60]
    pub temperature: f64,
    /// Millimetres, within [0, 3000] and a multiple of 50
    pub rainfall: u32,
    pub season: Season,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE_CELSIUS,
            rainfall: DEFAULT_RAINFALL_MM,
            season: Season::default(),
            location: None,
        }
    }
}

impl QueryParameters {
    /// Build parameters from raw widget values, applying the slider bounds
    pub fn new(temperature: f64, rainfall: f64, season: Season) -> Self {
        Self {
            temperature: clamp_temperature(temperature),
            rainfall: clamp_rainfall(rainfall),
            season,
            location: None,
        }
    }

    pub fn with_location(mut self, location: GeoLocation) -> Self {
        self.location = Some(location);
        self
    }
}
