//! Session logic for the Smart Crop Advisor

pub mod controller;
pub mod geolocation;
pub mod recommendation;

pub use controller::{Controller, RequestState, SubmitOutcome};
pub use geolocation::{LocationSource, StaticLocation};
pub use recommendation::{RecommendationClient, RecommendationProvider};
