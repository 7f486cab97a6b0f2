//! Domain models for the Smart Crop Advisor

mod query;
mod recommendation;

pub use query::*;
pub use recommendation::*;
