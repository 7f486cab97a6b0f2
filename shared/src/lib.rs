//! Shared types and models for the Smart Crop Advisor
//!
//! This crate contains types shared between the backend, the browser front end
//! (via WASM), and tests. It performs no I/O.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
