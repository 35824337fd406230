//! Application layer: Use cases.
//!
//! Orchestrates domain types with ports to implement the Predict action.

mod prediction;

pub use prediction::PredictionService;
