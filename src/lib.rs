//! # Vitalrisk
//!
//! Maternal health risk prediction from six vital-sign measurements.
//!
//! This crate provides:
//! - A fixed-order input record built from form values
//! - Preprocessing and classification behind replaceable ports
//! - Terminal UI with a prediction form and a feature explanation page
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (form inputs, record, labels, outcomes, field table)
//! - `ports`: Trait definitions for the transform and the classifier
//! - `adapters`: JSON artifact loaders and the log sanitizer
//! - `application`: The build-and-predict use case
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{FeatureVector, FormInputs, InputRecord, Label, PredictionOutcome};

/// Result type for Vitalrisk operations
pub type Result<T> = std::result::Result<T, VitalriskError>;

/// Main error type for Vitalrisk
#[derive(Debug, thiserror::Error)]
pub enum VitalriskError {
    #[error("Artifact could not be loaded: {0}")]
    Artifact(#[from] adapters::ArtifactError),
}
