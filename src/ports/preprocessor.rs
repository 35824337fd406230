//! Preprocessor port: Trait for the fitted preprocessing transform.
//!
//! Abstracts the transform artifact from the form handler so tests can
//! substitute stubs.

use crate::domain::{FeatureVector, InputRecord, PreprocessingError};

/// A fitted transform turning an input record into model features.
pub trait Preprocessor: Send + Sync {
    /// Transform one record.
    ///
    /// # Errors
    /// Returns `PreprocessingError` if the record's shape or values are
    /// rejected by the transform.
    fn transform(&self, record: &InputRecord) -> Result<FeatureVector, PreprocessingError>;
}

impl<F> Preprocessor for F
where
    F: Fn(&InputRecord) -> Result<FeatureVector, PreprocessingError> + Send + Sync,
{
    fn transform(&self, record: &InputRecord) -> Result<FeatureVector, PreprocessingError> {
        self(record)
    }
}
