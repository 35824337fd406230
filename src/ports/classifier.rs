//! Classifier port: Trait for the pre-trained predictive model.

use crate::domain::{FeatureVector, Label, PredictionError};

/// A trained model mapping feature vectors to labels.
pub trait Classifier: Send + Sync {
    /// Run inference on a batch of one.
    ///
    /// Returns one label per input row; callers read the first element.
    ///
    /// # Errors
    /// Returns `PredictionError` on any inference failure.
    fn predict(&self, features: &FeatureVector) -> Result<Vec<Label>, PredictionError>;
}

impl<F> Classifier for F
where
    F: Fn(&FeatureVector) -> Result<Vec<Label>, PredictionError> + Send + Sync,
{
    fn predict(&self, features: &FeatureVector) -> Result<Vec<Label>, PredictionError> {
        self(features)
    }
}
