//! Linear adapter: Implementation of Classifier using an exported linear model.
//!
//! The artifact is the JSON export of a fitted linear classifier
//! (logistic regression or similar):
//!
//! ```json
//! {
//!   "classes": ["high risk", "low risk", "mid risk"],
//!   "coef": [[...], [...], [...]],
//!   "intercept": [..., ..., ...]
//! }
//! ```
//!
//! A single coefficient row is a binary model: a positive decision value
//! picks `classes[1]`. Otherwise each row scores one class and the highest
//! score wins (first on ties).

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{read_artifact, ArtifactError};
use crate::domain::{FeatureVector, Label, PredictionError};
use crate::ports::Classifier;

/// Linear model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedLinearModel {
    pub classes: Vec<Label>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

/// Linear classifier over preprocessed features.
#[derive(Debug, Clone)]
pub struct LinearModelAdapter {
    params: ExportedLinearModel,
    n_features: usize,
}

impl LinearModelAdapter {
    /// Load model parameters from a JSON artifact.
    ///
    /// # Errors
    /// Returns `ArtifactError` if the file is unreadable, malformed, or
    /// internally inconsistent.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let params: ExportedLinearModel = read_artifact(path)?;
        let adapter = Self::from_params(params)?;

        tracing::info!(
            "Loaded model from {:?} (n_classes={}, n_features={})",
            path,
            adapter.classes().len(),
            adapter.n_features
        );
        Ok(adapter)
    }

    /// Build from in-memory parameters.
    ///
    /// # Errors
    /// Returns `ArtifactError::Invalid` on inconsistent parameters.
    pub fn from_params(params: ExportedLinearModel) -> Result<Self, ArtifactError> {
        let n_classes = params.classes.len();
        if n_classes < 2 {
            return Err(ArtifactError::Invalid(format!(
                "model needs at least 2 classes, got {n_classes}"
            )));
        }

        let n_rows = params.coef.len();
        let expected_rows = if n_classes == 2 { 1 } else { n_classes };
        if n_rows != expected_rows {
            return Err(ArtifactError::Invalid(format!(
                "model has {n_rows} coefficient rows, expected {expected_rows} for {n_classes} classes"
            )));
        }
        if params.intercept.len() != n_rows {
            return Err(ArtifactError::Invalid(
                "intercept length does not match coefficient rows".into(),
            ));
        }

        let n_features = params.coef[0].len();
        if n_features == 0 || params.coef.iter().any(|row| row.len() != n_features) {
            return Err(ArtifactError::Invalid(
                "coefficient rows must be non-empty and of equal length".into(),
            ));
        }
        if params
            .coef
            .iter()
            .flatten()
            .chain(params.intercept.iter())
            .any(|v| !v.is_finite())
        {
            return Err(ArtifactError::Invalid(
                "model parameters must be finite".into(),
            ));
        }

        Ok(Self { params, n_features })
    }

    /// Number of features the model expects.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Class labels in model order.
    #[must_use]
    pub fn classes(&self) -> &[Label] {
        &self.params.classes
    }

    fn decision_function(&self, x: &[f64]) -> Vec<f64> {
        self.params
            .coef
            .iter()
            .zip(&self.params.intercept)
            .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
            .collect()
    }
}

impl Classifier for LinearModelAdapter {
    fn predict(&self, features: &FeatureVector) -> Result<Vec<Label>, PredictionError> {
        let x = features.as_slice();
        if x.len() != self.n_features {
            return Err(PredictionError::FeatureCount {
                expected: self.n_features,
                found: x.len(),
            });
        }

        let scores = self.decision_function(x);
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(PredictionError::NonFinite);
        }

        let class_idx = if scores.len() == 1 {
            usize::from(scores[0] > 0.0)
        } else {
            let mut best = 0;
            for (i, s) in scores.iter().enumerate().skip(1) {
                if *s > scores[best] {
                    best = i;
                }
            }
            best
        };

        Ok(vec![self.params.classes[class_idx].clone()])
    }
}
