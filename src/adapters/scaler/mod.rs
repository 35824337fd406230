//! Scaler adapter: Implementation of Preprocessor using an exported standard scaler.
//!
//! The artifact is the JSON export of a fitted standard scaler:
//!
//! ```json
//! {
//!   "feature_names_in": ["Age", "SystolicBP", "DiastolicBP", "BS", "BodyTemp", "HeartRate"],
//!   "mean": [29.87, 113.2, 76.46, 8.73, 98.67, 74.3],
//!   "scale": [13.47, 18.4, 13.88, 3.29, 1.37, 8.09],
//!   "with_mean": true,
//!   "with_std": true
//! }
//! ```
//!
//! `transform` rejects records whose column names or order differ from the
//! fitted ones, and records containing non-finite values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{read_artifact, ArtifactError};
use crate::domain::{FeatureVector, InputRecord, PreprocessingError};
use crate::ports::Preprocessor;

fn default_true() -> bool {
    true
}

/// Scaler parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedScaler {
    pub feature_names_in: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default = "default_true")]
    pub with_mean: bool,
    #[serde(default = "default_true")]
    pub with_std: bool,
}

/// Standard-scaler preprocessing transform.
#[derive(Debug, Clone)]
pub struct StandardScalerAdapter {
    params: ExportedScaler,
}

impl StandardScalerAdapter {
    /// Load scaler parameters from a JSON artifact.
    ///
    /// # Errors
    /// Returns `ArtifactError` if the file is unreadable, malformed, or
    /// internally inconsistent.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let params: ExportedScaler = read_artifact(path)?;
        let adapter = Self::from_params(params)?;

        tracing::info!(
            "Loaded preprocessor from {:?} (n_features={})",
            path,
            adapter.params.feature_names_in.len()
        );
        Ok(adapter)
    }

    /// Build from in-memory parameters.
    ///
    /// Zero scales are replaced by 1, so constant columns pass through
    /// centered but unscaled.
    ///
    /// # Errors
    /// Returns `ArtifactError::Invalid` on inconsistent parameters.
    pub fn from_params(mut params: ExportedScaler) -> Result<Self, ArtifactError> {
        let n = params.feature_names_in.len();
        if n == 0 {
            return Err(ArtifactError::Invalid(
                "preprocessor has no input features".into(),
            ));
        }
        if params.mean.len() != n || params.scale.len() != n {
            return Err(ArtifactError::Invalid(format!(
                "preprocessor parameter lengths do not match feature_names_in ({n})"
            )));
        }
        if params
            .mean
            .iter()
            .chain(params.scale.iter())
            .any(|v| !v.is_finite())
        {
            return Err(ArtifactError::Invalid(
                "preprocessor parameters must be finite".into(),
            ));
        }

        for s in params.scale.iter_mut() {
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        Ok(Self { params })
    }

    /// Column names the scaler was fitted on.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.params.feature_names_in
    }
}

impl Preprocessor for StandardScalerAdapter {
    fn transform(&self, record: &InputRecord) -> Result<FeatureVector, PreprocessingError> {
        let names = record.column_names();
        let matches = names.len() == self.params.feature_names_in.len()
            && names
                .iter()
                .zip(&self.params.feature_names_in)
                .all(|(a, b)| *a == b.as_str());
        if !matches {
            return Err(PreprocessingError::ColumnMismatch {
                expected: self.params.feature_names_in.clone(),
                found: names.iter().map(|s| s.to_string()).collect(),
            });
        }

        let mut out = Vec::with_capacity(names.len());
        for (i, (column, value)) in record.iter().enumerate() {
            if !value.is_finite() {
                return Err(PreprocessingError::NonFinite {
                    column: column.name().to_string(),
                });
            }
            let mut x = value;
            if self.params.with_mean {
                x -= self.params.mean[i];
            }
            if self.params.with_std {
                x /= self.params.scale[i];
            }
            out.push(x);
        }

        Ok(FeatureVector::new(out))
    }
}
