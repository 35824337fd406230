//! Prediction outcome and the two error kinds surfaced to the user.

use super::label::Label;

/// Raised when the preprocessing transform rejects a record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PreprocessingError {
    #[error(
        "The feature names should match those that were passed during fit. Expected {expected:?}, got {found:?}"
    )]
    ColumnMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Input contains NaN or infinity in column {column}")]
    NonFinite { column: String },

    #[error("{0}")]
    Rejected(String),
}

/// Raised when model inference fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("X has {found} features, but the model is expecting {expected} features as input")]
    FeatureCount { expected: usize, found: usize },

    #[error("Decision function produced a non-finite value")]
    NonFinite,

    #[error("Model returned no predictions")]
    EmptyOutput,

    #[error("{0}")]
    Failed(String),
}

/// Why a Predict action did not produce a label.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionFailure {
    #[error("Error in preprocessing: {0}")]
    Preprocessing(#[from] PreprocessingError),

    #[error("Error in prediction: {0}")]
    Prediction(#[from] PredictionError),
}

/// Result of one build-and-predict cycle, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Success(Label),
    Failure(PredictionFailure),
}

impl PredictionOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The predicted label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&Label> {
        match self {
            Self::Success(label) => Some(label),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&PredictionFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(f) => Some(f),
        }
    }

    /// Text shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Success(label) => format!("Prediction: {label}"),
            Self::Failure(f) => f.to_string(),
        }
    }
}

impl From<PredictionFailure> for PredictionOutcome {
    fn from(value: PredictionFailure) -> Self {
        Self::Failure(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let ok = PredictionOutcome::Success(Label::from("low risk"));
        assert_eq!(ok.message(), "Prediction: low risk");
        assert!(ok.is_success());

        let pre: PredictionOutcome =
            PredictionFailure::from(PreprocessingError::Rejected("bad shape".into())).into();
        assert_eq!(pre.message(), "Error in preprocessing: bad shape");
        assert!(pre.label().is_none());

        let pred: PredictionOutcome = PredictionFailure::from(PredictionError::EmptyOutput).into();
        assert_eq!(pred.message(), "Error in prediction: Model returned no predictions");
    }

    #[test]
    fn test_feature_count_message() {
        let e = PredictionError::FeatureCount {
            expected: 6,
            found: 5,
        };
        assert_eq!(
            e.to_string(),
            "X has 5 features, but the model is expecting 6 features as input"
        );
    }
}
