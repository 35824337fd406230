//! Prediction service: the form handler behind the Predict action.
//!
//! One call runs one request/response cycle:
//! 1. Assemble the input record in fixed column order
//! 2. Run the preprocessing transform
//! 3. Run model inference and read the first label
//!
//! Failures in either step become a `PredictionOutcome::Failure` for the UI
//! to render; they never abort the session.

use std::sync::Arc;

use crate::adapters::{ArtifactError, LinearModelAdapter, StandardScalerAdapter};
use crate::config::AppConfig;
use crate::domain::{
    FormInputs, InputRecord, Label, PredictionError, PredictionFailure, PredictionOutcome,
};
use crate::ports::{Classifier, Preprocessor};

/// Service running build-and-predict against injected artifacts.
///
/// Artifacts are shared read-only; the service holds no mutable state, so a
/// call with the same inputs always yields the same outcome.
pub struct PredictionService<P, C>
where
    P: Preprocessor,
    C: Classifier,
{
    preprocessor: Arc<P>,
    classifier: Arc<C>,
}

impl<P, C> PredictionService<P, C>
where
    P: Preprocessor,
    C: Classifier,
{
    /// Create a new prediction service.
    pub fn new(preprocessor: Arc<P>, classifier: Arc<C>) -> Self {
        Self {
            preprocessor,
            classifier,
        }
    }

    /// Build the input record and run transform then predict.
    ///
    /// The classifier is not called when preprocessing fails.
    #[must_use]
    pub fn build_and_predict(&self, inputs: &FormInputs) -> PredictionOutcome {
        tracing::debug!("Step 1: Assembling input record...");
        let record = InputRecord::from_inputs(inputs);

        match self.run(&record) {
            Ok(label) => {
                tracing::debug!("Prediction complete");
                PredictionOutcome::Success(label)
            }
            Err(failure) => {
                let kind = match failure {
                    PredictionFailure::Preprocessing(_) => "preprocessing",
                    PredictionFailure::Prediction(_) => "prediction",
                };
                tracing::debug!(kind, "Prediction did not produce a label");
                PredictionOutcome::Failure(failure)
            }
        }
    }

    fn run(&self, record: &InputRecord) -> Result<Label, PredictionFailure> {
        tracing::debug!("Step 2: Running preprocessing transform...");
        let features = self.preprocessor.transform(record)?;

        tracing::debug!("Step 3: Running model inference...");
        let label = self
            .classifier
            .predict(&features)?
            .into_iter()
            .next()
            .ok_or(PredictionError::EmptyOutput)?;

        Ok(label)
    }
}

impl PredictionService<StandardScalerAdapter, LinearModelAdapter> {
    /// Load both artifacts from the configured paths.
    ///
    /// # Errors
    /// Returns error if an artifact is missing or malformed, or if the
    /// transform's output width does not match the model's input width.
    pub fn from_config(config: &AppConfig) -> crate::Result<Self> {
        let preprocessor = StandardScalerAdapter::load(&config.preprocess_path)?;
        let classifier = LinearModelAdapter::load(&config.model_path)?;

        let width = preprocessor.feature_names().len();
        if width != classifier.n_features() {
            return Err(ArtifactError::Invalid(format!(
                "preprocessor emits {width} features but model expects {}",
                classifier.n_features()
            ))
            .into());
        }

        Ok(Self::new(Arc::new(preprocessor), Arc::new(classifier)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeatureVector, PreprocessingError, FORM_FIELDS};
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Transform = Box<dyn Fn(&InputRecord) -> Result<FeatureVector, PreprocessingError> + Send + Sync>;
    type Predict = Box<dyn Fn(&FeatureVector) -> Result<Vec<Label>, PredictionError> + Send + Sync>;

    fn identity_transform() -> Transform {
        Box::new(|record: &InputRecord| -> Result<FeatureVector, PreprocessingError> {
            Ok(FeatureVector::new(record.values().to_vec()))
        })
    }

    /// Echo stub: renders the features it receives as the label.
    fn echo_predict(calls: Arc<AtomicUsize>) -> Predict {
        Box::new(move |features: &FeatureVector| -> Result<Vec<Label>, PredictionError> {
            calls.fetch_add(1, Ordering::SeqCst);
            let text = serde_json::to_string(features)
                .map_err(|e| PredictionError::Failed(e.to_string()))?;
            Ok(vec![Label::Class(text)])
        })
    }

    fn service(transform: Transform, predict: Predict) -> PredictionService<Transform, Predict> {
        PredictionService::new(Arc::new(transform), Arc::new(predict))
    }

    #[test]
    fn test_defaults_with_echo_stubs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let svc = service(identity_transform(), echo_predict(calls.clone()));

        let outcome = svc.build_and_predict(&FormInputs::default());

        assert_eq!(
            outcome,
            PredictionOutcome::Success(Label::from("[30.0,120.0,80.0,0.0,98.0,70.0]"))
        );
        assert_eq!(
            outcome.message(),
            "Prediction: [30.0,120.0,80.0,0.0,98.0,70.0]"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failing_transform_skips_classifier() {
        let calls = Arc::new(AtomicUsize::new(0));
        let failing: Transform = Box::new(|_: &InputRecord| -> Result<FeatureVector, PreprocessingError> {
            Err(PreprocessingError::Rejected("unknown category in BS".into()))
        });
        let svc = service(failing, echo_predict(calls.clone()));

        let outcome = svc.build_and_predict(&FormInputs::default());

        assert_eq!(
            outcome,
            PredictionOutcome::Failure(PredictionFailure::Preprocessing(
                PreprocessingError::Rejected("unknown category in BS".into())
            ))
        );
        assert_eq!(outcome.message(), "Error in preprocessing: unknown category in BS");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failing_classifier_reports_its_message() {
        let failing: Predict = Box::new(|_: &FeatureVector| -> Result<Vec<Label>, PredictionError> {
            Err(PredictionError::Failed("model exploded".into()))
        });
        let svc = service(identity_transform(), failing);

        let outcome = svc.build_and_predict(&FormInputs::default());

        assert!(!outcome.is_success());
        assert!(matches!(
            outcome.failure(),
            Some(PredictionFailure::Prediction(PredictionError::Failed(_)))
        ));
        assert_eq!(outcome.message(), "Error in prediction: model exploded");
    }

    #[test]
    fn test_empty_prediction_is_an_error() {
        let empty: Predict =
            Box::new(|_: &FeatureVector| -> Result<Vec<Label>, PredictionError> { Ok(Vec::new()) });
        let svc = service(identity_transform(), empty);

        let outcome = svc.build_and_predict(&FormInputs::default());
        assert_eq!(
            outcome,
            PredictionOutcome::Failure(PredictionFailure::Prediction(PredictionError::EmptyOutput))
        );
    }

    #[test]
    fn test_first_label_is_used() {
        let many: Predict = Box::new(|_: &FeatureVector| -> Result<Vec<Label>, PredictionError> {
            Ok(vec![Label::Integer(2), Label::Integer(0)])
        });
        let svc = service(identity_transform(), many);

        let outcome = svc.build_and_predict(&FormInputs::default());
        assert_eq!(outcome.label(), Some(&Label::Integer(2)));
    }

    #[test]
    fn test_transform_sees_fixed_column_order() {
        let seen: Transform = Box::new(|record: &InputRecord| -> Result<FeatureVector, PreprocessingError> {
            let names = record.column_names();
            if names != ["Age", "SystolicBP", "DiastolicBP", "BS", "BodyTemp", "HeartRate"] {
                return Err(PreprocessingError::Rejected(format!("{names:?}")));
            }
            Ok(FeatureVector::new(record.values().to_vec()))
        });
        let svc = service(seen, echo_predict(Arc::new(AtomicUsize::new(0))));

        let mut inputs = FormInputs::default();
        inputs.heart_rate = 101;
        inputs.age = 22;
        let outcome = svc.build_and_predict(&inputs);
        assert_eq!(
            outcome.label(),
            Some(&Label::from("[22.0,120.0,80.0,0.0,98.0,101.0]"))
        );
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let calls = Arc::new(AtomicUsize::new(0));
        let svc = service(identity_transform(), echo_predict(calls.clone()));
        let mut inputs = FormInputs::default();
        inputs.bs = 6.8;

        let first = svc.build_and_predict(&inputs);
        let second = svc.build_and_predict(&inputs);
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_bounds_never_panic() {
        let svc = service(identity_transform(), echo_predict(Arc::new(AtomicUsize::new(0))));

        // Every combination of per-field minimum, default and maximum.
        let choices: Vec<[f64; 3]> = FORM_FIELDS
            .iter()
            .map(|f| {
                [
                    f.min.unwrap_or(-1000.0),
                    f.default,
                    f.max.unwrap_or(1000.0),
                ]
            })
            .collect();

        for combo in 0..3usize.pow(6) {
            let mut inputs = FormInputs::default();
            let mut rest = combo;
            for (field, values) in FORM_FIELDS.iter().zip(&choices) {
                inputs.set(field.column, values[rest % 3]);
                rest /= 3;
            }
            let outcome = svc.build_and_predict(&inputs);
            assert!(outcome.is_success(), "{}", outcome.message());
        }
    }

    fn shipped_config() -> AppConfig {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
        AppConfig {
            model_path: root.join("models/model.json"),
            preprocess_path: root.join("models/preprocess.json"),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_shipped_artifacts_predict() {
        let svc = PredictionService::from_config(&shipped_config()).expect("artifacts load");

        let outcome = svc.build_and_predict(&FormInputs::default());
        assert_eq!(outcome.message(), "Prediction: low risk");

        let elevated = FormInputs {
            age: 35,
            systolic_bp: 140,
            diastolic_bp: 90,
            bs: 15.0,
            body_temp: 101,
            heart_rate: 90,
        };
        let outcome = svc.build_and_predict(&elevated);
        assert_eq!(outcome.label(), Some(&Label::from("high risk")));
    }

    #[test]
    fn test_missing_artifact_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig {
            model_path: dir.path().join("absent.json"),
            ..shipped_config()
        };

        let err = PredictionService::from_config(&config).err().expect("load error");
        assert!(matches!(
            err,
            crate::VitalriskError::Artifact(ArtifactError::Io { .. })
        ));
    }

    #[test]
    fn test_width_mismatch_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let model_path = dir.path().join("model.json");
        std::fs::write(
            &model_path,
            r#"{"classes": [0, 1], "coef": [[0.5, -0.5]], "intercept": [0.0]}"#,
        )
        .expect("write model");

        let config = AppConfig {
            model_path,
            ..shipped_config()
        };

        let err = PredictionService::from_config(&config).err().expect("load error");
        assert!(err.to_string().contains("expects 2"), "{err}");
    }
}
