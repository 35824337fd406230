//! Domain layer: Core types for the prediction form.
//!
//! Plain Rust types with no I/O. Records are built per request and never
//! mutated afterwards.

mod field;
mod label;
mod outcome;
mod record;

pub use field::{field_spec, FieldKind, FieldSpec, WidgetKind, FORM_FIELDS};
pub use label::Label;
pub use outcome::{PredictionError, PredictionFailure, PredictionOutcome, PreprocessingError};
pub use record::{Column, FeatureVector, FormInputs, InputRecord};
