//! Prediction label returned by a classifier.

use serde::{Deserialize, Serialize};

/// Class label or risk score produced by the model.
///
/// Rendered as text only; the form handler never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Integer-coded class
    Integer(i64),
    /// Numeric score
    Score(f64),
    /// Named class, e.g. "high risk"
    Class(String),
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Score(v) => write!(f, "{v}"),
            Self::Class(v) => f.write_str(v),
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::Class(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self::Class(value)
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Label {
    fn from(value: f64) -> Self {
        Self::Score(value)
    }
}
