//! Adapters layer: Concrete implementations of ports.
//!
//! - `scaler`: standard-scaler preprocessing transform loaded from JSON
//! - `linear`: linear classifier loaded from JSON
//! - `sanitize`: measurement-value filtering for logs

pub mod linear;
pub mod sanitize;
pub mod scaler;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

pub use linear::LinearModelAdapter;
pub use scaler::StandardScalerAdapter;

/// Error type for loading model artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Failed to read artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid artifact: {0}")]
    Invalid(String),
}

/// Read and deserialize a JSON artifact.
pub(crate) fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
