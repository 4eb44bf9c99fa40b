use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by configuration loading, file I/O and shape checks.
///
/// Numeric edge cases (e.g. an all-zero softmax row) are never errors; they
/// are absorbed by the fixed softmax epsilon.
#[derive(Debug, Error)]
pub enum MlpError {
    #[error("{key} is not defined in the configuration")]
    MissingSetting { key: &'static str },

    #[error("invalid setting {key}: {message}")]
    InvalidSetting { key: &'static str, message: String },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("weight file {} holds {found} values, topology needs {expected}", .path.display())]
    WeightCount {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("weight file {}: value #{index} ({token:?}) is not a number", .path.display())]
    WeightParse {
        path: PathBuf,
        index: usize,
        token: String,
    },

    #[error("label {label} at sample {index} is outside [0, {classes})")]
    LabelOutOfRange {
        index: usize,
        label: usize,
        classes: usize,
    },

    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

impl MlpError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MlpError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, MlpError>;
