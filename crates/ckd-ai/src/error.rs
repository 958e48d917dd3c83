use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model file '{}' not found.", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported model format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("feature {index} is '{found}', model expects '{expected}'")]
    FeatureOrderMismatch {
        index: usize,
        expected: &'static str,
        found: String,
    },

    #[error("model takes {found} features, expected {expected}")]
    InputWidth { expected: usize, found: usize },

    #[error("model returned label {0}, expected 0 or 1")]
    InvalidLabel(i64),

    #[error("failed to load model: {0}")]
    Load(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("model parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
