//! The classifier seam and artifact loading.
//!
//! The model is loaded once at startup and then only read. A missing
//! artifact is fatal: [`load_classifier`] reports it as
//! [`ModelError::NotFound`] before anything else is tried.

use std::path::Path;

use ckd_core::{FeatureVector, Label};
use tracing::info;

use crate::error::ModelError;
use crate::linear::LinearModel;

/// Artifact path used when none is configured.
pub const DEFAULT_MODEL_PATH: &str = "Chronic_kidney_disease.json";

/// A pre-trained binary CKD classifier.
pub trait Classifier: Send + Sync {
    /// Human-readable model name, for logs.
    fn name(&self) -> &str;

    fn predict(&self, features: &FeatureVector) -> Result<Label, ModelError>;
}

/// Load a classifier artifact, choosing the backend by file extension.
///
/// - `.json`: [`LinearModel`]
/// - `.onnx`: ONNX Runtime session (requires the `onnx` feature)
pub fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>, ModelError> {
    if !path.is_file() {
        return Err(ModelError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let (classifier, format): (Box<dyn Classifier>, &str) = match extension.as_deref() {
        Some("json") => (Box::new(LinearModel::load(path)?), "json"),
        #[cfg(feature = "onnx")]
        Some("onnx") => (Box::new(crate::onnx::OnnxClassifier::load(path)?), "onnx"),
        #[cfg(not(feature = "onnx"))]
        Some("onnx") => {
            return Err(ModelError::Load(
                "ONNX models need ckd-ai built with the `onnx` feature".to_string(),
            ));
        }
        _ => return Err(ModelError::UnsupportedFormat(path.to_path_buf())),
    };

    info!(
        path = %path.display(),
        name = classifier.name(),
        format,
        "loaded classifier"
    );
    Ok(classifier)
}
