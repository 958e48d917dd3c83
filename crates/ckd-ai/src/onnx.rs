//! ONNX Runtime backend for classifiers exported from scikit-learn.
//!
//! skl2onnx models take a `[batch, 24]` float tensor and emit the class
//! label as their first output (int64), followed by probabilities.

use std::path::Path;
use std::sync::Mutex;

use ckd_core::{FEATURE_COUNT, FeatureVector, Label};
use ort::session::Session;
use ort::value::{Tensor, ValueType};
use tracing::{debug, info, warn};

use crate::classifier::Classifier;
use crate::error::ModelError;

/// Binary classifier backed by an ONNX Runtime session.
///
/// Running a session needs `&mut`, so it sits behind a mutex to keep
/// [`Classifier::predict`] usable through a shared reference.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    input_name: String,
    name: String,
}

impl OnnxClassifier {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let session = Session::builder()
            .map_err(|e| ModelError::Load(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e| ModelError::Load(e.to_string()))?;

        let input = session
            .inputs()
            .first()
            .ok_or_else(|| ModelError::Load("model declares no inputs".to_string()))?;
        let input_name = input.name().to_string();

        match input_width(input.dtype()) {
            Some(width) if width != FEATURE_COUNT => {
                return Err(ModelError::InputWidth {
                    expected: FEATURE_COUNT,
                    found: width,
                });
            }
            Some(_) => {}
            None => warn!(input = %input_name, "model input width is dynamic or undeclared"),
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx")
            .to_string();

        info!(model = %path.display(), input = %input_name, "loaded ONNX classifier");
        Ok(Self {
            session: Mutex::new(session),
            input_name,
            name,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &FeatureVector) -> Result<Label, ModelError> {
        // skl2onnx declares float32 inputs.
        let input: Vec<f32> = features.as_slice().iter().map(|&x| x as f32).collect();
        let shape = [1i64, FEATURE_COUNT as i64];
        let tensor = Tensor::from_array((shape, input.into_boxed_slice()))
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ModelError::Inference("session lock poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => tensor])
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let (_, labels) = outputs[0]
            .try_extract_tensor::<i64>()
            .map_err(|e| ModelError::Inference(e.to_string()))?;
        let class = *labels
            .first()
            .ok_or_else(|| ModelError::Inference("empty label output".to_string()))?;

        debug!(model = %self.name, class, "onnx prediction");
        Label::from_class(class).ok_or(ModelError::InvalidLabel(class))
    }
}

/// Declared feature width from a `[batch, width]` input, if fixed.
fn input_width(input_type: &ValueType) -> Option<usize> {
    match input_type {
        ValueType::Tensor { shape, .. } => shape
            .last()
            .and_then(|&d| if d > 0 { Some(d as usize) } else { None }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ckd_core::ClinicalRecord;
    use std::path::PathBuf;

    fn model_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("models")
            .join("Chronic_kidney_disease.onnx")
    }

    /// The fixture is an exported model, not checked in.
    fn require_model() -> PathBuf {
        let path = model_path();
        if !path.exists() {
            panic!(
                "Model not found at {}. Export the trained classifier with skl2onnx:\n  \
                 convert_sklearn(model, initial_types=[(\"input\", FloatTensorType([None, 24]))])",
                path.display()
            );
        }
        path
    }

    #[test]
    #[ignore = "needs models/Chronic_kidney_disease.onnx"]
    fn load_and_predict() {
        let path = require_model();
        let classifier = OnnxClassifier::load(&path).unwrap();
        assert_eq!(classifier.name(), "Chronic_kidney_disease");

        let features = FeatureVector::encode(&ClinicalRecord::default());
        let label = classifier.predict(&features).unwrap();
        assert!(matches!(label, Label::Ckd | Label::NotCkd));
    }

    #[test]
    #[ignore = "needs models/Chronic_kidney_disease.onnx"]
    fn prediction_is_repeatable() {
        let path = require_model();
        let classifier = OnnxClassifier::load(&path).unwrap();

        let features = FeatureVector::encode(&ClinicalRecord::default());
        assert_eq!(
            classifier.predict(&features).unwrap(),
            classifier.predict(&features).unwrap()
        );
    }

    #[test]
    fn garbage_file_fails_to_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.onnx");
        std::fs::write(&path, b"not an onnx graph").unwrap();

        assert!(matches!(
            OnnxClassifier::load(&path),
            Err(ModelError::Load(_))
        ));
    }
}
