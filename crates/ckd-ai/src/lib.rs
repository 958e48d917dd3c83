//! Classifier seam for CKD screening: the `Classifier` trait and model
//! artifact loading (JSON logistic models, ONNX Runtime behind `onnx`).

mod classifier;
mod error;
mod linear;

#[cfg(feature = "onnx")]
mod onnx;

pub use classifier::{Classifier, DEFAULT_MODEL_PATH, load_classifier};
pub use error::ModelError;
pub use linear::LinearModel;

#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
