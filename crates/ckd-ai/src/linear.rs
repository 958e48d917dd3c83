//! Logistic-regression model stored as JSON.
//!
//! The artifact names its input columns, so the training-order contract
//! with [`FEATURE_ORDER`] is checked when the model is loaded rather than
//! trusted.

use std::path::Path;

use ckd_core::{FEATURE_COUNT, FEATURE_ORDER, FeatureVector, Label};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::Classifier;
use crate::error::ModelError;

fn default_threshold() -> f64 {
    0.5
}

/// `sigmoid(w·x + b) >= threshold` predicts CKD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub name: String,
    /// Column names in the order the model was trained on.
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LinearModel {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate an artifact.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(text)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.feature_names.len() != FEATURE_COUNT {
            return Err(ModelError::InputWidth {
                expected: FEATURE_COUNT,
                found: self.feature_names.len(),
            });
        }
        if let Some((index, (expected, found))) = FEATURE_ORDER
            .iter()
            .zip(&self.feature_names)
            .enumerate()
            .find(|(_, (expected, found))| **expected != found.as_str())
        {
            return Err(ModelError::FeatureOrderMismatch {
                index,
                expected: *expected,
                found: found.clone(),
            });
        }
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::InputWidth {
                expected: FEATURE_COUNT,
                found: self.coefficients.len(),
            });
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ModelError::Load(format!(
                "threshold {} is not a probability",
                self.threshold
            )));
        }
        Ok(())
    }

    /// `w·x + b`.
    pub fn logit(&self, features: &FeatureVector) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.as_slice())
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }

    /// Probability of CKD, or an error if the logit overflows.
    pub fn probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let z = self.logit(features);
        if !z.is_finite() {
            return Err(ModelError::Inference(format!(
                "model '{}' produced a non-finite logit ({z})",
                self.name
            )));
        }
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

impl Classifier for LinearModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &FeatureVector) -> Result<Label, ModelError> {
        let p = self.probability(features)?;
        let class = i64::from(p >= self.threshold);
        debug!(model = %self.name, probability = p, class, "linear prediction");
        Label::from_class(class).ok_or(ModelError::InvalidLabel(class))
    }
}
