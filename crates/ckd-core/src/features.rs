//! Fixed-order feature encoding consumed by the classifier.
//!
//! The order of [`FEATURE_ORDER`] is a compatibility contract with the model
//! artifact: it must match the column order the model was trained on.

use serde::Serialize;
use tracing::debug;

use crate::record::ClinicalRecord;

pub const FEATURE_COUNT: usize = 24;

/// Feature names in serialization order.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "age",
    "blood_pressure",
    "specific_gravity",
    "albumin",
    "sugar",
    "red_blood_cells",
    "pus_cell",
    "pus_cell_clumps",
    "bacteria",
    "blood_glucose_random",
    "blood_urea",
    "serum_creatinine",
    "sodium",
    "potassium",
    "hemoglobin",
    "packed_cell_volume",
    "white_blood_cell_count",
    "red_blood_cell_count",
    "hypertension",
    "diabetes_mellitus",
    "coronary_artery_disease",
    "appetite",
    "pedal_edema",
    "anemia",
];

/// Encoded feature vector, one `f64` per entry of [`FEATURE_ORDER`].
///
/// Values keep the precision they were entered with; backends that consume
/// `f32` narrow at their own boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Encode a record.
    ///
    /// Numeric fields pass through as floats. Specific gravity, albumin and
    /// sugar take the numeric value of their option text. Every other
    /// categorical field goes through [`encode_binary`], including the ones
    /// whose options are not "yes"/"no": red blood cells, pus cell, pus cell
    /// clumps, bacteria and appetite always encode to 0. The model was trained
    /// against this encoding.
    pub fn encode(record: &ClinicalRecord) -> Self {
        let values = [
            f64::from(record.age),
            f64::from(record.blood_pressure),
            record.specific_gravity.level(),
            record.albumin.level(),
            record.sugar.level(),
            encode_binary(record.red_blood_cells.as_str()),
            encode_binary(record.pus_cell.as_str()),
            encode_binary(record.pus_cell_clumps.as_str()),
            encode_binary(record.bacteria.as_str()),
            f64::from(record.blood_glucose_random),
            f64::from(record.blood_urea),
            record.serum_creatinine,
            f64::from(record.sodium),
            record.potassium,
            record.hemoglobin,
            f64::from(record.packed_cell_volume),
            f64::from(record.white_blood_cell_count),
            record.red_blood_cell_count,
            encode_binary(record.hypertension.as_str()),
            encode_binary(record.diabetes_mellitus.as_str()),
            encode_binary(record.coronary_artery_disease.as_str()),
            encode_binary(record.appetite.as_str()),
            encode_binary(record.pedal_edema.as_str()),
            encode_binary(record.anemia.as_str()),
        ];
        let vector = Self(values);
        debug!(features = ?vector.named().collect::<Vec<_>>(), "encoded feature vector");
        vector
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value of a named feature.
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_ORDER
            .iter()
            .position(|&n| n == name)
            .map(|i| self.0[i])
    }

    /// `(name, value)` pairs in feature order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_ORDER.iter().copied().zip(self.0.iter().copied())
    }
}

/// 1.0 iff the raw value is exactly `"yes"`.
pub fn encode_binary(value: &str) -> f64 {
    if value == "yes" { 1.0 } else { 0.0 }
}
