//! Classifier output and the rendered result of one submission.

use serde::Serialize;

use crate::advice::advise;
use crate::record::ClinicalRecord;

/// Binary screening label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Label {
    #[serde(rename = "CKD")]
    Ckd,
    #[serde(rename = "Not CKD")]
    NotCkd,
}

impl Label {
    /// Map a raw model class (1 = CKD, 0 = not CKD).
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            1 => Some(Self::Ckd),
            0 => Some(Self::NotCkd),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ckd => "CKD",
            Self::NotCkd => "Not CKD",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label plus advice for one submission. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    pub label: Label,
    /// Empty when the label is [`Label::Ckd`].
    pub advice: Vec<String>,
}

impl PredictionResult {
    /// Build the result, generating advice from the raw record values.
    pub fn new(record: &ClinicalRecord, label: Label) -> Self {
        Self {
            label,
            advice: advise(record, label)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_from_class() {
        assert_eq!(Label::from_class(1), Some(Label::Ckd));
        assert_eq!(Label::from_class(0), Some(Label::NotCkd));
        assert_eq!(Label::from_class(2), None);
        assert_eq!(Label::from_class(-1), None);
    }

    #[test]
    fn label_text() {
        assert_eq!(Label::Ckd.to_string(), "CKD");
        assert_eq!(Label::NotCkd.to_string(), "Not CKD");
        assert_eq!(serde_json::to_string(&Label::NotCkd).unwrap(), "\"Not CKD\"");
    }

    #[test]
    fn ckd_result_has_no_advice() {
        let result = PredictionResult::new(&ClinicalRecord::default(), Label::Ckd);
        assert!(result.advice.is_empty());
    }

    #[test]
    fn not_ckd_result_carries_advice() {
        let result = PredictionResult::new(&ClinicalRecord::default(), Label::NotCkd);
        assert!(!result.advice.is_empty());
    }
}
