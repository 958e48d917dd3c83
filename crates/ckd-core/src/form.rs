//! Declarative screening form and submission validation.
//!
//! [`Form::ckd`] lists the 24 controls in feature order. A renderer draws the
//! controls and posts back a [`Submission`]; [`Form::collect`] checks it the
//! way the bounded controls would and builds a [`ClinicalRecord`].

use std::collections::BTreeMap;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::{
    Albumin, Appetite, ClinicalRecord, Normality, Presence, SpecificGravity, Sugar, YesNo,
};

#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("{field}: {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field}: {value} is not a whole number")]
    NotInteger { field: String, value: f64 },

    #[error("{field}: '{value}' is not one of {}", .options.join(", "))]
    InvalidChoice {
        field: String,
        value: String,
        options: Vec<&'static str>,
    },

    #[error("{field}: expected a {expected}")]
    WrongKind {
        field: String,
        expected: &'static str,
    },

    #[error("reading submission: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed submission: {0}")]
    Json(#[from] serde_json::Error),
}

/// A raw control value: a number, or one option text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Choice(String),
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Choice(s) => f.write_str(s),
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for RawValue {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Choice(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Choice(s)
    }
}

/// Field name to raw value, as posted by one form submission.
///
/// Serializes as a flat JSON object: `{"age": 65, "hypertension": "yes"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission(BTreeMap<String, RawValue>);

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of field → value.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FormError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RawValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style [`Submission::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Overlay `other` on top of `self`; values in `other` win.
    pub fn merge(&mut self, other: Submission) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlKind {
    Number {
        min: f64,
        max: f64,
        default: f64,
        step: f64,
        integer: bool,
    },
    Select {
        options: &'static [&'static str],
        default: &'static str,
    },
}

/// One labeled input control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: ControlKind,
}

impl Control {
    fn integer(name: &'static str, label: &'static str, max: u32, default: u32) -> Self {
        Self {
            name,
            label,
            kind: ControlKind::Number {
                min: 0.0,
                max: max.into(),
                default: default.into(),
                step: 1.0,
                integer: true,
            },
        }
    }

    fn decimal(name: &'static str, label: &'static str, max: f64, default: f64) -> Self {
        Self {
            name,
            label,
            kind: ControlKind::Number {
                min: 0.0,
                max,
                default,
                step: 0.1,
                integer: false,
            },
        }
    }

    /// Select control defaulting to its first option.
    fn select(name: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            name,
            label,
            kind: ControlKind::Select {
                options,
                default: options[0],
            },
        }
    }

    /// The value an untouched control submits.
    pub fn default_value(&self) -> RawValue {
        match &self.kind {
            ControlKind::Number { default, .. } => RawValue::Number(*default),
            ControlKind::Select { default, .. } => RawValue::Choice(default.to_string()),
        }
    }

    /// Check a value against the control's bounds or options.
    pub fn validate(&self, value: &RawValue) -> Result<(), FormError> {
        match (&self.kind, value) {
            (
                ControlKind::Number {
                    min, max, integer, ..
                },
                RawValue::Number(n),
            ) => {
                let n = *n;
                if !n.is_finite() || n < *min || n > *max {
                    return Err(FormError::OutOfRange {
                        field: self.name.to_string(),
                        value: n,
                        min: *min,
                        max: *max,
                    });
                }
                if *integer && n.fract() != 0.0 {
                    return Err(FormError::NotInteger {
                        field: self.name.to_string(),
                        value: n,
                    });
                }
                Ok(())
            }
            (ControlKind::Select { options, .. }, RawValue::Choice(s)) => {
                if options.contains(&s.as_str()) {
                    Ok(())
                } else {
                    Err(FormError::InvalidChoice {
                        field: self.name.to_string(),
                        value: s.clone(),
                        options: options.to_vec(),
                    })
                }
            }
            (ControlKind::Number { .. }, RawValue::Choice(_)) => Err(FormError::WrongKind {
                field: self.name.to_string(),
                expected: "number",
            }),
            (ControlKind::Select { .. }, RawValue::Number(_)) => Err(FormError::WrongKind {
                field: self.name.to_string(),
                expected: "choice",
            }),
        }
    }
}

/// The screening form: a title and its controls in feature order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Form {
    pub title: &'static str,
    pub controls: Vec<Control>,
}

impl Form {
    pub fn ckd() -> Self {
        Self {
            title: "Chronic Kidney Disease Prediction",
            controls: vec![
                Control::integer("age", "Age", 150, 50),
                Control::integer("blood_pressure", "Blood Pressure", 300, 80),
                Control::select("specific_gravity", "Specific Gravity", SpecificGravity::OPTIONS),
                Control::select("albumin", "Albumin", Albumin::OPTIONS),
                Control::select("sugar", "Sugar", Sugar::OPTIONS),
                Control::select("red_blood_cells", "Red Blood Cells", Normality::OPTIONS),
                Control::select("pus_cell", "Pus Cell", Normality::OPTIONS),
                Control::select("pus_cell_clumps", "Pus Cell Clumps", Presence::OPTIONS),
                Control::select("bacteria", "Bacteria", Presence::OPTIONS),
                Control::integer("blood_glucose_random", "Blood Glucose Random", 500, 121),
                Control::integer("blood_urea", "Blood Urea", 500, 36),
                Control::decimal("serum_creatinine", "Serum Creatinine", 10.0, 1.2),
                Control::integer("sodium", "Sodium", 200, 140),
                Control::decimal("potassium", "Potassium", 20.0, 4.0),
                Control::decimal("hemoglobin", "Hemoglobin", 20.0, 15.4),
                Control::integer("packed_cell_volume", "Packed Cell Volume", 100, 44),
                Control::integer("white_blood_cell_count", "White Blood Cell Count", 100_000, 7800),
                Control::decimal("red_blood_cell_count", "Red Blood Cell Count", 10.0, 5.2),
                Control::select("hypertension", "Hypertension", YesNo::OPTIONS),
                Control::select("diabetes_mellitus", "Diabetes Mellitus", YesNo::OPTIONS),
                Control::select("coronary_artery_disease", "Coronary Artery Disease", YesNo::OPTIONS),
                Control::select("appetite", "Appetite", Appetite::OPTIONS),
                Control::select("pedal_edema", "Pedal Edema", YesNo::OPTIONS),
                Control::select("anemia", "Anemia", YesNo::OPTIONS),
            ],
        }
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.name == name)
    }

    /// Validate a submission and build the record it describes.
    ///
    /// Missing fields take their control's default.
    pub fn collect(&self, submission: &Submission) -> Result<ClinicalRecord, FormError> {
        if let Some((name, _)) = submission.iter().find(|(name, _)| self.control(name).is_none()) {
            return Err(FormError::UnknownField(name.to_string()));
        }

        let values = Values {
            form: self,
            submission,
        };
        Ok(ClinicalRecord {
            age: values.integer("age")?,
            blood_pressure: values.integer("blood_pressure")?,
            specific_gravity: values.choice("specific_gravity")?,
            albumin: values.choice("albumin")?,
            sugar: values.choice("sugar")?,
            red_blood_cells: values.choice("red_blood_cells")?,
            pus_cell: values.choice("pus_cell")?,
            pus_cell_clumps: values.choice("pus_cell_clumps")?,
            bacteria: values.choice("bacteria")?,
            blood_glucose_random: values.integer("blood_glucose_random")?,
            blood_urea: values.integer("blood_urea")?,
            serum_creatinine: values.number("serum_creatinine")?,
            sodium: values.integer("sodium")?,
            potassium: values.number("potassium")?,
            hemoglobin: values.number("hemoglobin")?,
            packed_cell_volume: values.integer("packed_cell_volume")?,
            white_blood_cell_count: values.integer("white_blood_cell_count")?,
            red_blood_cell_count: values.number("red_blood_cell_count")?,
            hypertension: values.choice("hypertension")?,
            diabetes_mellitus: values.choice("diabetes_mellitus")?,
            coronary_artery_disease: values.choice("coronary_artery_disease")?,
            appetite: values.choice("appetite")?,
            pedal_edema: values.choice("pedal_edema")?,
            anemia: values.choice("anemia")?,
        })
    }
}

/// Validated lookups into one submission.
struct Values<'a> {
    form: &'a Form,
    submission: &'a Submission,
}

impl Values<'_> {
    fn resolve(&self, name: &str) -> Result<RawValue, FormError> {
        let control = self
            .form
            .control(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        let value = match self.submission.get(name) {
            Some(value) => value.clone(),
            None => control.default_value(),
        };
        control.validate(&value)?;
        Ok(value)
    }

    fn number(&self, name: &str) -> Result<f64, FormError> {
        match self.resolve(name)? {
            RawValue::Number(n) => Ok(n),
            RawValue::Choice(_) => Err(FormError::WrongKind {
                field: name.to_string(),
                expected: "number",
            }),
        }
    }

    /// Bounds and integrality are already checked, so the cast is exact.
    fn integer(&self, name: &str) -> Result<u32, FormError> {
        Ok(self.number(name)? as u32)
    }

    fn choice<T: FromStr>(&self, name: &str) -> Result<T, FormError> {
        match self.resolve(name)? {
            RawValue::Choice(s) => s.parse().map_err(|_| FormError::InvalidChoice {
                field: name.to_string(),
                options: self.form.control(name).map(options_of).unwrap_or_default(),
                value: s,
            }),
            RawValue::Number(_) => Err(FormError::WrongKind {
                field: name.to_string(),
                expected: "choice",
            }),
        }
    }
}

fn options_of(control: &Control) -> Vec<&'static str> {
    match &control.kind {
        ControlKind::Select { options, .. } => options.to_vec(),
        ControlKind::Number { .. } => Vec::new(),
    }
}
