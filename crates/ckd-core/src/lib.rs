//! Core types for CKD screening: the input form, typed clinical records,
//! the fixed-order feature encoding, and the advice rules.

pub mod advice;
pub mod features;
pub mod form;
pub mod prediction;
pub mod record;

pub use advice::advise;
pub use features::{FEATURE_COUNT, FEATURE_ORDER, FeatureVector};
pub use form::{Control, ControlKind, Form, FormError, RawValue, Submission};
pub use prediction::{Label, PredictionResult};
pub use record::{
    Albumin, Appetite, ClinicalRecord, Normality, Presence, SpecificGravity, Sugar, UnknownChoice,
    YesNo,
};
