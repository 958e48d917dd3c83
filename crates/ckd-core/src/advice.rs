//! Rule-based recommendations shown alongside a "Not CKD" prediction.
//!
//! Rules read the raw record values, never the encoded vector. Each rule is
//! independent and the output order is fixed.

use crate::prediction::Label;
use crate::record::{ClinicalRecord, YesNo};

pub const AGE_CHECKUP: &str =
    "Schedule regular kidney function check-ups, as the risk of kidney disease increases with age.";
pub const AGE_MONITORING: &str =
    "Monitor your blood pressure and blood sugar levels at least once a year.";
pub const BLOOD_PRESSURE: &str =
    "Keep your blood pressure under control through diet, exercise, and prescribed medication.";
pub const GLUCOSE: &str =
    "Control your blood glucose with a balanced diet, regular monitoring, and medical guidance.";
pub const HYPERTENSION: &str =
    "Follow your doctor's treatment plan for hypertension and check your blood pressure regularly.";
pub const DIABETES: &str =
    "Keep your diabetes well managed to protect your kidneys from further strain.";
pub const HEART_HEALTH: &str =
    "Look after your heart health with regular cardiology check-ups and a heart-healthy lifestyle.";
pub const EDEMA: &str =
    "Monitor swelling in your legs and feet, and consult your doctor if it persists or worsens.";
pub const ANEMIA: &str =
    "Discuss your anemia with your doctor; iron-rich foods or treatment may be needed.";

/// Always appended: diet, hydration, exercise, smoking and alcohol.
pub const GENERAL: [&str; 4] = [
    "Eat a balanced diet that is low in salt, processed foods, and excess protein.",
    "Stay well hydrated by drinking enough water throughout the day.",
    "Exercise regularly and maintain a healthy body weight.",
    "Avoid smoking and limit alcohol consumption.",
];

const AGE_LIMIT: u32 = 60;
const BLOOD_PRESSURE_LIMIT: u32 = 140;
const GLUCOSE_LIMIT: u32 = 140;

/// Advice for a record under the given label. Empty for [`Label::Ckd`].
pub fn advise(record: &ClinicalRecord, label: Label) -> Vec<&'static str> {
    if label == Label::Ckd {
        return Vec::new();
    }

    let mut advice = Vec::new();
    if record.age > AGE_LIMIT {
        advice.push(AGE_CHECKUP);
        advice.push(AGE_MONITORING);
    }
    if record.blood_pressure > BLOOD_PRESSURE_LIMIT {
        advice.push(BLOOD_PRESSURE);
    }
    if record.blood_glucose_random > GLUCOSE_LIMIT {
        advice.push(GLUCOSE);
    }

    let flags = [
        (record.hypertension, HYPERTENSION),
        (record.diabetes_mellitus, DIABETES),
        (record.coronary_artery_disease, HEART_HEALTH),
        (record.pedal_edema, EDEMA),
        (record.anemia, ANEMIA),
    ];
    advice.extend(
        flags
            .into_iter()
            .filter(|(answer, _)| *answer == YesNo::Yes)
            .map(|(_, text)| text),
    );

    advice.extend(GENERAL);
    advice
}
