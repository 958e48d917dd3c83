//! Typed clinical record for one form submission.
//!
//! Every enumerated control has its own enum whose canonical string form is
//! exactly the option text shown on the form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string that is not one of an enum's option texts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown choice '{0}'")]
pub struct UnknownChoice(pub String);

macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            /// Option texts in form order. The first one is the default.
            pub const OPTIONS: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownChoice(s.to_string())),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum! {
    /// Urine specific gravity.
    SpecificGravity {
        Sg1010 => "1.010",
        Sg1020 => "1.020",
        Sg1030 => "1.030",
    }
}

choice_enum! {
    /// Urine albumin grade.
    Albumin {
        Grade0 => "0",
        Grade1 => "1",
        Grade2 => "2",
        Grade3 => "3",
        Grade4 => "4",
    }
}

choice_enum! {
    /// Urine sugar grade.
    Sugar {
        Grade0 => "0",
        Grade1 => "1",
        Grade2 => "2",
        Grade3 => "3",
    }
}

choice_enum! {
    Normality {
        Normal => "normal",
        Abnormal => "abnormal",
    }
}

choice_enum! {
    Presence {
        NotPresent => "notpresent",
        Present => "present",
    }
}

choice_enum! {
    /// The order matches the form, which lists "yes" first.
    YesNo {
        Yes => "yes",
        No => "no",
    }
}

choice_enum! {
    Appetite {
        Good => "good",
        Poor => "poor",
    }
}

impl SpecificGravity {
    /// Numeric value of the option text.
    pub fn level(&self) -> f64 {
        match self {
            Self::Sg1010 => 1.010,
            Self::Sg1020 => 1.020,
            Self::Sg1030 => 1.030,
        }
    }
}

impl Albumin {
    /// Numeric value of the option text.
    pub fn level(&self) -> f64 {
        match self {
            Self::Grade0 => 0.0,
            Self::Grade1 => 1.0,
            Self::Grade2 => 2.0,
            Self::Grade3 => 3.0,
            Self::Grade4 => 4.0,
        }
    }
}

impl Sugar {
    /// Numeric value of the option text.
    pub fn level(&self) -> f64 {
        match self {
            Self::Grade0 => 0.0,
            Self::Grade1 => 1.0,
            Self::Grade2 => 2.0,
            Self::Grade3 => 3.0,
        }
    }
}

/// One submission of the screening form.
///
/// Field order follows the feature order the classifier was trained on;
/// see [`crate::FEATURE_ORDER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecord {
    /// Years.
    pub age: u32,
    /// Diastolic, mm/Hg.
    pub blood_pressure: u32,
    pub specific_gravity: SpecificGravity,
    pub albumin: Albumin,
    pub sugar: Sugar,
    pub red_blood_cells: Normality,
    pub pus_cell: Normality,
    pub pus_cell_clumps: Presence,
    pub bacteria: Presence,
    /// mg/dL.
    pub blood_glucose_random: u32,
    /// mg/dL.
    pub blood_urea: u32,
    /// mg/dL.
    pub serum_creatinine: f64,
    /// mEq/L.
    pub sodium: u32,
    /// mEq/L.
    pub potassium: f64,
    /// g/dL.
    pub hemoglobin: f64,
    pub packed_cell_volume: u32,
    /// cells/cumm.
    pub white_blood_cell_count: u32,
    /// millions/cmm.
    pub red_blood_cell_count: f64,
    pub hypertension: YesNo,
    pub diabetes_mellitus: YesNo,
    pub coronary_artery_disease: YesNo,
    pub appetite: Appetite,
    pub pedal_edema: YesNo,
    pub anemia: YesNo,
}

impl Default for ClinicalRecord {
    /// The values an untouched form submits.
    fn default() -> Self {
        Self {
            age: 50,
            blood_pressure: 80,
            specific_gravity: SpecificGravity::Sg1010,
            albumin: Albumin::Grade0,
            sugar: Sugar::Grade0,
            red_blood_cells: Normality::Normal,
            pus_cell: Normality::Normal,
            pus_cell_clumps: Presence::NotPresent,
            bacteria: Presence::NotPresent,
            blood_glucose_random: 121,
            blood_urea: 36,
            serum_creatinine: 1.2,
            sodium: 140,
            potassium: 4.0,
            hemoglobin: 15.4,
            packed_cell_volume: 44,
            white_blood_cell_count: 7800,
            red_blood_cell_count: 5.2,
            hypertension: YesNo::Yes,
            diabetes_mellitus: YesNo::Yes,
            coronary_artery_disease: YesNo::Yes,
            appetite: Appetite::Good,
            pedal_edema: YesNo::Yes,
            anemia: YesNo::Yes,
        }
    }
}
