//! Per-field command-line flags, one per form control.

use ckd_core::Submission;
use clap::Args;

/// Flags for individual form fields. Unset flags fall back to the input
/// file, then to the control defaults.
#[derive(Debug, Default, Args)]
#[command(next_help_heading = "Form fields")]
pub struct FieldArgs {
    #[arg(long, value_name = "YEARS")]
    pub age: Option<f64>,
    #[arg(long, value_name = "MM_HG")]
    pub blood_pressure: Option<f64>,
    /// 1.010, 1.020 or 1.030
    #[arg(long, value_name = "SG")]
    pub specific_gravity: Option<String>,
    /// 0 to 4
    #[arg(long, value_name = "GRADE")]
    pub albumin: Option<String>,
    /// 0 to 3
    #[arg(long, value_name = "GRADE")]
    pub sugar: Option<String>,
    /// normal or abnormal
    #[arg(long)]
    pub red_blood_cells: Option<String>,
    /// normal or abnormal
    #[arg(long)]
    pub pus_cell: Option<String>,
    /// notpresent or present
    #[arg(long)]
    pub pus_cell_clumps: Option<String>,
    /// notpresent or present
    #[arg(long)]
    pub bacteria: Option<String>,
    #[arg(long, value_name = "MG_DL")]
    pub blood_glucose_random: Option<f64>,
    #[arg(long, value_name = "MG_DL")]
    pub blood_urea: Option<f64>,
    #[arg(long, value_name = "MG_DL")]
    pub serum_creatinine: Option<f64>,
    #[arg(long, value_name = "MEQ_L")]
    pub sodium: Option<f64>,
    #[arg(long, value_name = "MEQ_L")]
    pub potassium: Option<f64>,
    #[arg(long, value_name = "G_DL")]
    pub hemoglobin: Option<f64>,
    #[arg(long)]
    pub packed_cell_volume: Option<f64>,
    #[arg(long)]
    pub white_blood_cell_count: Option<f64>,
    #[arg(long)]
    pub red_blood_cell_count: Option<f64>,
    /// yes or no
    #[arg(long)]
    pub hypertension: Option<String>,
    /// yes or no
    #[arg(long)]
    pub diabetes_mellitus: Option<String>,
    /// yes or no
    #[arg(long)]
    pub coronary_artery_disease: Option<String>,
    /// good or poor
    #[arg(long)]
    pub appetite: Option<String>,
    /// yes or no
    #[arg(long)]
    pub pedal_edema: Option<String>,
    /// yes or no
    #[arg(long)]
    pub anemia: Option<String>,
}

impl FieldArgs {
    /// The fields that were given on the command line.
    pub fn submission(&self) -> Submission {
        let mut submission = Submission::new();

        let numbers = [
            ("age", self.age),
            ("blood_pressure", self.blood_pressure),
            ("blood_glucose_random", self.blood_glucose_random),
            ("blood_urea", self.blood_urea),
            ("serum_creatinine", self.serum_creatinine),
            ("sodium", self.sodium),
            ("potassium", self.potassium),
            ("hemoglobin", self.hemoglobin),
            ("packed_cell_volume", self.packed_cell_volume),
            ("white_blood_cell_count", self.white_blood_cell_count),
            ("red_blood_cell_count", self.red_blood_cell_count),
        ];
        for (name, value) in numbers {
            if let Some(value) = value {
                submission.insert(name, value);
            }
        }

        let choices = [
            ("specific_gravity", &self.specific_gravity),
            ("albumin", &self.albumin),
            ("sugar", &self.sugar),
            ("red_blood_cells", &self.red_blood_cells),
            ("pus_cell", &self.pus_cell),
            ("pus_cell_clumps", &self.pus_cell_clumps),
            ("bacteria", &self.bacteria),
            ("hypertension", &self.hypertension),
            ("diabetes_mellitus", &self.diabetes_mellitus),
            ("coronary_artery_disease", &self.coronary_artery_disease),
            ("appetite", &self.appetite),
            ("pedal_edema", &self.pedal_edema),
            ("anemia", &self.anemia),
        ];
        for (name, value) in choices {
            if let Some(value) = value {
                submission.insert(name, value.as_str());
            }
        }

        submission
    }
}
