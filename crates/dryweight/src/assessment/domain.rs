use serde::{Deserialize, Serialize};

/// Default BMI used to derive the ideal body weight when none is entered.
pub const DEFAULT_TARGET_BMI: f64 = 22.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Record handed over by the collecting layer (form, JSON body, CSV row).
///
/// Every numeric field is optional. A `0`, a blank cell, or a non-finite
/// number is never a clinical reading here and is normalised to "not provided".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPatientInput {
    pub patient_ref: Option<String>,
    pub age: Option<f64>,
    pub sex: Option<Sex>,
    pub height_cm: Option<f64>,

    pub pre_weight_kg: Option<f64>,
    pub post_weight_kg: Option<f64>,
    pub dry_weight_kg: Option<f64>,
    pub target_bmi: Option<f64>,
    /// Directly entered ideal weight; wins over the height/target-BMI derivation.
    pub ideal_weight_kg: Option<f64>,

    pub pre_total_protein: Option<f64>,
    pub post_total_protein: Option<f64>,
    pub pre_hematocrit: Option<f64>,
    pub post_hematocrit: Option<f64>,
    pub pre_sodium: Option<f64>,
    pub post_sodium: Option<f64>,
    /// Directly entered Kr; wins over the hematocrit derivation.
    pub kr: Option<f64>,
    /// Directly entered PWI; wins over the total-protein derivation.
    pub pwi: Option<f64>,
    pub systolic_bp: Option<f64>,

    pub ctr_current_pct: Option<f64>,
    pub ctr_previous_pct: Option<f64>,
    pub arrhythmia: Option<bool>,
    pub hanp: Option<f64>,
    pub bnp: Option<f64>,
    pub nt_probnp: Option<f64>,

    pub albumin: Option<f64>,
    pub creatinine: Option<f64>,
    pub total_cholesterol: Option<f64>,
}

/// Normalised, immutable input for a single evaluation.
///
/// `None` always means "not provided"; a `Some` value has already passed the
/// sentinel filter and is scored as-is, even when clinically implausible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientInput {
    pub patient_ref: Option<String>,
    pub age: Option<f64>,
    pub sex: Option<Sex>,
    pub height_cm: Option<f64>,

    pub pre_weight_kg: Option<f64>,
    pub post_weight_kg: Option<f64>,
    pub dry_weight_kg: Option<f64>,
    pub target_bmi: f64,
    pub entered_ideal_weight_kg: Option<f64>,

    pub pre_total_protein: Option<f64>,
    pub post_total_protein: Option<f64>,
    pub pre_hematocrit: Option<f64>,
    pub post_hematocrit: Option<f64>,
    pub pre_sodium: Option<f64>,
    pub post_sodium: Option<f64>,
    pub entered_kr: Option<f64>,
    pub entered_pwi: Option<f64>,
    pub systolic_bp: Option<f64>,

    pub ctr_current_pct: Option<f64>,
    pub ctr_previous_pct: Option<f64>,
    pub arrhythmia: bool,
    pub hanp: Option<f64>,
    pub bnp: Option<f64>,
    pub nt_probnp: Option<f64>,

    pub albumin: Option<f64>,
    pub creatinine: Option<f64>,
    pub total_cholesterol: Option<f64>,
}

/// Quantities computed from [`PatientInput`]; absent whenever a dependency is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedValues {
    /// Interdialytic weight gain, pre minus post. Negative values pass through.
    pub delta_bw_kg: Option<f64>,
    pub ideal_weight_kg: Option<f64>,
    pub kr: Option<f64>,
    pub pwi: Option<f64>,
    pub bmi: Option<f64>,
}
