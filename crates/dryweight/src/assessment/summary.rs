use serde::{Deserialize, Serialize};

use super::domain::DerivedValues;
use super::model::TendencyOutcome;
use super::score::ScoreResult;
use super::scoring::{CardiacSummary, FluidBand, GnriBand, NriAssessment, SaltBand};

/// Non-fatal data-quality notes attached to a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataWarning {
    /// Post-dialysis weight exceeds pre-dialysis weight.
    NegativeWeightGain { delta_bw_kg: f64 },
    ArrhythmiaConfoundsPeptides,
    SexNotRecorded,
    NutritionScorePartial { components_scored: usize },
    InsufficientModelData { missing: Vec<String> },
    ModelUnavailable { reason: String },
}

impl DataWarning {
    pub fn message(&self) -> String {
        match self {
            Self::NegativeWeightGain { delta_bw_kg } => format!(
                "post-dialysis weight exceeds pre-dialysis weight (ΔBW {delta_bw_kg:.1} kg); salt intake not estimated"
            ),
            Self::ArrhythmiaConfoundsPeptides => {
                "arrhythmia present: natriuretic peptide result is for reference only".to_string()
            }
            Self::SexNotRecorded => {
                "sex not recorded: sex-specific CTR threshold not applied".to_string()
            }
            Self::NutritionScorePartial { components_scored } => format!(
                "NRI-JH computed from {components_scored} of 4 components"
            ),
            Self::InsufficientModelData { missing } => format!(
                "insufficient data for tendency model (missing {})",
                missing.join(", ")
            ),
            Self::ModelUnavailable { reason } => format!("tendency model unavailable: {reason}"),
        }
    }
}

/// Terminal, read-only output of one evaluation.
///
/// Carries no timestamps or identifiers so identical inputs always produce
/// identical summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_ref: Option<String>,
    pub derived: DerivedValues,
    pub fluid_status: ScoreResult<FluidBand>,
    pub cardiac: CardiacSummary,
    pub gnri: ScoreResult<GnriBand>,
    pub nri_jh: NriAssessment,
    pub salt_intake: ScoreResult<SaltBand>,
    pub tendency: TendencyOutcome,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DataWarning>,
}

/// Classifier outputs ready to be merged.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentParts {
    pub patient_ref: Option<String>,
    pub derived: DerivedValues,
    pub fluid_status: ScoreResult<FluidBand>,
    pub cardiac: CardiacSummary,
    pub gnri: ScoreResult<GnriBand>,
    pub nri_jh: NriAssessment,
    pub salt_intake: ScoreResult<SaltBand>,
    pub tendency: TendencyOutcome,
}

/// Pure merge; every `Unevaluated` result is carried through untouched.
pub fn aggregate(parts: AssessmentParts, warnings: Vec<DataWarning>) -> EvaluationSummary {
    let AssessmentParts {
        patient_ref,
        derived,
        fluid_status,
        cardiac,
        gnri,
        nri_jh,
        salt_intake,
        tendency,
    } = parts;

    EvaluationSummary {
        patient_ref,
        derived,
        fluid_status,
        cardiac,
        gnri,
        nri_jh,
        salt_intake,
        tendency,
        warnings,
    }
}
