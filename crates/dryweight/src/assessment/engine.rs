use tracing::debug;

use super::domain::{DerivedValues, PatientInput, RawPatientInput};
use super::model::{assess_tendency, ModelFeatures, ModelSlot, TendencyOutcome};
use super::normalizer::normalize;
use super::scoring::{
    cardiac, fluid, nutrition, salt, CardiacInputs, NutritionInputs, ScoringConfig,
};
use super::summary::{aggregate, AssessmentParts, DataWarning, EvaluationSummary};

/// Stateless assessor applying one scoring configuration to patient inputs.
#[derive(Debug, Clone, Default)]
pub struct DryWeightAssessor {
    config: ScoringConfig,
}

impl DryWeightAssessor {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn evaluate_raw(&self, raw: &RawPatientInput, model: &ModelSlot) -> EvaluationSummary {
        let (input, derived) = normalize(raw);
        self.evaluate(&input, &derived, model)
    }

    pub fn evaluate(
        &self,
        input: &PatientInput,
        derived: &DerivedValues,
        model: &ModelSlot,
    ) -> EvaluationSummary {
        let fluid_status = fluid::classify(
            derived.pwi,
            derived.kr,
            input.systolic_bp,
            &self.config.fluid,
        );

        let cardiac = cardiac::evaluate(&CardiacInputs::from_patient(input), &self.config.cardiac);

        let (gnri, nri_jh) = nutrition::evaluate(
            &NutritionInputs {
                albumin: input.albumin,
                post_weight_kg: input.post_weight_kg,
                ideal_weight_kg: derived.ideal_weight_kg,
                creatinine: input.creatinine,
                total_cholesterol: input.total_cholesterol,
                bmi: derived.bmi,
            },
            &self.config.nutrition,
        );

        let salt_intake = salt::estimate(derived.delta_bw_kg, &self.config.salt);

        let tendency = assess_tendency(model, ModelFeatures::collect(input, derived, &gnri));

        let parts = AssessmentParts {
            patient_ref: input.patient_ref.clone(),
            derived: *derived,
            fluid_status,
            cardiac,
            gnri,
            nri_jh,
            salt_intake,
            tendency,
        };
        let warnings = collect_warnings(input, &parts);

        debug!(
            fluid = parts.fluid_status.is_evaluated(),
            ctr = parts.cardiac.ctr.is_evaluated(),
            gnri = parts.gnri.is_evaluated(),
            nri = parts.nri_jh.result.is_evaluated(),
            salt = parts.salt_intake.is_evaluated(),
            warnings = warnings.len(),
            "assessment scored"
        );

        aggregate(parts, warnings)
    }
}

fn collect_warnings(input: &PatientInput, parts: &AssessmentParts) -> Vec<DataWarning> {
    let mut warnings = Vec::new();

    if let Some(delta_bw_kg) = parts.derived.delta_bw_kg.filter(|delta| *delta < 0.0) {
        warnings.push(DataWarning::NegativeWeightGain { delta_bw_kg });
    }

    if parts
        .cardiac
        .peptide
        .band()
        .is_some_and(|finding| finding.reference_only)
    {
        warnings.push(DataWarning::ArrhythmiaConfoundsPeptides);
    }

    if input.sex.is_none() && parts.cardiac.ctr.is_evaluated() {
        warnings.push(DataWarning::SexNotRecorded);
    }

    if parts.nri_jh.is_partial() {
        warnings.push(DataWarning::NutritionScorePartial {
            components_scored: parts.nri_jh.components.len(),
        });
    }

    match &parts.tendency {
        TendencyOutcome::InsufficientData { missing } => {
            warnings.push(DataWarning::InsufficientModelData {
                missing: missing.clone(),
            });
        }
        TendencyOutcome::Unavailable { reason } => {
            warnings.push(DataWarning::ModelUnavailable {
                reason: reason.clone(),
            });
        }
        TendencyOutcome::Predicted { .. } => {}
    }

    warnings
}
