use std::sync::Arc;

use tracing::info;

use super::domain::RawPatientInput;
use super::engine::DryWeightAssessor;
use super::model::{ModelSlot, SharedModel};
use super::scoring::ScoringConfig;
use super::summary::EvaluationSummary;

/// Where the service obtains its tendency model.
#[derive(Debug, Clone)]
enum ModelSource {
    Fixed(ModelSlot),
    Shared(Arc<SharedModel>),
}

impl ModelSource {
    fn slot(&self) -> ModelSlot {
        match self {
            Self::Fixed(slot) => slot.clone(),
            Self::Shared(shared) => shared.slot(),
        }
    }
}

/// Service composing the assessor with its tendency model.
#[derive(Debug, Clone)]
pub struct AssessmentService {
    assessor: DryWeightAssessor,
    model: ModelSource,
}

impl AssessmentService {
    pub fn new(config: ScoringConfig, model: ModelSlot) -> Self {
        Self {
            assessor: DryWeightAssessor::new(config),
            model: ModelSource::Fixed(model),
        }
    }

    /// Service backed by the artifact cache; the first assessment (or
    /// [`Self::model_ready`]) triggers the one-time load.
    pub fn with_shared_model(config: ScoringConfig, shared: Arc<SharedModel>) -> Self {
        Self {
            assessor: DryWeightAssessor::new(config),
            model: ModelSource::Shared(shared),
        }
    }

    /// Service without a tendency model; every tendency is reported unavailable.
    pub fn without_model(config: ScoringConfig) -> Self {
        Self::new(config, ModelSlot::not_configured())
    }

    /// Evaluate one record. Never fails: gaps surface as unevaluated results.
    pub fn assess(&self, raw: &RawPatientInput) -> EvaluationSummary {
        let summary = self.assessor.evaluate_raw(raw, &self.model.slot());
        info!(
            patient_ref = summary.patient_ref.as_deref().unwrap_or("-"),
            warnings = summary.warnings.len(),
            "assessment completed"
        );
        summary
    }

    pub fn config(&self) -> &ScoringConfig {
        self.assessor.config()
    }

    pub fn model_ready(&self) -> bool {
        self.model.slot().is_ready()
    }
}
