//! Dry-weight assessment: normalisation, independent classifiers, the
//! tendency model boundary, and the read-only summary they merge into.

pub mod batch;
pub mod domain;
pub mod engine;
pub mod model;
pub mod normalizer;
pub mod router;
pub mod score;
pub mod scoring;
pub mod service;
pub mod summary;
pub mod views;

#[cfg(test)]
mod tests;

pub use batch::{BatchImportError, BatchImporter, BatchRow};
pub use domain::{DerivedValues, PatientInput, RawPatientInput, Sex, DEFAULT_TARGET_BMI};
pub use engine::DryWeightAssessor;
pub use model::{
    assess_tendency, LinearTendencyModel, ModelError, ModelFeatures, ModelSlot, SharedModel,
    TendencyLabel, TendencyModel, TendencyOutcome, FEATURE_NAMES,
};
pub use normalizer::{derive, normalize};
pub use router::assessment_router;
pub use score::{Band, ScoreResult};
pub use scoring::ScoringConfig;
pub use service::AssessmentService;
pub use summary::{aggregate, AssessmentParts, DataWarning, EvaluationSummary};
pub use views::{MetricKind, MetricStatus, MetricView};
