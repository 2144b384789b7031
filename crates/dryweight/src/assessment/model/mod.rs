//! Boundary to the externally trained tendency classifier.
//!
//! The engine only defines the feature vector and the label contract; the
//! concrete classifier sits behind [`TendencyModel`] so it can be swapped for
//! a stub in tests or for a different artifact format.

mod linear;
mod shared;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{DerivedValues, PatientInput};
use super::normalizer::provided;
use super::score::ScoreResult;
use super::scoring::GnriBand;

pub use linear::{ClassifierArtifact, LabelArtifact, LinearTendencyModel, ScalerArtifact};
pub use shared::SharedModel;

/// Feature order expected by every artifact.
pub const FEATURE_NAMES: [&str; 7] = ["age", "height", "dw", "albumin", "gnri", "kr", "pwi"];

/// Complete feature vector; it can only be built when every feature is provided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelFeatures {
    pub age: f64,
    pub height_cm: f64,
    pub dry_weight_kg: f64,
    pub albumin: f64,
    pub gnri: f64,
    pub kr: f64,
    pub pwi: f64,
}

impl ModelFeatures {
    /// Collects the features, or the names of those that are missing.
    ///
    /// A zero feature counts as missing here even when it was derived from
    /// provided inputs; the classifier is only fed non-zero values.
    pub fn collect(
        input: &PatientInput,
        derived: &DerivedValues,
        gnri: &ScoreResult<GnriBand>,
    ) -> Result<Self, Vec<&'static str>> {
        let slots = [
            input.age,
            input.height_cm,
            input.dry_weight_kg,
            input.albumin,
            gnri.value(),
            derived.kr,
            derived.pwi,
        ]
        .map(provided);

        let missing: Vec<&'static str> = FEATURE_NAMES
            .iter()
            .zip(slots)
            .filter(|(_, slot)| slot.is_none())
            .map(|(name, _)| *name)
            .collect();

        match slots {
            [Some(age), Some(height_cm), Some(dry_weight_kg), Some(albumin), Some(gnri), Some(kr), Some(pwi)] => {
                Ok(Self {
                    age,
                    height_cm,
                    dry_weight_kg,
                    albumin,
                    gnri,
                    kr,
                    pwi,
                })
            }
            _ => Err(missing),
        }
    }

    /// Values in [`FEATURE_NAMES`] order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.age,
            self.height_cm,
            self.dry_weight_kg,
            self.albumin,
            self.gnri,
            self.kr,
            self.pwi,
        ]
    }
}

/// Categorical label drawn from the classifier's fixed label set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TendencyLabel(pub String);

impl fmt::Display for TendencyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Prediction capability of a trained classifier.
pub trait TendencyModel: Send + Sync {
    fn predict(&self, features: &ModelFeatures) -> Result<TendencyLabel, ModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid model artifact {artifact}: {source}")]
    Format {
        artifact: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("inconsistent model artifacts: {0}")]
    Shape(String),
    #[error("prediction failed: {0}")]
    Prediction(String),
}

/// Model availability resolved once at startup and shared by every evaluation.
#[derive(Clone)]
pub enum ModelSlot {
    Ready(Arc<dyn TendencyModel>),
    Unavailable(String),
}

impl ModelSlot {
    pub fn not_configured() -> Self {
        Self::Unavailable("no model artifact directory configured".to_string())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl fmt::Debug for ModelSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(_) => f.write_str("ModelSlot::Ready"),
            Self::Unavailable(reason) => write!(f, "ModelSlot::Unavailable({reason})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TendencyOutcome {
    Predicted { label: TendencyLabel },
    InsufficientData { missing: Vec<String> },
    Unavailable { reason: String },
}

impl TendencyOutcome {
    pub fn describe(&self) -> String {
        match self {
            Self::Predicted { label } => format!("Tendency: {label}"),
            Self::InsufficientData { missing } => {
                format!("Tendency: insufficient data (missing {})", missing.join(", "))
            }
            Self::Unavailable { reason } => format!("Tendency: model unavailable ({reason})"),
        }
    }
}

/// Invokes the model only when every feature is present.
///
/// Missing features are reported before availability, so an absent model is
/// never blamed for a gap in the patient record.
pub fn assess_tendency(
    slot: &ModelSlot,
    features: Result<ModelFeatures, Vec<&'static str>>,
) -> TendencyOutcome {
    let features = match features {
        Ok(features) => features,
        Err(missing) => {
            debug!(?missing, "tendency model skipped: incomplete features");
            return TendencyOutcome::InsufficientData {
                missing: missing.into_iter().map(str::to_string).collect(),
            };
        }
    };

    let model = match slot {
        ModelSlot::Ready(model) => model,
        ModelSlot::Unavailable(reason) => {
            return TendencyOutcome::Unavailable {
                reason: reason.clone(),
            }
        }
    };

    match model.predict(&features) {
        Ok(label) => TendencyOutcome::Predicted { label },
        Err(err) => {
            warn!(error = %err, "tendency model prediction failed");
            TendencyOutcome::Unavailable {
                reason: err.to_string(),
            }
        }
    }
}
