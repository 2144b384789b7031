//! Independent classifiers. Each is a pure function of its inputs and the
//! configured cutoffs, and may run in any order.

pub mod cardiac;
mod config;
pub mod fluid;
pub mod nutrition;
pub mod salt;

pub use cardiac::{
    CardiacInputs, CardiacSummary, CtrBand, CtrTrigger, PeptideFinding, PeptideLevel,
    PeptideMarker,
};
pub use config::{
    CardiacThresholds, FluidThresholds, NutritionThresholds, SaltThresholds, ScoringConfig,
};
pub use fluid::FluidBand;
pub use nutrition::{GnriBand, NriAssessment, NriBand, NriComponent, NriFactor, NutritionInputs};
pub use salt::SaltBand;
