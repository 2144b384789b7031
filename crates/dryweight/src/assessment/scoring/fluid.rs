use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::score::{Band, ScoreResult};
use super::config::FluidThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluidBand {
    Underfilled,
    Optimal,
    Overfilled,
}

impl Band for FluidBand {
    fn label(&self) -> &'static str {
        match self {
            Self::Underfilled => "Underfilled",
            Self::Optimal => "Optimal",
            Self::Overfilled => "Overfilled",
        }
    }
}

/// Maps PWI, sub-classified by systolic BP inside the middle band.
///
/// Both PWI and Kr must be provided. The middle band is inclusive at both
/// ends, so exactly 2.0 and exactly 4.0 fall into the BP sub-classification.
pub fn classify(
    pwi: Option<f64>,
    kr: Option<f64>,
    systolic_bp: Option<f64>,
    thresholds: &FluidThresholds,
) -> ScoreResult<FluidBand> {
    let (Some(pwi), Some(_kr)) = (pwi, kr) else {
        debug!("fluid status unevaluated: PWI or Kr not provided");
        return ScoreResult::Unevaluated;
    };

    if thresholds.requires_blood_pressure && systolic_bp.is_none() {
        debug!("fluid status unevaluated: systolic BP required but not provided");
        return ScoreResult::Unevaluated;
    }

    let band = if pwi > thresholds.underfilled_above_pwi {
        FluidBand::Underfilled
    } else if pwi < thresholds.overfilled_below_pwi {
        FluidBand::Overfilled
    } else {
        match systolic_bp {
            Some(bp) if bp < thresholds.low_systolic_bp => FluidBand::Underfilled,
            Some(bp) if bp >= thresholds.high_systolic_bp => FluidBand::Overfilled,
            _ => FluidBand::Optimal,
        }
    };

    ScoreResult::banded(band, pwi)
}
