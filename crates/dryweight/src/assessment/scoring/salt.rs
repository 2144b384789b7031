use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::score::{Band, ScoreResult};
use super::config::SaltThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaltBand {
    Acceptable,
    /// Estimated intake indicates salt excess.
    HighRisk,
}

impl Band for SaltBand {
    fn label(&self) -> &'static str {
        match self {
            Self::Acceptable => "Acceptable",
            Self::HighRisk => "High Risk (salt excess)",
        }
    }
}

/// Estimated daily salt intake (g/day) from interdialytic weight gain.
///
/// Only a strictly positive ΔBW is estimated; zero or negative gain is unevaluated.
pub fn estimate(delta_bw_kg: Option<f64>, thresholds: &SaltThresholds) -> ScoreResult<SaltBand> {
    let Some(delta_bw_kg) = delta_bw_kg.filter(|delta| *delta > 0.0) else {
        debug!("salt intake unevaluated: no positive weight gain");
        return ScoreResult::Unevaluated;
    };

    let grams_per_day = delta_bw_kg * thresholds.grams_per_kg;
    let band = if grams_per_day > thresholds.high_risk_above_g {
        SaltBand::HighRisk
    } else {
        SaltBand::Acceptable
    };

    ScoreResult::banded(band, grams_per_day)
}
