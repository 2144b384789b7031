use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::score::{Band, ScoreResult};
use super::config::NutritionThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GnriBand {
    HighRisk,
    MiddleRisk,
    LowRisk,
}

impl Band for GnriBand {
    fn label(&self) -> &'static str {
        match self {
            Self::HighRisk => "High Risk",
            Self::MiddleRisk => "Middle Risk",
            Self::LowRisk => "Low Risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NriBand {
    HighRisk,
    MediumRisk,
    LowRisk,
}

impl Band for NriBand {
    fn label(&self) -> &'static str {
        match self {
            Self::HighRisk => "High Risk",
            Self::MediumRisk => "Medium Risk",
            Self::LowRisk => "Low Risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NriFactor {
    Albumin,
    Creatinine,
    TotalCholesterol,
    Bmi,
}

impl NriFactor {
    pub const ALL: [NriFactor; 4] = [
        NriFactor::Albumin,
        NriFactor::Creatinine,
        NriFactor::TotalCholesterol,
        NriFactor::Bmi,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Albumin => "Albumin",
            Self::Creatinine => "Creatinine",
            Self::TotalCholesterol => "Total cholesterol",
            Self::Bmi => "BMI",
        }
    }

    /// Ascending cutoffs paired with the points awarded below each one.
    const fn ladder(self) -> [(f64, u8); 3] {
        match self {
            Self::Albumin => [(3.0, 3), (3.5, 2), (4.0, 1)],
            Self::Creatinine => [(6.0, 3), (8.0, 2), (10.0, 1)],
            Self::TotalCholesterol => [(120.0, 3), (140.0, 2), (180.0, 1)],
            Self::Bmi => [(18.5, 3), (20.0, 2), (22.0, 1)],
        }
    }

    pub fn points(self, value: f64) -> u8 {
        self.ladder()
            .into_iter()
            .find(|(cutoff, _)| value < *cutoff)
            .map(|(_, points)| points)
            .unwrap_or(0)
    }
}

/// Contribution of one provided NRI-JH input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NriComponent {
    pub factor: NriFactor,
    pub value: f64,
    pub points: u8,
}

/// Additive NRI-JH score plus the audit trail of contributing components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NriAssessment {
    pub result: ScoreResult<NriBand>,
    pub components: Vec<NriComponent>,
}

impl NriAssessment {
    pub fn is_partial(&self) -> bool {
        self.result.is_evaluated() && self.components.len() < NriFactor::ALL.len()
    }
}

/// Lab and anthropometric inputs for the nutrition engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NutritionInputs {
    pub albumin: Option<f64>,
    pub post_weight_kg: Option<f64>,
    pub ideal_weight_kg: Option<f64>,
    pub creatinine: Option<f64>,
    pub total_cholesterol: Option<f64>,
    pub bmi: Option<f64>,
}

pub fn evaluate(
    inputs: &NutritionInputs,
    thresholds: &NutritionThresholds,
) -> (ScoreResult<GnriBand>, NriAssessment) {
    let gnri = gnri(
        inputs.albumin,
        inputs.post_weight_kg,
        inputs.ideal_weight_kg,
        thresholds,
    );
    let nri = nri_jh(
        [
            (NriFactor::Albumin, inputs.albumin),
            (NriFactor::Creatinine, inputs.creatinine),
            (NriFactor::TotalCholesterol, inputs.total_cholesterol),
            (NriFactor::Bmi, inputs.bmi),
        ],
        thresholds,
    );
    (gnri, nri)
}

/// GNRI = 14.89 × albumin + 41.7 × (weight / ideal weight).
pub fn gnri(
    albumin: Option<f64>,
    post_weight_kg: Option<f64>,
    ideal_weight_kg: Option<f64>,
    thresholds: &NutritionThresholds,
) -> ScoreResult<GnriBand> {
    let (Some(albumin), Some(weight), Some(ideal)) = (albumin, post_weight_kg, ideal_weight_kg)
    else {
        debug!("GNRI unevaluated: albumin, post weight, or ideal weight not provided");
        return ScoreResult::Unevaluated;
    };

    let value = 14.89 * albumin + 41.7 * (weight / ideal);
    let band = if value < thresholds.gnri_high_risk_below {
        GnriBand::HighRisk
    } else if value < thresholds.gnri_low_risk_from {
        GnriBand::MiddleRisk
    } else {
        GnriBand::LowRisk
    };

    ScoreResult::banded(band, value)
}

/// Sums the points of every provided factor; absent factors contribute nothing.
///
/// The score is unevaluated only when no factor at all is provided.
pub fn nri_jh(
    factors: [(NriFactor, Option<f64>); 4],
    thresholds: &NutritionThresholds,
) -> NriAssessment {
    let components: Vec<NriComponent> = factors
        .into_iter()
        .filter_map(|(factor, value)| {
            value.map(|value| NriComponent {
                factor,
                value,
                points: factor.points(value),
            })
        })
        .collect();

    if components.is_empty() {
        debug!("NRI-JH unevaluated: no component provided");
        return NriAssessment {
            result: ScoreResult::Unevaluated,
            components,
        };
    }

    let total: u8 = components.iter().map(|component| component.points).sum();
    let band = if total >= thresholds.nri_high_risk_from {
        NriBand::HighRisk
    } else if total >= thresholds.nri_medium_risk_from {
        NriBand::MediumRisk
    } else {
        NriBand::LowRisk
    };

    NriAssessment {
        result: ScoreResult::banded(band, f64::from(total)),
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nri(albumin: f64, creatinine: f64, cholesterol: f64, bmi: f64) -> NriAssessment {
        nri_jh(
            [
                (NriFactor::Albumin, Some(albumin)),
                (NriFactor::Creatinine, Some(creatinine)),
                (NriFactor::TotalCholesterol, Some(cholesterol)),
                (NriFactor::Bmi, Some(bmi)),
            ],
            &NutritionThresholds::default(),
        )
    }

    #[test]
    fn gnri_reference_case_is_middle_risk() {
        let result = gnri(
            Some(3.8),
            Some(55.0),
            Some(58.0),
            &NutritionThresholds::default(),
        );
        let value = result.value().expect("gnri computed");
        assert!((value - 96.125).abs() < 0.01, "got {value}");
        assert_eq!(result.band(), Some(&GnriBand::MiddleRisk));
    }

    #[test]
    fn gnri_band_edges() {
        let thresholds = NutritionThresholds::default();
        // weight == ideal weight contributes exactly 41.7
        let at = |target: f64| {
            let albumin = (target - 41.7) / 14.89;
            gnri(Some(albumin), Some(60.0), Some(60.0), &thresholds)
        };

        assert_eq!(at(89.99).band(), Some(&GnriBand::HighRisk));
        assert_eq!(at(90.01).band(), Some(&GnriBand::MiddleRisk));
        assert_eq!(at(97.99).band(), Some(&GnriBand::MiddleRisk));
        assert_eq!(at(98.01).band(), Some(&GnriBand::LowRisk));
    }

    #[test]
    fn gnri_honours_alternate_high_risk_cutoff() {
        let thresholds = NutritionThresholds {
            gnri_high_risk_below: 92.0,
            ..NutritionThresholds::default()
        };
        let result = gnri(Some(3.3), Some(58.0), Some(58.0), &thresholds);
        // 49.137 + 41.7 = 90.837
        assert_eq!(result.band(), Some(&GnriBand::HighRisk));
    }

    #[test]
    fn gnri_requires_all_inputs() {
        let thresholds = NutritionThresholds::default();
        assert_eq!(
            gnri(None, Some(55.0), Some(58.0), &thresholds),
            ScoreResult::Unevaluated
        );
        assert_eq!(
            gnri(Some(3.8), None, Some(58.0), &thresholds),
            ScoreResult::Unevaluated
        );
        assert_eq!(
            gnri(Some(3.8), Some(55.0), None, &thresholds),
            ScoreResult::Unevaluated
        );
    }

    #[test]
    fn factor_points_follow_ladders() {
        assert_eq!(NriFactor::Albumin.points(2.9), 3);
        assert_eq!(NriFactor::Albumin.points(3.0), 2);
        assert_eq!(NriFactor::Albumin.points(3.6), 1);
        assert_eq!(NriFactor::Albumin.points(4.0), 0);
        assert_eq!(NriFactor::Creatinine.points(5.9), 3);
        assert_eq!(NriFactor::Creatinine.points(9.9), 1);
        assert_eq!(NriFactor::TotalCholesterol.points(139.0), 2);
        assert_eq!(NriFactor::TotalCholesterol.points(180.0), 0);
        assert_eq!(NriFactor::Bmi.points(18.4), 3);
        assert_eq!(NriFactor::Bmi.points(21.9), 1);
    }

    #[test]
    fn total_score_bands() {
        let high = nri(2.8, 5.0, 110.0, 19.0);
        assert_eq!(high.result.value(), Some(11.0));
        assert_eq!(high.result.band(), Some(&NriBand::HighRisk));

        let medium = nri(3.2, 7.0, 130.0, 21.0);
        assert_eq!(medium.result.value(), Some(7.0));
        assert_eq!(medium.result.band(), Some(&NriBand::MediumRisk));

        let low = nri(4.1, 11.0, 200.0, 23.0);
        assert_eq!(low.result.value(), Some(0.0));
        assert_eq!(low.result.band(), Some(&NriBand::LowRisk));
    }

    #[test]
    fn lowering_albumin_never_lowers_the_score() {
        let baseline = nri(3.6, 9.0, 150.0, 21.0).result.value().expect("scored");
        let worse = nri(2.9, 9.0, 150.0, 21.0).result.value().expect("scored");
        assert!(worse >= baseline);
    }

    #[test]
    fn severity_is_monotonic_across_every_factor() {
        for factor in NriFactor::ALL {
            let ladder = factor.ladder();
            let mut previous = u8::MAX;
            let top = ladder[2].0 + 5.0;
            let mut value = ladder[0].0 - 5.0;
            while value <= top {
                let points = factor.points(value);
                assert!(points <= previous, "{factor:?} not monotonic at {value}");
                previous = points;
                value += 0.05;
            }
        }
    }

    #[test]
    fn partial_components_still_score() {
        let assessment = nri_jh(
            [
                (NriFactor::Albumin, Some(2.9)),
                (NriFactor::Creatinine, None),
                (NriFactor::TotalCholesterol, None),
                (NriFactor::Bmi, Some(19.0)),
            ],
            &NutritionThresholds::default(),
        );

        assert_eq!(assessment.result.value(), Some(5.0));
        assert_eq!(assessment.result.band(), Some(&NriBand::LowRisk));
        assert_eq!(assessment.components.len(), 2);
        assert!(assessment.is_partial());
    }

    #[test]
    fn no_components_is_unevaluated() {
        let assessment = nri_jh(
            NriFactor::ALL.map(|factor| (factor, None)),
            &NutritionThresholds::default(),
        );
        assert_eq!(assessment.result, ScoreResult::Unevaluated);
        assert!(assessment.components.is_empty());
        assert!(!assessment.is_partial());
    }
}
