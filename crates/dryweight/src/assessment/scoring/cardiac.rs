use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::domain::{PatientInput, Sex};
use super::super::score::{Band, ScoreResult};
use super::config::CardiacThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtrBand {
    WithinThreshold,
    Alert,
}

impl Band for CtrBand {
    fn label(&self) -> &'static str {
        match self {
            Self::WithinThreshold => "Within threshold",
            Self::Alert => "Alert (possible fluid overload)",
        }
    }
}

/// Reason a CTR alert fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CtrTrigger {
    AboveSexThreshold { threshold_pct: f64 },
    RapidIncrease { delta_pct: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeptideMarker {
    NtProBnp,
    Bnp,
    Hanp,
}

impl PeptideMarker {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NtProBnp => "NT-proBNP",
            Self::Bnp => "BNP",
            Self::Hanp => "HANP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeptideLevel {
    Acceptable,
    HighConcern,
    /// No cutoff is configured for the marker; the value is shown but not banded.
    DisplayOnly,
}

/// Banded natriuretic-peptide reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeptideFinding {
    pub marker: PeptideMarker,
    pub level: PeptideLevel,
    /// Arrhythmia confounds the marker; the level is advisory only.
    pub reference_only: bool,
}

impl Band for PeptideFinding {
    fn label(&self) -> &'static str {
        match (self.level, self.reference_only) {
            (PeptideLevel::Acceptable, false) => "Acceptable",
            (PeptideLevel::Acceptable, true) => "Acceptable (reference only)",
            (PeptideLevel::HighConcern, false) => "High concern",
            (PeptideLevel::HighConcern, true) => "High concern (reference only)",
            (PeptideLevel::DisplayOnly, _) => "No cutoff defined",
        }
    }
}

/// Inputs consumed by [`evaluate`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CardiacInputs {
    pub ctr_now: Option<f64>,
    pub ctr_prev: Option<f64>,
    pub sex: Option<Sex>,
    pub nt_probnp: Option<f64>,
    pub bnp: Option<f64>,
    pub hanp: Option<f64>,
    pub arrhythmia: bool,
}

impl CardiacInputs {
    pub fn from_patient(input: &PatientInput) -> Self {
        Self {
            ctr_now: input.ctr_current_pct,
            ctr_prev: input.ctr_previous_pct,
            sex: input.sex,
            nt_probnp: input.nt_probnp,
            bnp: input.bnp,
            hanp: input.hanp,
            arrhythmia: input.arrhythmia,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardiacSummary {
    pub ctr: ScoreResult<CtrBand>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ctr_triggers: Vec<CtrTrigger>,
    pub peptide: ScoreResult<PeptideFinding>,
}

pub fn evaluate(inputs: &CardiacInputs, thresholds: &CardiacThresholds) -> CardiacSummary {
    let (ctr, ctr_triggers) = evaluate_ctr(inputs, thresholds);
    let peptide = evaluate_peptide(inputs, thresholds);

    CardiacSummary {
        ctr,
        ctr_triggers,
        peptide,
    }
}

fn evaluate_ctr(
    inputs: &CardiacInputs,
    thresholds: &CardiacThresholds,
) -> (ScoreResult<CtrBand>, Vec<CtrTrigger>) {
    let Some(ctr_now) = inputs.ctr_now else {
        debug!("CTR unevaluated: current CTR not provided");
        return (ScoreResult::Unevaluated, Vec::new());
    };

    let mut triggers = Vec::new();

    if let Some(sex) = inputs.sex {
        let threshold_pct = match sex {
            Sex::Male => thresholds.male_ctr_pct,
            Sex::Female => thresholds.female_ctr_pct,
        };
        if ctr_now > threshold_pct {
            triggers.push(CtrTrigger::AboveSexThreshold { threshold_pct });
        }
    }

    if let Some(ctr_prev) = inputs.ctr_prev {
        let delta_pct = ctr_now - ctr_prev;
        if delta_pct >= thresholds.ctr_rapid_increase_pct {
            triggers.push(CtrTrigger::RapidIncrease { delta_pct });
        }
    }

    let band = if triggers.is_empty() {
        CtrBand::WithinThreshold
    } else {
        CtrBand::Alert
    };

    (ScoreResult::banded(band, ctr_now), triggers)
}

fn evaluate_peptide(
    inputs: &CardiacInputs,
    thresholds: &CardiacThresholds,
) -> ScoreResult<PeptideFinding> {
    let candidates = [
        (
            PeptideMarker::NtProBnp,
            inputs.nt_probnp,
            Some(thresholds.nt_probnp_high_concern_from),
        ),
        (
            PeptideMarker::Bnp,
            inputs.bnp,
            thresholds.bnp_high_concern_from,
        ),
        (
            PeptideMarker::Hanp,
            inputs.hanp,
            thresholds.hanp_high_concern_from,
        ),
    ];

    let Some((marker, value, cutoff)) = candidates
        .into_iter()
        .find_map(|(marker, value, cutoff)| value.map(|value| (marker, value, cutoff)))
    else {
        debug!("natriuretic peptide unevaluated: no marker measured");
        return ScoreResult::Unevaluated;
    };

    let level = match cutoff {
        Some(cutoff) if value >= cutoff => PeptideLevel::HighConcern,
        Some(_) => PeptideLevel::Acceptable,
        None => PeptideLevel::DisplayOnly,
    };

    ScoreResult::banded(
        PeptideFinding {
            marker,
            level,
            reference_only: inputs.arrhythmia,
        },
        value,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn male_ctr(now: f64, prev: Option<f64>) -> CardiacSummary {
        let inputs = CardiacInputs {
            ctr_now: Some(now),
            ctr_prev: prev,
            sex: Some(Sex::Male),
            ..CardiacInputs::default()
        };
        evaluate(&inputs, &CardiacThresholds::default())
    }

    #[test]
    fn ctr_above_male_threshold_alerts() {
        let summary = male_ctr(52.0, None);
        assert_eq!(summary.ctr.band(), Some(&CtrBand::Alert));
        assert_eq!(
            summary.ctr_triggers,
            vec![CtrTrigger::AboveSexThreshold {
                threshold_pct: 50.0
            }]
        );
    }

    #[test]
    fn ctr_threshold_is_exclusive() {
        let summary = male_ctr(50.0, None);
        assert_eq!(summary.ctr.band(), Some(&CtrBand::WithinThreshold));
        assert!(summary.ctr_triggers.is_empty());
    }

    #[test]
    fn female_threshold_is_higher() {
        let inputs = CardiacInputs {
            ctr_now: Some(53.0),
            sex: Some(Sex::Female),
            ..CardiacInputs::default()
        };
        let summary = evaluate(&inputs, &CardiacThresholds::default());
        assert_eq!(summary.ctr.band(), Some(&CtrBand::WithinThreshold));
    }

    #[test]
    fn rapid_increase_alerts_below_threshold() {
        let summary = male_ctr(48.0, Some(43.0));
        assert_eq!(summary.ctr.band(), Some(&CtrBand::Alert));
        assert!(matches!(
            summary.ctr_triggers.as_slice(),
            [CtrTrigger::RapidIncrease { delta_pct }] if (*delta_pct - 5.0).abs() < 1e-9
        ));
    }

    #[test]
    fn ctr_requires_current_value() {
        let inputs = CardiacInputs {
            ctr_prev: Some(45.0),
            sex: Some(Sex::Male),
            ..CardiacInputs::default()
        };
        let summary = evaluate(&inputs, &CardiacThresholds::default());
        assert_eq!(summary.ctr, ScoreResult::Unevaluated);
        assert!(summary.ctr_triggers.is_empty());
    }

    #[test]
    fn nt_probnp_is_preferred_and_banded() {
        let inputs = CardiacInputs {
            nt_probnp: Some(8000.0),
            bnp: Some(120.0),
            hanp: Some(60.0),
            ..CardiacInputs::default()
        };
        let summary = evaluate(&inputs, &CardiacThresholds::default());
        let finding = summary.peptide.band().expect("peptide evaluated");
        assert_eq!(finding.marker, PeptideMarker::NtProBnp);
        assert_eq!(finding.level, PeptideLevel::HighConcern);
        assert!(!finding.reference_only);
        assert_eq!(summary.peptide.value(), Some(8000.0));
    }

    #[test]
    fn nt_probnp_below_cutoff_is_acceptable() {
        let inputs = CardiacInputs {
            nt_probnp: Some(7999.0),
            ..CardiacInputs::default()
        };
        let summary = evaluate(&inputs, &CardiacThresholds::default());
        assert_eq!(
            summary.peptide.band().map(|finding| finding.level),
            Some(PeptideLevel::Acceptable)
        );
    }

    #[test]
    fn falls_back_to_bnp_then_hanp_without_default_cutoffs() {
        let thresholds = CardiacThresholds::default();

        let bnp_only = CardiacInputs {
            bnp: Some(300.0),
            hanp: Some(80.0),
            ..CardiacInputs::default()
        };
        let finding = *evaluate(&bnp_only, &thresholds)
            .peptide
            .band()
            .expect("bnp evaluated");
        assert_eq!(finding.marker, PeptideMarker::Bnp);
        assert_eq!(finding.level, PeptideLevel::DisplayOnly);

        let hanp_only = CardiacInputs {
            hanp: Some(80.0),
            ..CardiacInputs::default()
        };
        let finding = *evaluate(&hanp_only, &thresholds)
            .peptide
            .band()
            .expect("hanp evaluated");
        assert_eq!(finding.marker, PeptideMarker::Hanp);
    }

    #[test]
    fn configured_bnp_cutoff_bands_the_value() {
        let thresholds = CardiacThresholds {
            bnp_high_concern_from: Some(200.0),
            ..CardiacThresholds::default()
        };
        let inputs = CardiacInputs {
            bnp: Some(250.0),
            ..CardiacInputs::default()
        };
        let finding = *evaluate(&inputs, &thresholds)
            .peptide
            .band()
            .expect("bnp evaluated");
        assert_eq!(finding.level, PeptideLevel::HighConcern);
    }

    #[test]
    fn arrhythmia_downgrades_to_reference_only() {
        let inputs = CardiacInputs {
            nt_probnp: Some(12000.0),
            arrhythmia: true,
            ..CardiacInputs::default()
        };
        let summary = evaluate(&inputs, &CardiacThresholds::default());
        let finding = summary.peptide.band().expect("still banded");
        assert_eq!(finding.level, PeptideLevel::HighConcern);
        assert!(finding.reference_only);
        assert_eq!(finding.label(), "High concern (reference only)");
    }

    #[test]
    fn no_peptide_measured_is_unevaluated() {
        let inputs = CardiacInputs {
            arrhythmia: true,
            ..CardiacInputs::default()
        };
        let summary = evaluate(&inputs, &CardiacThresholds::default());
        assert_eq!(summary.peptide, ScoreResult::Unevaluated);
    }
}
