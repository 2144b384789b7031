use serde::Serialize;

use super::model::TendencyOutcome;
use super::score::{Band, ScoreResult};
use super::summary::EvaluationSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricStatus {
    Assessed,
    NotAssessed,
}

/// Stable identity of a badge; `name` is display text and may vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    FluidStatus,
    WeightGain,
    Ctr,
    Peptide,
    Gnri,
    NriJh,
    SaltIntake,
    Tendency,
}

/// One labelled badge for the display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricView {
    pub kind: MetricKind,
    pub name: &'static str,
    pub status: MetricStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub display: String,
}

impl MetricView {
    fn from_score<B: Band>(
        kind: MetricKind,
        name: &'static str,
        result: &ScoreResult<B>,
        precision: usize,
    ) -> Self {
        Self {
            kind,
            name,
            status: if result.is_evaluated() {
                MetricStatus::Assessed
            } else {
                MetricStatus::NotAssessed
            },
            band_label: result.band().map(B::label),
            value: result.value(),
            display: result.describe(name, precision),
        }
    }

    fn from_value(kind: MetricKind, name: &'static str, value: Option<f64>, unit: &str) -> Self {
        let display = match value {
            Some(value) => format!("{name}: {value:.1} {unit}"),
            None => format!("{name}: not provided"),
        };
        Self {
            kind,
            name,
            status: if value.is_some() {
                MetricStatus::Assessed
            } else {
                MetricStatus::NotAssessed
            },
            band_label: None,
            value,
            display,
        }
    }
}

impl EvaluationSummary {
    /// Badges in display order.
    pub fn metrics(&self) -> Vec<MetricView> {
        let peptide_name = self
            .cardiac
            .peptide
            .band()
            .map(|finding| finding.marker.label())
            .unwrap_or("Natriuretic peptide");

        let mut tendency = MetricView {
            kind: MetricKind::Tendency,
            name: "Tendency",
            status: MetricStatus::NotAssessed,
            band_label: None,
            value: None,
            display: self.tendency.describe(),
        };
        if matches!(self.tendency, TendencyOutcome::Predicted { .. }) {
            tendency.status = MetricStatus::Assessed;
        }

        vec![
            MetricView::from_score(MetricKind::FluidStatus, "Fluid status", &self.fluid_status, 1),
            MetricView::from_value(MetricKind::WeightGain, "ΔBW", self.derived.delta_bw_kg, "kg"),
            MetricView::from_score(MetricKind::Ctr, "CTR", &self.cardiac.ctr, 1),
            MetricView::from_score(MetricKind::Peptide, peptide_name, &self.cardiac.peptide, 0),
            MetricView::from_score(MetricKind::Gnri, "GNRI", &self.gnri, 1),
            MetricView::from_score(MetricKind::NriJh, "NRI-JH", &self.nri_jh.result, 0),
            MetricView::from_score(MetricKind::SaltIntake, "Salt intake", &self.salt_intake, 1),
            tendency,
        ]
    }
}
