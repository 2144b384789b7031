use serde::{Deserialize, Serialize};

/// Display label shared by every classifier band.
pub trait Band {
    fn label(&self) -> &'static str;
}

/// Outcome of a single classifier.
///
/// `Unevaluated` means a required input was not provided. It is never folded
/// into a "normal" band, so the display layer can tell "not assessed" apart
/// from "assessed as normal".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScoreResult<B> {
    Unevaluated,
    Banded { band: B, value: Option<f64> },
}

impl<B> ScoreResult<B> {
    pub fn banded(band: B, value: f64) -> Self {
        Self::Banded {
            band,
            value: Some(value),
        }
    }

    pub fn band(&self) -> Option<&B> {
        match self {
            Self::Banded { band, .. } => Some(band),
            Self::Unevaluated => None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Banded { value, .. } => *value,
            Self::Unevaluated => None,
        }
    }

    pub fn is_evaluated(&self) -> bool {
        matches!(self, Self::Banded { .. })
    }
}

impl<B: Band> ScoreResult<B> {
    /// Renders `"<name>: <value> → <band>"`, or `"<name>: not assessed"`.
    pub fn describe(&self, name: &str, precision: usize) -> String {
        match self {
            Self::Unevaluated => format!("{name}: not assessed"),
            Self::Banded {
                band,
                value: Some(value),
            } => format!("{name}: {value:.precision$} → {}", band.label()),
            Self::Banded { band, value: None } => format!("{name}: {}", band.label()),
        }
    }
}
