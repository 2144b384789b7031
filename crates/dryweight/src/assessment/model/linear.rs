use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ModelError, ModelFeatures, TendencyLabel, TendencyModel, FEATURE_NAMES};

pub const SCALER_FILE: &str = "scaler.json";
pub const CLASSIFIER_FILE: &str = "classifier.json";
pub const LABELS_FILE: &str = "labels.json";

/// Standardisation parameters exported alongside the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerArtifact {
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// One coefficient row and intercept per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

/// Ordered class labels; index `i` decodes class `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelArtifact {
    pub classes: Vec<String>,
}

/// Multinomial linear classifier over standardised features.
#[derive(Debug, Clone)]
pub struct LinearTendencyModel {
    scaler: ScalerArtifact,
    classifier: ClassifierArtifact,
    labels: LabelArtifact,
}

impl LinearTendencyModel {
    /// Loads `scaler.json`, `classifier.json`, and `labels.json` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        let scaler = read_artifact(dir, SCALER_FILE)?;
        let classifier = read_artifact(dir, CLASSIFIER_FILE)?;
        let labels = read_artifact(dir, LABELS_FILE)?;
        let model = Self::from_parts(scaler, classifier, labels)?;

        info!(
            dir = %dir.display(),
            classes = model.labels.classes.len(),
            "loaded tendency model artifacts"
        );
        Ok(model)
    }

    pub fn from_parts(
        scaler: ScalerArtifact,
        classifier: ClassifierArtifact,
        labels: LabelArtifact,
    ) -> Result<Self, ModelError> {
        let width = FEATURE_NAMES.len();

        if !scaler.feature_names.is_empty()
            && !scaler
                .feature_names
                .iter()
                .map(String::as_str)
                .eq(FEATURE_NAMES.iter().copied())
        {
            return Err(ModelError::Shape(format!(
                "scaler feature order {:?} does not match {:?}",
                scaler.feature_names, FEATURE_NAMES
            )));
        }
        if scaler.mean.len() != width || scaler.scale.len() != width {
            return Err(ModelError::Shape(format!(
                "scaler must describe {width} features, got mean={} scale={}",
                scaler.mean.len(),
                scaler.scale.len()
            )));
        }
        if scaler.scale.iter().any(|scale| *scale == 0.0 || !scale.is_finite()) {
            return Err(ModelError::Shape(
                "scaler contains a zero or non-finite scale".to_string(),
            ));
        }
        if labels.classes.is_empty() {
            return Err(ModelError::Shape("label set is empty".to_string()));
        }
        if classifier.coefficients.len() != labels.classes.len()
            || classifier.intercepts.len() != labels.classes.len()
        {
            return Err(ModelError::Shape(format!(
                "classifier has {} coefficient rows and {} intercepts for {} labels",
                classifier.coefficients.len(),
                classifier.intercepts.len(),
                labels.classes.len()
            )));
        }
        if let Some(row) = classifier
            .coefficients
            .iter()
            .position(|row| row.len() != width)
        {
            return Err(ModelError::Shape(format!(
                "coefficient row {row} does not have {width} entries"
            )));
        }

        Ok(Self {
            scaler,
            classifier,
            labels,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.labels.classes
    }

    fn scores(&self, features: &ModelFeatures) -> Vec<f64> {
        let standardized: Vec<f64> = features
            .to_vec()
            .into_iter()
            .zip(self.scaler.mean.iter().zip(&self.scaler.scale))
            .map(|(value, (mean, scale))| (value - mean) / scale)
            .collect();

        self.classifier
            .coefficients
            .iter()
            .zip(&self.classifier.intercepts)
            .map(|(row, intercept)| {
                row.iter()
                    .zip(&standardized)
                    .map(|(weight, value)| weight * value)
                    .sum::<f64>()
                    + intercept
            })
            .collect()
    }
}

impl TendencyModel for LinearTendencyModel {
    fn predict(&self, features: &ModelFeatures) -> Result<TendencyLabel, ModelError> {
        let scores = self.scores(features);
        let mut best: Option<(usize, f64)> = None;
        for (index, score) in scores.into_iter().enumerate() {
            if !score.is_finite() {
                return Err(ModelError::Prediction(format!(
                    "non-finite score for class {index}"
                )));
            }
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((index, score));
            }
        }

        let (index, _) =
            best.ok_or_else(|| ModelError::Prediction("classifier has no classes".to_string()))?;
        self.labels
            .classes
            .get(index)
            .cloned()
            .map(TendencyLabel)
            .ok_or_else(|| ModelError::Prediction(format!("no label for class {index}")))
    }
}

fn read_artifact<T>(dir: &Path, file: &'static str) -> Result<T, ModelError>
where
    T: for<'de> Deserialize<'de>,
{
    let path = dir.join(file);
    let content = fs::read(&path).map_err(|source| ModelError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_slice(&content).map_err(|source| ModelError::Format {
        artifact: file,
        source,
    })
}
