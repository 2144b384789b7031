use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::domain::RawPatientInput;
use super::service::AssessmentService;
use super::summary::EvaluationSummary;

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read patient export: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid patient CSV data: {}", err),
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One evaluated CSV row; `row` is 1-based and excludes the header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    pub row: usize,
    pub summary: EvaluationSummary,
}

/// Reads patient exports whose headers are named after [`RawPatientInput`] fields.
///
/// Blank cells deserialize to `None`; unknown columns are ignored.
pub struct BatchImporter;

impl BatchImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawPatientInput>, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RawPatientInput>, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for record in csv_reader.deserialize::<RawPatientInput>() {
            records.push(record?);
        }

        Ok(records)
    }

    pub fn assess_all(service: &AssessmentService, records: &[RawPatientInput]) -> Vec<BatchRow> {
        let rows: Vec<BatchRow> = records
            .iter()
            .enumerate()
            .map(|(index, raw)| BatchRow {
                row: index + 1,
                summary: service.assess(raw),
            })
            .collect();

        info!(rows = rows.len(), "batch assessment completed");
        rows
    }
}
