//! Dry-weight (DW) assessment engine for haemodialysis patients.
//!
//! Raw vitals and lab values flow one way: they are normalised into a
//! [`assessment::PatientInput`] plus [`assessment::DerivedValues`], scored by
//! independent classifiers, and merged into an [`assessment::EvaluationSummary`].

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
