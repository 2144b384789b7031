use dryweight::assessment::{AssessmentService, RawPatientInput, SharedModel};
use dryweight::config::AppConfig;
use dryweight::error::AppError;
use dryweight::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) model_ready: bool,
}

/// Wires the artifact cache into the service; the load happens once, on first use.
pub(crate) fn build_service(config: &AppConfig) -> AssessmentService {
    match &config.model.artifact_dir {
        Some(dir) => AssessmentService::with_shared_model(
            config.scoring.clone(),
            Arc::new(SharedModel::new(dir)),
        ),
        None => {
            info!("DW_MODEL_DIR not set; tendency model disabled");
            AssessmentService::without_model(config.scoring.clone())
        }
    }
}

/// Installs the stderr subscriber for a one-shot CLI command, then builds its service.
pub(crate) fn cli_service(config: &AppConfig) -> Result<AssessmentService, AppError> {
    telemetry::init(&config.telemetry)?;
    Ok(build_service(config))
}

pub(crate) fn read_input(path: &Path) -> Result<RawPatientInput, AppError> {
    let content = std::fs::read_to_string(path)?;
    let raw = serde_json::from_str(&content)?;
    Ok(raw)
}
