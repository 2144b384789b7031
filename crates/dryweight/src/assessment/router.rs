use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use super::domain::RawPatientInput;
use super::service::AssessmentService;

/// Router builder exposing assessment endpoints.
pub fn assessment_router(service: Arc<AssessmentService>) -> Router {
    Router::new()
        .route("/api/v1/assessments", post(assess_handler))
        .route("/api/v1/assessments/config", get(config_handler))
        .with_state(service)
}

pub(crate) async fn assess_handler(
    State(service): State<Arc<AssessmentService>>,
    axum::Json(raw): axum::Json<RawPatientInput>,
) -> Response {
    let summary = service.assess(&raw);
    (StatusCode::OK, axum::Json(summary)).into_response()
}

pub(crate) async fn config_handler(State(service): State<Arc<AssessmentService>>) -> Response {
    (StatusCode::OK, axum::Json(service.config().clone())).into_response()
}
