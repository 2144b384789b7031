use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use super::common::*;

use crate::assessment::router::{assess_handler, assessment_router};
use crate::assessment::service::AssessmentService;
use crate::assessment::scoring::ScoringConfig;

fn service() -> Arc<AssessmentService> {
    Arc::new(AssessmentService::without_model(ScoringConfig::default()))
}

#[tokio::test]
async fn assess_handler_returns_summary() {
    let response = assess_handler(State(service()), axum::Json(reference_patient())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let payload: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(payload["fluid_status"]["status"], "banded");
    assert_eq!(payload["fluid_status"]["band"], "optimal");
    assert_eq!(payload["tendency"]["status"], "unavailable");
}

#[tokio::test]
async fn assessment_route_accepts_sparse_payloads() {
    let response = assessment_router(service())
        .oneshot(
            Request::post("/api/v1/assessments")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"albumin": 3.2, "creatinine": 0}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let payload: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(payload["gnri"]["status"], "unevaluated");
    assert_eq!(payload["nri_jh"]["result"]["status"], "banded");
    assert_eq!(payload["nri_jh"]["components"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let response = assessment_router(service())
        .oneshot(
            Request::post("/api/v1/assessments")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"albumin\": \"high\"}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn config_route_reports_active_cutoffs() {
    let response = assessment_router(service())
        .oneshot(
            Request::get("/api/v1/assessments/config")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let payload: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(payload["nutrition"]["gnri_high_risk_below"], 90.0);
    assert_eq!(payload["cardiac"]["bnp_high_concern_from"], Value::Null);
}
