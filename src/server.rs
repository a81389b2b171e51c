//! HTTP surfaces: the prediction form, the predict endpoint and the
//! Prometheus metrics endpoint.

use crate::metrics::AppMetrics;
use crate::model::classifier::OnnxClassifier;
use crate::pipeline::{DeathEventPipeline, SurvivalPipeline};
use crate::types::patient::{CodedPatientRecord, PatientRecord};
use crate::types::prediction::{DeathEventPrediction, SurvivalPrediction};
use anyhow::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

/// Shared state of the `survival-ui` routes
pub struct SurvivalState {
    pub pipeline: SurvivalPipeline<OnnxClassifier>,
    /// Form page, rendered once at startup
    pub page: String,
}

/// Shared state of the `death-event-ui` routes
pub struct DeathEventState {
    pub pipeline: DeathEventPipeline<OnnxClassifier>,
    pub page: String,
}

type JsonError = (StatusCode, Json<serde_json::Value>);

/// Routes for the survival form and prediction endpoint
pub fn survival_router(state: Arc<SurvivalState>) -> Router {
    Router::new()
        .route("/", get(survival_form))
        .route("/predict", post(survival_predict))
        .with_state(state)
}

async fn survival_form(State(state): State<Arc<SurvivalState>>) -> Html<String> {
    Html(state.page.clone())
}

async fn survival_predict(
    State(state): State<Arc<SurvivalState>>,
    Json(record): Json<PatientRecord>,
) -> Result<Json<SurvivalPrediction>, JsonError> {
    state.pipeline.predict(&record).map(Json).map_err(|e| {
        error!(error = %e, "Prediction failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
    })
}

/// Routes for the death-event form and prediction endpoint
pub fn death_event_router(state: Arc<DeathEventState>) -> Router {
    Router::new()
        .route("/", get(death_event_form))
        .route("/predict", post(death_event_predict))
        .with_state(state)
}

async fn death_event_form(State(state): State<Arc<DeathEventState>>) -> Html<String> {
    Html(state.page.clone())
}

async fn death_event_predict(
    State(state): State<Arc<DeathEventState>>,
    Json(record): Json<CodedPatientRecord>,
) -> Result<Json<DeathEventPrediction>, JsonError> {
    state.pipeline.predict(&record).map(Json).map_err(|e| {
        error!(error = %e, "Prediction failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
    })
}

/// Pull-based metrics endpoint, served on its own port
pub fn metrics_router(metrics: Arc<AppMetrics>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(
    State(metrics): State<Arc<AppMetrics>>,
) -> ([(header::HeaderName, &'static str); 1], String) {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics.render(),
    )
}

/// Bind and serve a router until the process exits
pub async fn serve(router: Router, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Listening");
    axum::serve(listener, router).await?;
    Ok(())
}
