//! Patient Survival Prediction - Main Entry Point
//!
//! Serves the clinical-record form, runs the survival prediction pipeline
//! against the pre-trained classifier, and exposes Prometheus metrics on a
//! separate port.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use survival_prediction_service::{
    config::AppConfig,
    metrics::AppMetrics,
    model::{classifier::OnnxClassifier, loader::ModelLoader},
    pipeline::SurvivalPipeline,
    server::{self, SurvivalState},
    ui,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("survival_prediction_service=info".parse()?)
                .add_directive("survival_ui=info".parse()?),
        )
        .init();

    info!("Starting Patient Survival Prediction service");

    // Load configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");

    // Initialize metrics
    let metrics = Arc::new(AppMetrics::new());

    // Load the pre-trained classifier once at startup
    let loader = ModelLoader::with_threads(config.model.onnx_threads)?;
    let model = loader.load_model(&config.model.path, &config.model.name)?;
    let classifier = OnnxClassifier::new(model);

    let pipeline = SurvivalPipeline::new(classifier, metrics.clone());

    let page = ui::survival_page().render();
    let state = Arc::new(SurvivalState { pipeline, page });

    let bind: std::net::IpAddr = config.server.bind.parse()?;
    let ui_addr = SocketAddr::from((bind, config.server.ui_port));
    let metrics_addr = SocketAddr::from((bind, config.server.metrics_port));

    // Metrics listener runs beside the UI on its own port
    let metrics_router = server::metrics_router(metrics.clone());
    tokio::spawn(async move {
        if let Err(e) = server::serve(metrics_router, metrics_addr).await {
            tracing::error!(error = %e, "Metrics server terminated");
        }
    });
    info!(addr = %metrics_addr, "Metrics endpoint started");

    info!(addr = %ui_addr, "Serving prediction form");
    let result = server::serve(server::survival_router(state), ui_addr).await;

    info!("Service shutting down...");
    metrics.log_summary();

    result
}
