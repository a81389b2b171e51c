//! Heart Failure Death Event Prediction - Entry Point
//!
//! Near-duplicate of the survival UI: inputs arrive numeric-coded, the
//! model label is reported directly ("Death Event: Yes"/"Death Event: No")
//! and no metrics are recorded.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use survival_prediction_service::{
    config::AppConfig,
    model::{classifier::OnnxClassifier, loader::ModelLoader},
    pipeline::DeathEventPipeline,
    server::{self, DeathEventState},
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
                .add_directive("death_event_ui=info".parse()?),
        )
        .init();

    info!("Starting Heart Failure Death Event Prediction service");

    // Load configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");

    // Load the pre-trained classifier once at startup
    let loader = ModelLoader::with_threads(config.model.onnx_threads)?;
    let model = loader.load_model(&config.model.path, &config.model.name)?;
    let classifier = OnnxClassifier::new(model);

    let pipeline = DeathEventPipeline::new(classifier);

    let page = ui::death_event_page().render();
    let state = Arc::new(DeathEventState { pipeline, page });

    let bind: std::net::IpAddr = config.server.bind.parse()?;
    let ui_addr = SocketAddr::from((bind, config.server.ui_port));

    info!(addr = %ui_addr, "Serving prediction form");
    server::serve(server::death_event_router(state), ui_addr).await
}
