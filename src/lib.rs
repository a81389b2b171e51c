//! Patient Survival Prediction Library
//!
//! Predicts survival of a heart-failure patient from twelve clinical
//! features using a pre-trained ONNX classifier. Two UI variants share
//! this library: `survival-ui` (categorical inputs, Prometheus metrics)
//! and `death-event-ui` (numeric-coded inputs, no metrics).

pub mod config;
pub mod encoder;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod server;
pub mod types;
pub mod ui;

pub use config::AppConfig;
pub use encoder::FeatureEncoder;
pub use metrics::AppMetrics;
pub use model::classifier::{Classifier, OnnxClassifier};
pub use pipeline::{DeathEventPipeline, SurvivalPipeline};
pub use types::patient::{CodedPatientRecord, PatientRecord};
