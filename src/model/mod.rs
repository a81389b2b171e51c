//! ML model loading and inference components

pub mod classifier;
pub mod loader;

pub use classifier::{Classifier, OnnxClassifier};
pub use loader::ModelLoader;
