//! Binary classifier invocation over the loaded ONNX session

use crate::model::loader::LoadedModel;
use anyhow::{Context, Result};
use std::sync::RwLock;
use tracing::debug;

/// A classifier that maps one feature row to a discrete class label.
///
/// The model contract is fixed: a 1x12 numeric matrix in, a length-1
/// sequence of labels in {0, 1} out. The prediction pipeline only depends
/// on this seam, so tests can substitute a stub.
pub trait Classifier: Send + Sync {
    /// Classify a single feature row, returning the raw model label.
    fn classify(&self, features: &[f32]) -> Result<i64>;

    /// Model name for logs.
    fn name(&self) -> &str;
}

/// ONNX Runtime-backed classifier (wrapped in RwLock since `Session::run`
/// takes a mutable receiver)
pub struct OnnxClassifier {
    model: RwLock<LoadedModel>,
    name: String,
}

impl OnnxClassifier {
    /// Wrap a loaded model for inference
    pub fn new(model: LoadedModel) -> Self {
        let name = model.name.clone();
        Self {
            model: RwLock::new(model),
            name,
        }
    }

    /// Extract the class label from model outputs.
    ///
    /// Prefers the named label output as an int64 tensor; falls back to any
    /// int64 tensor, then to arg-max over a probability tensor.
    fn extract_label(
        &self,
        outputs: &ort::session::SessionOutputs,
        label_output: &str,
    ) -> Result<i64> {
        if let Some(output) = outputs.get(label_output) {
            if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                if let Some(&label) = data.first() {
                    debug!(model = %self.name, label = label, "Extracted label tensor");
                    return Ok(label);
                }
            }
        }

        // Fallback: any int64 tensor among the outputs
        for (output_name, output) in outputs.iter() {
            if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                if let Some(&label) = data.first() {
                    debug!(model = %self.name, output = %output_name, label = label, "Extracted label tensor (fallback)");
                    return Ok(label);
                }
            }
        }

        // Last resort: arg-max over a probability tensor
        for (output_name, output) in outputs.iter() {
            if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
                let label = match data.len() {
                    0 => continue,
                    1 => i64::from(data[0] >= 0.5),
                    _ => {
                        let mut best = 0usize;
                        for (i, &p) in data.iter().enumerate() {
                            if p > data[best] {
                                best = i;
                            }
                        }
                        best as i64
                    }
                };
                debug!(model = %self.name, output = %output_name, label = label, "Derived label from probabilities");
                return Ok(label);
            }
        }

        anyhow::bail!("No label output found in model outputs")
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, features: &[f32]) -> Result<i64> {
        use ort::value::Tensor;

        // Prepare input tensor - shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor =
            Tensor::from_array((shape, features.to_vec())).context("Failed to create input tensor")?;

        let mut model = self
            .model
            .write()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        let label_output = model.label_output.clone();
        let input_name = model.input_name.clone();

        let outputs = model.session.run(ort::inputs![input_name => input_tensor])?;

        self.extract_label(&outputs, &label_output)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
