//! Prediction request pipeline: input normalization, model invocation,
//! output labeling and metrics recording.
//!
//! The two UI variants keep their own label-to-text mappings. `survival-ui`
//! answers the question "does the patient survive?" so model label 1 (death
//! event) displays as "No"; `death-event-ui` reports the model label
//! directly. The mappings stay separate; they answer different questions.

use crate::encoder::FeatureEncoder;
use crate::metrics::AppMetrics;
use crate::model::classifier::Classifier;
use crate::types::patient::{CodedPatientRecord, PatientRecord};
use crate::types::prediction::{DeathEventPrediction, SurvivalPrediction};
use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Sentinel shown when the model returns a label outside {0, 1}
pub const PREDICTION_ERROR: &str = "ERROR while doing prediction!";

/// Pipeline behind `survival-ui`: encode, infer, label, record metrics.
pub struct SurvivalPipeline<C: Classifier> {
    encoder: FeatureEncoder,
    classifier: C,
    metrics: Arc<AppMetrics>,
}

impl<C: Classifier> SurvivalPipeline<C> {
    /// Create a pipeline around a classifier and shared metrics
    pub fn new(classifier: C, metrics: Arc<AppMetrics>) -> Self {
        Self {
            encoder: FeatureEncoder::new(),
            classifier,
            metrics,
        }
    }

    /// Run one prediction.
    ///
    /// The request counter increments before inference; exactly one outcome
    /// counter increments after it (none on the sentinel path); the latency
    /// histogram observes the whole encode+infer+label span, including when
    /// the classifier errors out.
    pub fn predict(&self, record: &PatientRecord) -> Result<SurvivalPrediction> {
        let started = Instant::now();
        self.metrics.inc_requests();

        let features = self.encoder.encode(record);

        let label = match self.classifier.classify(&features) {
            Ok(label) => label,
            Err(e) => {
                self.metrics.observe_latency(started.elapsed());
                return Err(e);
            }
        };

        let survive = match label {
            // DEATH_EVENT=1 means survive='No'
            1 => {
                self.metrics.inc_non_survival();
                "No"
            }
            0 => {
                self.metrics.inc_survival();
                "Yes"
            }
            other => {
                warn!(model = %self.classifier.name(), label = other, "Unexpected model label");
                PREDICTION_ERROR
            }
        };

        self.metrics.observe_latency(started.elapsed());

        debug!(
            model = %self.classifier.name(),
            label = label,
            survive = survive,
            latency_us = started.elapsed().as_micros(),
            "Prediction complete"
        );

        Ok(SurvivalPrediction::new(survive))
    }

    /// The shared metrics handle
    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }
}

/// Pipeline behind `death-event-ui`: the record arrives numeric-coded, so
/// the encoder step is skipped and no metrics are recorded.
pub struct DeathEventPipeline<C: Classifier> {
    classifier: C,
}

impl<C: Classifier> DeathEventPipeline<C> {
    /// Create a pipeline around a classifier
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Run one prediction, reporting the model label directly.
    pub fn predict(&self, record: &CodedPatientRecord) -> Result<DeathEventPrediction> {
        let features = record.feature_row();

        let label = self.classifier.classify(&features)?;

        let text = match label {
            1 => "Death Event: Yes",
            0 => "Death Event: No",
            other => {
                warn!(model = %self.classifier.name(), label = other, "Unexpected model label");
                PREDICTION_ERROR
            }
        };

        debug!(
            model = %self.classifier.name(),
            label = label,
            prediction = text,
            "Prediction complete"
        );

        Ok(DeathEventPrediction::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub classifier returning a fixed label
    struct FixedLabel(i64);

    impl Classifier for FixedLabel {
        fn classify(&self, features: &[f32]) -> Result<i64> {
            assert_eq!(features.len(), 12);
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    /// Stub classifier that always fails
    struct Broken;

    impl Classifier for Broken {
        fn classify(&self, _features: &[f32]) -> Result<i64> {
            anyhow::bail!("inference failed")
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn pipeline(label: i64) -> SurvivalPipeline<FixedLabel> {
        SurvivalPipeline::new(FixedLabel(label), Arc::new(AppMetrics::new()))
    }

    #[test]
    fn test_label_zero_means_survival() {
        let pipeline = pipeline(0);
        let prediction = pipeline.predict(&PatientRecord::default()).unwrap();

        assert_eq!(prediction.survive, "Yes");
        assert_eq!(pipeline.metrics().requests(), 1);
        assert_eq!(pipeline.metrics().survival_predicted(), 1);
        assert_eq!(pipeline.metrics().non_survival_predicted(), 0);
    }

    #[test]
    fn test_label_one_means_no_survival() {
        let pipeline = pipeline(1);
        let prediction = pipeline.predict(&PatientRecord::default()).unwrap();

        assert_eq!(prediction.survive, "No");
        assert_eq!(pipeline.metrics().requests(), 1);
        assert_eq!(pipeline.metrics().survival_predicted(), 0);
        assert_eq!(pipeline.metrics().non_survival_predicted(), 1);
    }

    #[test]
    fn test_unexpected_label_returns_sentinel() {
        let pipeline = pipeline(7);
        let prediction = pipeline.predict(&PatientRecord::default()).unwrap();

        assert_eq!(prediction.survive, PREDICTION_ERROR);
        // Request counter and latency still fire; outcome counters do not.
        assert_eq!(pipeline.metrics().requests(), 1);
        assert_eq!(pipeline.metrics().survival_predicted(), 0);
        assert_eq!(pipeline.metrics().non_survival_predicted(), 0);
        assert_eq!(pipeline.metrics().latency_count(), 1);
    }

    #[test]
    fn test_classifier_error_propagates() {
        let pipeline = SurvivalPipeline::new(Broken, Arc::new(AppMetrics::new()));
        let result = pipeline.predict(&PatientRecord::default());

        assert!(result.is_err());
        assert_eq!(pipeline.metrics().requests(), 1);
        assert_eq!(pipeline.metrics().latency_count(), 1);
        assert_eq!(pipeline.metrics().survival_predicted(), 0);
    }

    #[test]
    fn test_counters_sum_to_requests() {
        let metrics = Arc::new(AppMetrics::new());
        let survives = SurvivalPipeline::new(FixedLabel(0), metrics.clone());
        let dies = SurvivalPipeline::new(FixedLabel(1), metrics.clone());

        let record = PatientRecord::default();
        for _ in 0..3 {
            survives.predict(&record).unwrap();
        }
        for _ in 0..2 {
            dies.predict(&record).unwrap();
        }

        assert_eq!(metrics.requests(), 5);
        assert_eq!(
            metrics.requests(),
            metrics.survival_predicted() + metrics.non_survival_predicted()
        );
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let pipeline = pipeline(0);
        let record = PatientRecord::default();

        let first = pipeline.predict(&record).unwrap();
        let second = pipeline.predict(&record).unwrap();
        assert_eq!(first.survive, second.survive);
    }

    fn coded_record() -> CodedPatientRecord {
        CodedPatientRecord {
            age: 55,
            anaemia: 1,
            creatinine_phosphokinase: 1.1,
            diabetes: 0,
            ejection_fraction: 38,
            high_blood_pressure: 0,
            platelets: 263358.03,
            serum_creatinine: 1.1,
            serum_sodium: 136,
            sex: 1,
            smoking: 0,
            time: 6,
        }
    }

    #[test]
    fn test_death_event_direct_mapping() {
        let pipeline = DeathEventPipeline::new(FixedLabel(1));
        let prediction = pipeline.predict(&coded_record()).unwrap();
        assert_eq!(prediction.prediction, "Death Event: Yes");

        let pipeline = DeathEventPipeline::new(FixedLabel(0));
        let prediction = pipeline.predict(&coded_record()).unwrap();
        assert_eq!(prediction.prediction, "Death Event: No");
    }

    #[test]
    fn test_death_event_sentinel() {
        let pipeline = DeathEventPipeline::new(FixedLabel(-3));
        let prediction = pipeline.predict(&coded_record()).unwrap();
        assert_eq!(prediction.prediction, PREDICTION_ERROR);
    }
}
