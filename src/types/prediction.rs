//! Prediction response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response body returned by the `survival-ui` prediction endpoint.
///
/// `survive` carries the display string shown in the "Survive" output box:
/// "Yes", "No", or the sentinel error text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivalPrediction {
    /// Unique prediction identifier, for log correlation only
    pub prediction_id: String,

    /// Display string for the "Survive" output
    pub survive: String,

    /// Prediction timestamp
    pub timestamp: DateTime<Utc>,
}

impl SurvivalPrediction {
    pub fn new(survive: impl Into<String>) -> Self {
        Self {
            prediction_id: uuid::Uuid::new_v4().to_string(),
            survive: survive.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Response body returned by the `death-event-ui` prediction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeathEventPrediction {
    /// Unique prediction identifier, for log correlation only
    pub prediction_id: String,

    /// Display string, e.g. "Death Event: Yes"
    pub prediction: String,

    /// Prediction timestamp
    pub timestamp: DateTime<Utc>,
}

impl DeathEventPrediction {
    pub fn new(prediction: impl Into<String>) -> Self {
        Self {
            prediction_id: uuid::Uuid::new_v4().to_string(),
            prediction: prediction.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_serialization() {
        let prediction = SurvivalPrediction::new("Yes");

        let json = serde_json::to_string(&prediction).unwrap();
        let deserialized: SurvivalPrediction = serde_json::from_str(&json).unwrap();

        assert_eq!(prediction.prediction_id, deserialized.prediction_id);
        assert_eq!(deserialized.survive, "Yes");
    }

    #[test]
    fn test_prediction_ids_are_unique() {
        let a = SurvivalPrediction::new("Yes");
        let b = SurvivalPrediction::new("Yes");
        assert_ne!(a.prediction_id, b.prediction_id);
    }
}
