//! Feature encoding for heart-failure survival model inference.
//!
//! This module maps the categorical answers collected by the form to the
//! numeric codes the model was trained on, and assembles the twelve
//! clinical values in the exact column order of the training data.

use crate::types::patient::PatientRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of clinical features the model expects.
pub const FEATURE_COUNT: usize = 12;

/// Two-valued clinical answer ("Yes"/"No").
///
/// The numeric codes are a fixed contract with the trained model: Yes = 1,
/// No = 0. Any other string fails to parse; there is no fallback code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    /// Numeric code the model was trained on.
    pub fn code(self) -> u8 {
        match self {
            YesNo::Yes => 1,
            YesNo::No => 0,
        }
    }
}

impl FromStr for YesNo {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(YesNo::Yes),
            "No" => Ok(YesNo::No),
            other => Err(EncodeError::unknown("yes/no answer", other)),
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YesNo::Yes => f.write_str("Yes"),
            YesNo::No => f.write_str("No"),
        }
    }
}

/// Patient sex as collected by the form ("M"/"F").
///
/// Same fixed contract as [`YesNo`]: M = 1, F = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    M,
    F,
}

impl Sex {
    /// Numeric code the model was trained on.
    pub fn code(self) -> u8 {
        match self {
            Sex::M => 1,
            Sex::F => 0,
        }
    }
}

impl FromStr for Sex {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Sex::M),
            "F" => Ok(Sex::F),
            other => Err(EncodeError::unknown("sex", other)),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::M => f.write_str("M"),
            Sex::F => f.write_str("F"),
        }
    }
}

/// Error for a categorical value outside its closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeError {
    field: &'static str,
    value: String,
}

impl EncodeError {
    fn unknown(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {:?}", self.field, self.value)
    }
}

impl std::error::Error for EncodeError {}

/// Encoder that transforms a patient record into model input features.
///
/// Features are assembled in the exact order expected by the ONNX model,
/// matching the training data columns.
pub struct FeatureEncoder;

impl FeatureEncoder {
    /// Create a new feature encoder.
    pub fn new() -> Self {
        Self
    }

    /// Encode a patient record into the ordered feature row.
    pub fn encode(&self, record: &PatientRecord) -> [f32; FEATURE_COUNT] {
        [
            record.age as f32,
            record.anaemia.code() as f32,
            record.creatinine_phosphokinase as f32,
            record.diabetes.code() as f32,
            record.ejection_fraction as f32,
            record.high_blood_pressure.code() as f32,
            record.platelets as f32,
            record.serum_creatinine as f32,
            record.serum_sodium as f32,
            record.sex.code() as f32,
            record.smoking.code() as f32,
            record.time as f32,
        ]
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    /// Get feature names (matching the training data columns).
    pub fn feature_names(&self) -> Vec<&'static str> {
        vec![
            "age",
            "anaemia",
            "creatinine_phosphokinase",
            "diabetes",
            "ejection_fraction",
            "high_blood_pressure",
            "platelets",
            "serum_creatinine",
            "serum_sodium",
            "sex",
            "smoking",
            "time",
        ]
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_no_codes() {
        assert_eq!(YesNo::Yes.code(), 1);
        assert_eq!(YesNo::No.code(), 0);
        assert_eq!(Sex::M.code(), 1);
        assert_eq!(Sex::F.code(), 0);
    }

    #[test]
    fn test_parse_closed_sets() {
        assert_eq!("Yes".parse::<YesNo>().unwrap(), YesNo::Yes);
        assert_eq!("No".parse::<YesNo>().unwrap(), YesNo::No);
        assert_eq!("M".parse::<Sex>().unwrap(), Sex::M);
        assert_eq!("F".parse::<Sex>().unwrap(), Sex::F);
    }

    #[test]
    fn test_out_of_set_value_is_rejected() {
        assert!("Maybe".parse::<YesNo>().is_err());
        assert!("yes".parse::<YesNo>().is_err());
        assert!("".parse::<YesNo>().is_err());
        assert!("X".parse::<Sex>().is_err());
        assert!("m".parse::<Sex>().is_err());
    }

    #[test]
    fn test_out_of_set_value_fails_deserialization() {
        let result = serde_json::from_str::<YesNo>("\"Maybe\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_reference_record() {
        let encoder = FeatureEncoder::new();
        let record = PatientRecord {
            age: 55,
            anaemia: YesNo::Yes,
            creatinine_phosphokinase: 1280.25,
            diabetes: YesNo::No,
            ejection_fraction: 38,
            high_blood_pressure: YesNo::No,
            platelets: 263358.03,
            serum_creatinine: 1.10,
            serum_sodium: 136,
            sex: Sex::M,
            smoking: YesNo::No,
            time: 6,
        };

        let features = encoder.encode(&record);
        let expected: [f32; FEATURE_COUNT] = [
            55.0, 1.0, 1280.25, 0.0, 38.0, 0.0, 263358.03, 1.10, 136.0, 1.0, 0.0, 6.0,
        ];
        assert_eq!(features, expected);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let encoder = FeatureEncoder::new();
        let record = PatientRecord::default();
        assert_eq!(encoder.encode(&record), encoder.encode(&record));
    }

    #[test]
    fn test_feature_count() {
        let encoder = FeatureEncoder::new();
        assert_eq!(encoder.feature_count(), 12);
        assert_eq!(encoder.feature_names().len(), 12);
    }
}
