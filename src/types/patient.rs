//! Patient record structures for heart-failure survival prediction

use crate::encoder::{Sex, YesNo};
use serde::{Deserialize, Serialize};

/// A heart-failure patient's clinical record as submitted by the
/// `survival-ui` form, with categorical answers still in human-readable
/// form ("Yes"/"No", "M"/"F").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years
    pub age: u32,

    /// Decrease of red blood cells or hemoglobin
    pub anaemia: YesNo,

    /// Level of the CPK enzyme in the blood (mcg/L)
    pub creatinine_phosphokinase: f64,

    /// Has diabetes
    pub diabetes: YesNo,

    /// Percentage of blood leaving the heart at each contraction
    pub ejection_fraction: u32,

    /// Has hypertension/high blood pressure
    pub high_blood_pressure: YesNo,

    /// Platelets in the blood (kiloplatelets/mL)
    pub platelets: f64,

    /// Level of serum creatinine in the blood (mg/dL)
    pub serum_creatinine: f64,

    /// Level of serum sodium in the blood (mEq/L)
    pub serum_sodium: i32,

    /// Patient sex
    pub sex: Sex,

    /// Smokes?
    pub smoking: YesNo,

    /// Follow-up period (days)
    pub time: u32,
}

impl Default for PatientRecord {
    fn default() -> Self {
        Self {
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
        }
    }
}

/// A clinical record as submitted by the `death-event-ui` form, where the
/// categorical fields arrive already numeric-coded (1/0) and no encoding
/// step runs before inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodedPatientRecord {
    /// Age in years
    pub age: u32,

    /// Anaemia code (1 = yes, 0 = no)
    pub anaemia: u8,

    /// Level of the CPK enzyme in the blood
    pub creatinine_phosphokinase: f64,

    /// Diabetes code (1 = yes, 0 = no)
    pub diabetes: u8,

    /// Ejection fraction percentage
    pub ejection_fraction: u32,

    /// High blood pressure code (1 = yes, 0 = no)
    pub high_blood_pressure: u8,

    /// Platelets in the blood
    pub platelets: f64,

    /// Serum creatinine (mg/dL)
    pub serum_creatinine: f64,

    /// Serum sodium (mEq/L)
    pub serum_sodium: i32,

    /// Sex code (1 = male, 0 = female)
    pub sex: u8,

    /// Smoking code (1 = yes, 0 = no)
    pub smoking: u8,

    /// Follow-up period (days)
    pub time: u32,
}

impl CodedPatientRecord {
    /// Assemble the ordered feature row directly from the coded fields.
    pub fn feature_row(&self) -> [f32; crate::encoder::FEATURE_COUNT] {
        [
            self.age as f32,
            self.anaemia as f32,
            self.creatinine_phosphokinase as f32,
            self.diabetes as f32,
            self.ejection_fraction as f32,
            self.high_blood_pressure as f32,
            self.platelets as f32,
            self.serum_creatinine as f32,
            self.serum_sodium as f32,
            self.sex as f32,
            self.smoking as f32,
            self.time as f32,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization() {
        let record = PatientRecord::default();

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: PatientRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record.age, deserialized.age);
        assert_eq!(record.anaemia, deserialized.anaemia);
        assert_eq!(record.platelets, deserialized.platelets);
    }

    #[test]
    fn test_out_of_set_categorical_rejected_at_deserialization() {
        let json = r#"{
            "age": 55, "anaemia": "Maybe", "creatinine_phosphokinase": 1280.25,
            "diabetes": "No", "ejection_fraction": 38, "high_blood_pressure": "No",
            "platelets": 263358.03, "serum_creatinine": 1.1, "serum_sodium": 136,
            "sex": "M", "smoking": "No", "time": 6
        }"#;
        assert!(serde_json::from_str::<PatientRecord>(json).is_err());
    }

    #[test]
    fn test_coded_record_feature_row() {
        let record = CodedPatientRecord {
            age: 60,
            anaemia: 1,
            creatinine_phosphokinase: 2.5,
            diabetes: 0,
            ejection_fraction: 40,
            high_blood_pressure: 1,
            platelets: 250000.0,
            serum_creatinine: 1.2,
            serum_sodium: 137,
            sex: 0,
            smoking: 1,
            time: 120,
        };

        let row = record.feature_row();
        assert_eq!(row.len(), 12);
        assert_eq!(row[0], 60.0);
        assert_eq!(row[1], 1.0);
        assert_eq!(row[9], 0.0);
        assert_eq!(row[11], 120.0);
    }
}
