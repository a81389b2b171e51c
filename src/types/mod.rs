//! Type definitions for the prediction service

pub mod patient;
pub mod prediction;

pub use patient::{CodedPatientRecord, PatientRecord};
pub use prediction::{DeathEventPrediction, SurvivalPrediction};
