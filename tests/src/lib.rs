//! Continuity Exchange Test Suite
//!
//! Scenario and property tests against the public engine API:
//! - Access gate ordering and denials
//! - Credit ledger balance invariants
//! - Encounter publishing rewards and trust score
//! - Judgment Shield and Switching Shield redaction
//! - Atomic check-then-spend under concurrent requests
//! - Walkthrough session handling

pub mod disclosure;

use chrono::NaiveDate;
use continuity_exchange_engine::{
    EncounterDraft, ExchangeConfig, ExchangeEngine, HistoryDepth, HistoryRequest, OptInMode,
};

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Engine over the demonstration session, with the clinic set to `mode`
/// and funded with `credits`. The log is empty on return.
pub fn engine_with(mode: OptInMode, credits: u32) -> ExchangeEngine {
    let mut config = ExchangeConfig::default();
    config.clinic.opt_in_mode = mode;
    config.clinic.credits = credits;
    ExchangeEngine::new(config).expect("default config is valid")
}

/// A booked, consented request for `patient_id`
pub fn request(patient_id: &str, depth: HistoryDepth) -> HistoryRequest {
    HistoryRequest {
        patient_id: patient_id.to_string(),
        is_booked: true,
        has_consent: true,
        requested_depth: depth,
    }
}

/// A publishable draft for patient p1
pub fn draft(depth: HistoryDepth) -> EncounterDraft {
    EncounterDraft {
        patient_id: "p1".to_string(),
        patient_name: "Sarah Johnson".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 2, 20).expect("valid date"),
        diagnosis: "Cervicalgia".to_string(),
        diagnosis_code: "M54.2".to_string(),
        body_region: "Neck".to_string(),
        specialty: "Orthopedic".to_string(),
        interventions: vec!["Manual Therapy".to_string(), "Postural Training".to_string()],
        outcome_score: 68,
        contraindications: vec!["No cervical manipulation".to_string()],
        red_flags: vec![],
        allergies: vec!["Latex".to_string()],
        private_note: "Suspect poor sleep is driving symptoms; revisit next visit.".to_string(),
        shared_depth: depth,
    }
}
