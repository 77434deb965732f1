//! Session configuration
//!
//! Describes the clinic's starting settings, the patient directory and any
//! encounters already on the exchange. The default reproduces the exchange's
//! demonstration session.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ExchangeError, ExchangeResult};
use crate::settings::MAX_TRUST_SCORE;
use crate::types::{ClinicSettings, Encounter, HistoryDepth, OptInMode, OriginVisibility, Patient};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeConfig {
    /// Settings the clinic starts each session with
    pub clinic: ClinicSettings,
    #[serde(default)]
    pub patients: Vec<Patient>,
    /// Encounters already in the exchange. Records owned by other clinics
    /// are only ever read back as redacted views.
    #[serde(default)]
    pub seed_encounters: Vec<Encounter>,
}

impl ExchangeConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> ExchangeResult<Self> {
        let config: ExchangeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> ExchangeResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ExchangeError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> ExchangeResult<()> {
        if self.clinic.name.trim().is_empty() {
            return Err(ExchangeError::InvalidConfig("clinic name is required".to_string()));
        }

        if self.clinic.trust_score > MAX_TRUST_SCORE {
            return Err(ExchangeError::InvalidConfig(format!(
                "trust score {} exceeds {}",
                self.clinic.trust_score, MAX_TRUST_SCORE
            )));
        }

        let mut ids = HashSet::new();
        for patient in &self.patients {
            if !ids.insert(patient.id.as_str()) {
                return Err(ExchangeError::InvalidConfig(format!(
                    "duplicate patient id {}",
                    patient.id
                )));
            }
        }

        for encounter in &self.seed_encounters {
            if !ids.contains(encounter.patient_id.as_str()) {
                return Err(ExchangeError::InvalidConfig(format!(
                    "seed encounter {} references unknown patient {}",
                    encounter.id, encounter.patient_id
                )));
            }
        }

        Ok(())
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            clinic: ClinicSettings {
                name: "Wellness Physical Therapy".to_string(),
                opt_in_mode: OptInMode::OptedOut,
                origin_visibility: OriginVisibility::Masked,
                credits: 0,
                trust_score: 50,
            },
            patients: vec![
                patient("p1", "Sarah Johnson", (1985, 3, 15), true, HistoryDepth::Full, false),
                patient("p2", "Michael Chen", (1978, 8, 22), true, HistoryDepth::Summary, true),
                patient("p3", "Emily Rodriguez", (1992, 11, 30), false, HistoryDepth::Glance, false),
            ],
            seed_encounters: vec![
                Encounter {
                    id: "e1".to_string(),
                    patient_id: "p1".to_string(),
                    patient_name: "Sarah Johnson".to_string(),
                    date: date((2024, 1, 15)),
                    diagnosis: "Lumbar Disc Herniation".to_string(),
                    diagnosis_code: "M51.16".to_string(),
                    body_region: "Lower Back".to_string(),
                    specialty: "Orthopedic".to_string(),
                    interventions: strings(&["Manual Therapy", "Therapeutic Exercise", "Patient Education"]),
                    outcome_score: 75,
                    contraindications: strings(&["Avoid heavy lifting", "No high-impact activities"]),
                    red_flags: vec![],
                    allergies: strings(&["Latex"]),
                    private_note: "Patient mentioned stress at work affecting recovery. Consider referral to counseling."
                        .to_string(),
                    source_clinic: "Metro Spine Center".to_string(),
                    source_clinic_masked: true,
                    shared_depth: HistoryDepth::Full,
                    is_published: true,
                    redact_private_note: true,
                },
                Encounter {
                    id: "e2".to_string(),
                    patient_id: "p2".to_string(),
                    patient_name: "Michael Chen".to_string(),
                    date: date((2024, 1, 10)),
                    diagnosis: "Rotator Cuff Tendinopathy".to_string(),
                    diagnosis_code: "M75.10".to_string(),
                    body_region: "Shoulder".to_string(),
                    specialty: "Sports Medicine".to_string(),
                    interventions: strings(&["Ultrasound Therapy", "Strengthening Exercises"]),
                    outcome_score: 60,
                    contraindications: strings(&["Avoid overhead movements"]),
                    red_flags: strings(&["Night pain - monitor for progression"]),
                    allergies: vec![],
                    private_note: "Competing in local tennis league, very motivated.".to_string(),
                    source_clinic: "Athletic Recovery Clinic".to_string(),
                    source_clinic_masked: false,
                    shared_depth: HistoryDepth::Summary,
                    is_published: true,
                    redact_private_note: true,
                },
            ],
        }
    }
}

fn date((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn patient(
    id: &str,
    name: &str,
    dob: (i32, u32, u32),
    has_consented: bool,
    allowed_depth: HistoryDepth,
    allow_origin_visible: bool,
) -> Patient {
    Patient {
        id: id.to_string(),
        name: name.to_string(),
        date_of_birth: date(dob),
        has_consented,
        allowed_depth,
        allow_origin_visible,
    }
}
