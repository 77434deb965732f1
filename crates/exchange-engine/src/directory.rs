//! Read-only patient directory

use std::collections::HashMap;

use crate::types::{HistoryDepth, Patient};

/// Depth assumed for a patient the directory does not know
pub const UNKNOWN_PATIENT_DEPTH: HistoryDepth = HistoryDepth::Glance;

/// Patient consent and disclosure records, keyed by patient id.
#[derive(Clone, Debug, Default)]
pub struct PatientDirectory {
    patients: Vec<Patient>,
    index: HashMap<String, usize>,
}

impl PatientDirectory {
    /// Build a directory. On duplicate ids the first record wins; config
    /// validation rejects duplicates before this point.
    pub fn new(patients: Vec<Patient>) -> Self {
        let mut index = HashMap::with_capacity(patients.len());
        for (i, patient) in patients.iter().enumerate() {
            index.entry(patient.id.clone()).or_insert(i);
        }
        Self { patients, index }
    }

    pub fn get(&self, patient_id: &str) -> Option<&Patient> {
        self.index.get(patient_id).map(|&i| &self.patients[i])
    }

    /// Depth the patient allows, falling back to the most restrictive
    /// depth when the patient is unknown
    pub fn allowed_depth(&self, patient_id: &str) -> HistoryDepth {
        self.get(patient_id)
            .map(|p| p.allowed_depth)
            .unwrap_or(UNKNOWN_PATIENT_DEPTH)
    }

    /// Whether the patient lets contributing clinics be named. Unknown
    /// patients never do.
    pub fn allows_origin_visible(&self, patient_id: &str) -> bool {
        self.get(patient_id).map(|p| p.allow_origin_visible).unwrap_or(false)
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}
