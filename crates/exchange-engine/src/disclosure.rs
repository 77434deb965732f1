//! Redacted history views
//!
//! The only shape in which an encounter leaves its owning clinic. A view is
//! projected for a granted depth:
//!
//! - glance: specialty, date, body region, red flags, allergies
//! - summary: adds diagnosis and interventions
//! - full: adds outcome score and contraindications
//!
//! The private clinician note is never part of a view. The contributing
//! clinic is named only when the record is unmasked and the patient allows it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::directory::PatientDirectory;
use crate::types::{Encounter, HistoryDepth};

/// Diagnosis and treatment, disclosed from summary depth
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetail {
    pub diagnosis: String,
    pub diagnosis_code: String,
    pub interventions: Vec<String>,
}

/// Outcomes, disclosed at full depth only
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullDetail {
    pub outcome_score: u8,
    pub contraindications: Vec<String>,
}

/// An encounter as seen by a requesting clinic
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub encounter_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub date: NaiveDate,
    pub specialty: String,
    pub body_region: String,
    pub red_flags: Vec<String>,
    pub allergies: Vec<String>,
    /// Contributing clinic, or `None` when shielded
    pub source_clinic: Option<String>,
    pub depth: HistoryDepth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<FullDetail>,
}

impl HistoryView {
    /// Project `encounter` at `depth` for a requester. `patient_allows_origin`
    /// is the patient's own permission to name contributing clinics.
    pub fn project(encounter: &Encounter, depth: HistoryDepth, patient_allows_origin: bool) -> Self {
        let origin_visible = !encounter.source_clinic_masked && patient_allows_origin;

        Self {
            encounter_id: encounter.id.clone(),
            patient_id: encounter.patient_id.clone(),
            patient_name: encounter.patient_name.clone(),
            date: encounter.date,
            specialty: encounter.specialty.clone(),
            body_region: encounter.body_region.clone(),
            red_flags: encounter.red_flags.clone(),
            allergies: encounter.allergies.clone(),
            source_clinic: origin_visible.then(|| encounter.source_clinic.clone()),
            depth,
            summary: (depth >= HistoryDepth::Summary).then(|| SummaryDetail {
                diagnosis: encounter.diagnosis.clone(),
                diagnosis_code: encounter.diagnosis_code.clone(),
                interventions: encounter.interventions.clone(),
            }),
            full: (depth >= HistoryDepth::Full).then(|| FullDetail {
                outcome_score: encounter.outcome_score,
                contraindications: encounter.contraindications.clone(),
            }),
        }
    }
}

/// Project every published encounter for `patient_id`, in store order.
pub(crate) fn history_for<'a>(
    encounters: impl IntoIterator<Item = &'a Encounter>,
    patient_id: &str,
    depth: HistoryDepth,
    directory: &PatientDirectory,
) -> Vec<HistoryView> {
    let patient_allows_origin = directory.allows_origin_visible(patient_id);
    encounters
        .into_iter()
        .filter(|e| e.patient_id == patient_id && e.is_published)
        .map(|e| HistoryView::project(e, depth, patient_allows_origin))
        .collect()
}
