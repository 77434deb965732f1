//! Core exchange types
//!
//! Wire shapes use camelCase field names and the kebab-case symbols the
//! exchange has always used for depths, modes and visibility.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Disclosure depth of a shared history.
///
/// Variants are declared in ascending order so the derived `Ord` is the
/// disclosure ordinal: `Glance < Summary < Full`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryDepth {
    /// Specialty, date, body region, red flags and allergies
    Glance,
    /// Adds diagnosis and interventions
    Summary,
    /// Adds outcome score and contraindications
    Full,
}

impl HistoryDepth {
    /// All depths in ascending order
    pub const ALL: [HistoryDepth; 3] = [HistoryDepth::Glance, HistoryDepth::Summary, HistoryDepth::Full];

    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryDepth::Glance => "glance",
            HistoryDepth::Summary => "summary",
            HistoryDepth::Full => "full",
        }
    }
}

impl std::fmt::Display for HistoryDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clinic participation mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptInMode {
    #[serde(rename = "opted-out", alias = "opt-out")]
    OptedOut,
    #[serde(rename = "opt-in-basic")]
    OptInBasic,
    #[serde(rename = "opt-in-full")]
    OptInFull,
}

impl OptInMode {
    pub fn is_participating(&self) -> bool {
        !matches!(self, OptInMode::OptedOut)
    }

    /// Human-readable label used in audit messages
    pub fn label(&self) -> &'static str {
        match self {
            OptInMode::OptedOut => "Opted Out",
            OptInMode::OptInBasic => "Basic Sharing",
            OptInMode::OptInFull => "Full Sharing",
        }
    }
}

/// Whether a contributing clinic's identity is shown to requesters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OriginVisibility {
    Masked,
    VisibleIfAllowed,
}

impl OriginVisibility {
    pub fn label(&self) -> &'static str {
        match self {
            OriginVisibility::Masked => "Masked",
            OriginVisibility::VisibleIfAllowed => "Visible if patient allows",
        }
    }
}

/// Snapshot of a clinic's exchange settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicSettings {
    pub name: String,
    pub opt_in_mode: OptInMode,
    pub origin_visibility: OriginVisibility,
    pub credits: u32,
    pub trust_score: u8,
}

/// Patient consent and disclosure-permission record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub has_consented: bool,
    pub allowed_depth: HistoryDepth,
    pub allow_origin_visible: bool,
}

/// A documented encounter as submitted by the owning clinic, before publishing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterDraft {
    pub patient_id: String,
    pub patient_name: String,
    pub date: NaiveDate,
    pub diagnosis: String,
    pub diagnosis_code: String,
    pub body_region: String,
    pub specialty: String,
    pub interventions: Vec<String>,
    pub outcome_score: u8,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    /// Clinician-only note. Never leaves the owning clinic.
    #[serde(default)]
    pub private_note: String,
    pub shared_depth: HistoryDepth,
}

/// A published encounter record.
///
/// This is the owning clinic's full record and still carries `private_note`.
/// Anything leaving the clinic must go through
/// [`HistoryView`](crate::disclosure::HistoryView).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub date: NaiveDate,
    pub diagnosis: String,
    pub diagnosis_code: String,
    pub body_region: String,
    pub specialty: String,
    pub interventions: Vec<String>,
    pub outcome_score: u8,
    pub contraindications: Vec<String>,
    pub red_flags: Vec<String>,
    pub allergies: Vec<String>,
    pub private_note: String,
    pub source_clinic: String,
    pub source_clinic_masked: bool,
    pub shared_depth: HistoryDepth,
    pub is_published: bool,
    /// Set when `private_note` holds content that read paths must redact
    #[serde(default)]
    pub redact_private_note: bool,
}

/// Incoming history request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest {
    pub patient_id: String,
    pub is_booked: bool,
    pub has_consent: bool,
    pub requested_depth: HistoryDepth,
}

impl HistoryRequest {
    /// Build a request from a booking.
    ///
    /// Only a confirmed booking counts as booked. Consent is taken from the
    /// patient record; an unknown patient has not consented.
    pub fn from_booking(booking: &Booking, patient: Option<&Patient>, requested_depth: HistoryDepth) -> Self {
        Self {
            patient_id: booking.patient_id.clone(),
            is_booked: booking.status == BookingStatus::Confirmed,
            has_consent: patient.map(|p| p.has_consented).unwrap_or(false),
            requested_depth,
        }
    }
}

/// Business-rule reason a history request was refused
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Denial {
    NotOptedIn,
    NoConsent,
    NoBooking,
    InsufficientCredits { required: u32, available: u32 },
}

impl Denial {
    /// Reason returned to the requesting clinic
    pub fn reason(&self) -> String {
        match self {
            Denial::NotOptedIn => "Your clinic must opt in to access shared histories".to_string(),
            Denial::NoConsent => "Patient consent is required to view history".to_string(),
            Denial::NoBooking => "A confirmed booking is required to access history".to_string(),
            Denial::InsufficientCredits { required, available } => {
                format!("You need {} credits. Current balance: {}", required, available)
            }
        }
    }

    /// Message recorded in the audit log
    pub fn audit_message(&self) -> String {
        match self {
            Denial::NotOptedIn => "Access denied: Your clinic has not opted in to the exchange".to_string(),
            Denial::NoConsent => "Access denied: Patient has not provided consent".to_string(),
            Denial::NoBooking => "Access denied: No active booking exists".to_string(),
            Denial::InsufficientCredits { required, available } => format!(
                "Access denied: Insufficient credits (need {}, have {})",
                required, available
            ),
        }
    }
}

/// Outcome of a history request.
///
/// `granted_depth` is present iff `allowed`; `reason` is present iff not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessResult {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_depth: Option<HistoryDepth>,
    /// Typed denial, kept off the wire
    #[serde(skip)]
    pub denial: Option<Denial>,
}

impl AccessResult {
    pub fn granted(depth: HistoryDepth) -> Self {
        Self {
            allowed: true,
            reason: None,
            granted_depth: Some(depth),
            denial: None,
        }
    }

    pub fn denied(denial: Denial) -> Self {
        Self {
            allowed: false,
            reason: Some(denial.reason()),
            granted_depth: None,
            denial: Some(denial),
        }
    }
}

/// Appointment status of a booking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

/// A patient appointment at the requesting clinic
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub patient_id: String,
    pub start_at: DateTime<Utc>,
    pub reason: String,
    pub status: BookingStatus,
}
