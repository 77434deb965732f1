//! Access gate - decides history requests.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. the clinic participates in the exchange
//! 2. the request carries patient consent
//! 3. the request is backed by a booking
//! 4. the balance covers the cost of the requested depth
//!
//! The consent checked here is the request's own flag, not
//! [`Patient::has_consented`](crate::types::Patient). The two are separate
//! inputs.
//!
//! A granted request is charged for the depth it asked for, even when
//! negotiation grants less.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::audit::{AuditLog, LogKind};
use crate::depth::{access_cost, clinic_shared_depth, negotiate};
use crate::directory::PatientDirectory;
use crate::ledger::CreditLedger;
use crate::settings::SettingsStore;
use crate::types::{AccessResult, ClinicSettings, Denial, HistoryRequest, OptInMode};

/// Run the eligibility checks without touching any state.
///
/// # Returns
/// * `Ok(cost)` - credits the request will be charged
/// * `Err(Denial)` - the first failing check
pub fn check(request: &HistoryRequest, settings: &ClinicSettings) -> Result<u32, Denial> {
    if !settings.opt_in_mode.is_participating() {
        return Err(Denial::NotOptedIn);
    }

    if !request.has_consent {
        return Err(Denial::NoConsent);
    }

    if !request.is_booked {
        return Err(Denial::NoBooking);
    }

    let required = access_cost(request.requested_depth);
    if settings.credits < required {
        return Err(Denial::InsufficientCredits {
            required,
            available: settings.credits,
        });
    }

    Ok(required)
}

/// Decide a history request, charging the ledger on success.
///
/// Appends exactly one gate entry to the log: `denied` for a refusal or
/// `info` for a grant. A charged grant is preceded by the ledger's own
/// `spent` entry. A refused request changes nothing but the log.
pub fn evaluate(
    request: &HistoryRequest,
    store: &mut SettingsStore,
    directory: &PatientDirectory,
    log: &mut AuditLog,
) -> AccessResult {
    let cost = match check(request, store.get()) {
        Ok(cost) => cost,
        Err(denial) => {
            debug!(patient_id = %request.patient_id, ?denial, "History request denied");
            log.append(LogKind::Denied, denial.audit_message(), None);
            return AccessResult::denied(denial);
        }
    };

    if directory.get(&request.patient_id).is_none() {
        warn!(patient_id = %request.patient_id, "Unknown patient, negotiating at most restrictive depth");
    }

    let granted = negotiate(
        request.requested_depth,
        directory.allowed_depth(&request.patient_id),
        clinic_shared_depth(store.get().opt_in_mode),
    );

    if cost > 0 {
        // The balance was covered in check() and nothing ran in between.
        let spent = CreditLedger::new(store, log).spend(cost);
        debug_assert!(spent, "balance checked before debit");
    }

    info!(
        patient_id = %request.patient_id,
        requested = %request.requested_depth,
        granted = %granted,
        cost,
        "History access granted"
    );
    log.append(LogKind::Info, format!("History access granted at {} level", granted), None);

    AccessResult::granted(granted)
}

/// One line of the pre-request checklist
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateCheck {
    pub label: String,
    pub passed: bool,
    pub detail: String,
}

/// Report every check for a prospective request without short-circuiting,
/// logging or charging. Listed as the clinic sees them: opted in, booked,
/// consent, credits.
pub fn checklist(request: &HistoryRequest, settings: &ClinicSettings) -> Vec<GateCheck> {
    let required = access_cost(request.requested_depth);

    vec![
        GateCheck {
            label: "Clinic Opted In".to_string(),
            passed: settings.opt_in_mode.is_participating(),
            detail: match settings.opt_in_mode {
                OptInMode::OptedOut => "Your clinic must opt in".to_string(),
                OptInMode::OptInBasic => "Mode: Basic".to_string(),
                OptInMode::OptInFull => "Mode: Full".to_string(),
            },
        },
        GateCheck {
            label: "Patient Booked".to_string(),
            passed: request.is_booked,
            detail: if request.is_booked { "Confirmed appointment" } else { "Booking required" }.to_string(),
        },
        GateCheck {
            label: "Patient Consent".to_string(),
            passed: request.has_consent,
            detail: if request.has_consent { "Consent obtained" } else { "Patient must consent" }.to_string(),
        },
        GateCheck {
            label: "Sufficient Credits".to_string(),
            passed: settings.credits >= required,
            detail: format!("Need {}, have {}", required, settings.credits),
        },
    ]
}
