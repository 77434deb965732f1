//! Encounter publisher
//!
//! Turns the owning clinic's documented encounter into a published record
//! and pays the contribution reward.

use tracing::info;

use crate::audit::AuditLog;
use crate::depth::publish_reward;
use crate::error::{ExchangeError, ExchangeResult};
use crate::ledger::CreditLedger;
use crate::settings::SettingsStore;
use crate::types::{Encounter, EncounterDraft, OriginVisibility};

/// Trust gained per published encounter
pub const TRUST_PER_PUBLISH: u8 = 2;

/// Highest outcome score a draft may carry
pub const MAX_OUTCOME_SCORE: u8 = 100;

/// Reject drafts that are missing the fields a shareable summary needs
pub fn validate_draft(draft: &EncounterDraft) -> ExchangeResult<()> {
    let required = [
        ("patient id", &draft.patient_id),
        ("diagnosis code", &draft.diagnosis_code),
        ("body region", &draft.body_region),
        ("specialty", &draft.specialty),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ExchangeError::InvalidDraft(format!("{} is required", field)));
        }
    }

    if draft.interventions.iter().all(|i| i.trim().is_empty()) {
        return Err(ExchangeError::InvalidDraft(
            "at least one intervention is required".to_string(),
        ));
    }

    if draft.outcome_score > MAX_OUTCOME_SCORE {
        return Err(ExchangeError::InvalidDraft(format!(
            "outcome score {} exceeds {}",
            draft.outcome_score, MAX_OUTCOME_SCORE
        )));
    }

    Ok(())
}

/// Publish a draft on behalf of the clinic in `store`.
///
/// The record is stamped with the clinic's name and masked according to its
/// current origin visibility. `private_note` stays on the record and is
/// flagged for redaction; read paths strip it.
///
/// An invalid draft is rejected before any state changes.
pub fn publish(draft: EncounterDraft, store: &mut SettingsStore, log: &mut AuditLog) -> ExchangeResult<Encounter> {
    validate_draft(&draft)?;

    let settings = store.get();
    let redact_private_note = !draft.private_note.trim().is_empty();
    let encounter = Encounter {
        id: format!("e-{}", uuid::Uuid::new_v4()),
        patient_id: draft.patient_id,
        patient_name: draft.patient_name,
        date: draft.date,
        diagnosis: draft.diagnosis,
        diagnosis_code: draft.diagnosis_code,
        body_region: draft.body_region,
        specialty: draft.specialty,
        interventions: draft.interventions,
        outcome_score: draft.outcome_score,
        contraindications: draft.contraindications,
        red_flags: draft.red_flags,
        allergies: draft.allergies,
        private_note: draft.private_note,
        source_clinic: settings.name.clone(),
        source_clinic_masked: settings.origin_visibility == OriginVisibility::Masked,
        shared_depth: draft.shared_depth,
        is_published: true,
        redact_private_note,
    };

    let reward = publish_reward(encounter.shared_depth);
    CreditLedger::new(store, log).earn_with_message(
        reward,
        format!(
            "Published encounter summary and earned {} Continuity Credits",
            reward
        ),
    );
    let trust_score = store.raise_trust(TRUST_PER_PUBLISH);

    info!(
        encounter_id = %encounter.id,
        patient_id = %encounter.patient_id,
        shared_depth = %encounter.shared_depth,
        reward,
        trust_score,
        "Encounter published"
    );

    Ok(encounter)
}
