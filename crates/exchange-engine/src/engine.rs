//! Exchange engine
//!
//! Owns one clinic's session: settings, patient directory, encounter store,
//! access grants and audit log. Every operation takes `&mut self` and runs to
//! completion, so the gate's credit check and the ledger debit it leads to
//! are a single step. [`SharedExchange`] carries the same guarantee across
//! threads.
//!
//! Full [`Encounter`] records, private notes included, are handed out only
//! for this clinic's own encounters. Everything else leaves the engine as a
//! [`HistoryView`], and only for a patient the gate has granted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;

use crate::audit::{AuditLog, LogEntry, LogKind};
use crate::config::ExchangeConfig;
use crate::directory::PatientDirectory;
use crate::disclosure::{history_for, HistoryView};
use crate::error::{ExchangeError, ExchangeResult};
use crate::gate::{self, GateCheck};
use crate::ledger::CreditLedger;
use crate::publisher;
use crate::settings::SettingsStore;
use crate::types::{
    AccessResult, ClinicSettings, Encounter, EncounterDraft, HistoryDepth, HistoryRequest, OptInMode,
    OriginVisibility, Patient,
};

pub struct ExchangeEngine {
    initial: ClinicSettings,
    settings: SettingsStore,
    directory: PatientDirectory,
    /// Newest first, this clinic's and other clinics' records together
    encounters: Vec<Encounter>,
    /// Latest granted depth per patient for this session
    grants: HashMap<String, HistoryDepth>,
    log: AuditLog,
}

impl ExchangeEngine {
    /// Start a session from a validated configuration
    pub fn new(config: ExchangeConfig) -> ExchangeResult<Self> {
        config.validate()?;
        let ExchangeConfig {
            clinic,
            patients,
            seed_encounters,
        } = config;

        Ok(Self {
            initial: clinic.clone(),
            settings: SettingsStore::new(clinic),
            directory: PatientDirectory::new(patients),
            encounters: seed_encounters,
            grants: HashMap::new(),
            log: AuditLog::new(),
        })
    }

    pub fn settings(&self) -> &ClinicSettings {
        self.settings.get()
    }

    pub fn patients(&self) -> &[Patient] {
        self.directory.patients()
    }

    pub fn patient(&self, patient_id: &str) -> Option<&Patient> {
        self.directory.get(patient_id)
    }

    fn is_own(&self, encounter: &Encounter) -> bool {
        encounter.source_clinic == self.settings.get().name
    }

    /// This clinic's own encounter records, newest first, private notes included
    pub fn own_encounters(&self) -> Vec<&Encounter> {
        self.encounters.iter().filter(|e| self.is_own(e)).collect()
    }

    /// Look up one of this clinic's own records by id. Records contributed by
    /// other clinics are reported as unknown.
    pub fn encounter(&self, encounter_id: &str) -> ExchangeResult<&Encounter> {
        self.encounters
            .iter()
            .find(|e| e.id == encounter_id && self.is_own(e))
            .ok_or_else(|| ExchangeError::UnknownEncounter(encounter_id.to_string()))
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.log
    }

    /// Decide a history request and charge for it if granted. A grant
    /// replaces any earlier grant for the same patient.
    pub fn request_history(&mut self, request: &HistoryRequest) -> AccessResult {
        let result = gate::evaluate(request, &mut self.settings, &self.directory, &mut self.log);
        if let Some(depth) = result.granted_depth {
            self.grants.insert(request.patient_id.clone(), depth);
        }
        result
    }

    /// Depth granted for `patient_id` in this session, if any
    pub fn granted_depth(&self, patient_id: &str) -> Option<HistoryDepth> {
        self.grants.get(patient_id).copied()
    }

    /// Preview the gate checks for a request without deciding it
    pub fn checklist(&self, request: &HistoryRequest) -> Vec<GateCheck> {
        gate::checklist(request, self.settings.get())
    }

    /// Publish a documented encounter and collect the contribution reward
    pub fn publish_encounter(&mut self, draft: EncounterDraft) -> ExchangeResult<Encounter> {
        let encounter = publisher::publish(draft, &mut self.settings, &mut self.log)?;
        self.encounters.insert(0, encounter.clone());
        Ok(encounter)
    }

    /// Debit credits outside a request flow. Returns whether the debit occurred.
    pub fn spend_credits(&mut self, amount: u32) -> bool {
        CreditLedger::new(&mut self.settings, &mut self.log).spend(amount)
    }

    /// Credit the balance outside a publish flow
    pub fn earn_credits(&mut self, amount: u32) {
        CreditLedger::new(&mut self.settings, &mut self.log).earn(amount);
    }

    pub fn set_opt_in_mode(&mut self, mode: OptInMode) -> LogEntry {
        self.settings.set_opt_in_mode(mode);
        info!(mode = mode.label(), "Participation mode changed");
        self.log
            .append(LogKind::Info, format!("Clinic changed to {}", mode.label()), None)
    }

    pub fn set_origin_visibility(&mut self, visibility: OriginVisibility) -> LogEntry {
        self.settings.set_origin_visibility(visibility);
        info!(visibility = visibility.label(), "Origin visibility changed");
        self.log.append(
            LogKind::Info,
            format!("Origin visibility set to {}", visibility.label()),
            None,
        )
    }

    /// Redacted published history for a patient, projected at the depth the
    /// gate granted. Fails with [`ExchangeError::NoGrant`] when no request
    /// for the patient has been granted this session.
    pub fn history_view(&self, patient_id: &str) -> ExchangeResult<Vec<HistoryView>> {
        let depth = self
            .granted_depth(patient_id)
            .ok_or_else(|| ExchangeError::NoGrant(patient_id.to_string()))?;
        Ok(history_for(&self.encounters, patient_id, depth, &self.directory))
    }

    /// Begin a new session: initial settings, opted out with no credits and
    /// an empty log. `opening` is recorded as the first entry.
    pub fn reset_session(&mut self, opening: Option<&str>) {
        let mut settings = self.initial.clone();
        settings.opt_in_mode = OptInMode::OptedOut;
        settings.credits = 0;
        self.settings = SettingsStore::new(settings);
        self.grants.clear();
        self.log = AuditLog::new();
        if let Some(message) = opening {
            self.log.append(LogKind::Info, message, None);
        }
        info!("Exchange session reset");
    }

    /// Restore the configured initial settings with an empty log
    pub fn restore_initial(&mut self) {
        self.settings = SettingsStore::new(self.initial.clone());
        self.grants.clear();
        self.log = AuditLog::new();
        info!("Exchange settings restored");
    }
}

/// Thread-safe handle over one engine.
///
/// Each call holds the lock for the whole operation, so two concurrent
/// requests cannot both pass the credit check on the same balance.
#[derive(Clone)]
pub struct SharedExchange {
    inner: Arc<Mutex<ExchangeEngine>>,
}

impl SharedExchange {
    pub fn new(engine: ExchangeEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> ExchangeResult<MutexGuard<'_, ExchangeEngine>> {
        self.inner.lock().map_err(|_| ExchangeError::LockPoisoned)
    }

    pub fn request_history(&self, request: &HistoryRequest) -> ExchangeResult<AccessResult> {
        Ok(self.lock()?.request_history(request))
    }

    pub fn publish_encounter(&self, draft: EncounterDraft) -> ExchangeResult<Encounter> {
        self.lock()?.publish_encounter(draft)
    }

    pub fn spend_credits(&self, amount: u32) -> ExchangeResult<bool> {
        Ok(self.lock()?.spend_credits(amount))
    }

    pub fn earn_credits(&self, amount: u32) -> ExchangeResult<()> {
        self.lock()?.earn_credits(amount);
        Ok(())
    }

    pub fn settings(&self) -> ExchangeResult<ClinicSettings> {
        Ok(self.lock()?.settings().clone())
    }

    pub fn audit_entries(&self) -> ExchangeResult<Vec<LogEntry>> {
        Ok(self.lock()?.audit_log().snapshot())
    }

    /// Owned copies of this clinic's own records
    pub fn own_encounters(&self) -> ExchangeResult<Vec<Encounter>> {
        Ok(self.lock()?.own_encounters().into_iter().cloned().collect())
    }

    pub fn history_view(&self, patient_id: &str) -> ExchangeResult<Vec<HistoryView>> {
        self.lock()?.history_view(patient_id)
    }

    /// Run several operations under one lock
    pub fn with_engine<T>(&self, f: impl FnOnce(&mut ExchangeEngine) -> T) -> ExchangeResult<T> {
        let mut engine = self.lock()?;
        Ok(f(&mut engine))
    }
}
