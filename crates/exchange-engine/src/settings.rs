//! Clinic settings store
//!
//! Credits and trust score are only changed from the ledger and the
//! publisher; everything else in the crate reads through [`SettingsStore::get`].

use crate::types::{ClinicSettings, OptInMode, OriginVisibility};

/// Upper bound of the trust score
pub const MAX_TRUST_SCORE: u8 = 100;

/// Owns the single clinic's settings for a session.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    settings: ClinicSettings,
}

impl SettingsStore {
    /// Create a store, clamping the trust score into range
    pub fn new(mut settings: ClinicSettings) -> Self {
        settings.trust_score = settings.trust_score.min(MAX_TRUST_SCORE);
        Self { settings }
    }

    /// Current settings
    pub fn get(&self) -> &ClinicSettings {
        &self.settings
    }

    pub fn credits(&self) -> u32 {
        self.settings.credits
    }

    pub fn trust_score(&self) -> u8 {
        self.settings.trust_score
    }

    pub(crate) fn set_opt_in_mode(&mut self, mode: OptInMode) {
        self.settings.opt_in_mode = mode;
    }

    pub(crate) fn set_origin_visibility(&mut self, visibility: OriginVisibility) {
        self.settings.origin_visibility = visibility;
    }

    /// Debit without a balance check; callers check first.
    pub(crate) fn debit(&mut self, amount: u32) {
        debug_assert!(self.settings.credits >= amount);
        self.settings.credits = self.settings.credits.saturating_sub(amount);
    }

    pub(crate) fn credit(&mut self, amount: u32) {
        self.settings.credits = self.settings.credits.saturating_add(amount);
    }

    /// Raise the trust score, capped at [`MAX_TRUST_SCORE`]. Returns the new score.
    pub(crate) fn raise_trust(&mut self, by: u8) -> u8 {
        self.settings.trust_score = self.settings.trust_score.saturating_add(by).min(MAX_TRUST_SCORE);
        self.settings.trust_score
    }
}
