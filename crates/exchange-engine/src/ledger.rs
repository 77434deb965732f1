//! Continuity Credit ledger
//!
//! The ledger is the only path that changes a clinic's credit balance. It
//! borrows the settings store and the audit log for the length of one
//! operation, so every movement is recorded alongside the balance change.
//!
//! # Balance invariant
//!
//! A debit happens only when the balance covers it. The balance is unsigned
//! and is never driven below zero.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::audit::{AuditLog, LogEntry, LogKind};
use crate::settings::SettingsStore;

/// Error type for ledger operations
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum LedgerError {
    /// Insufficient credits remaining
    #[error("insufficient credits: need {required}, have {available}")]
    Insufficient { required: u32, available: u32 },
}

/// Short-lived handle over a clinic's balance and audit trail
pub struct CreditLedger<'a> {
    store: &'a mut SettingsStore,
    log: &'a mut AuditLog,
}

impl<'a> CreditLedger<'a> {
    pub fn new(store: &'a mut SettingsStore, log: &'a mut AuditLog) -> Self {
        Self { store, log }
    }

    /// Check and debit credits spent on a history request
    ///
    /// # Returns
    /// * `Ok(LogEntry)` - the `spent` entry recorded for the debit
    /// * `Err(LedgerError::Insufficient)` - nothing was debited or logged
    pub fn try_spend(&mut self, amount: u32) -> Result<LogEntry, LedgerError> {
        let available = self.store.credits();
        if available < amount {
            return Err(LedgerError::Insufficient {
                required: amount,
                available,
            });
        }

        self.store.debit(amount);
        debug!(amount, balance = self.store.credits(), "Credits spent");

        Ok(self.log.append(
            LogKind::Spent,
            format!(
                "Spent {} Continuity Credit{} to access patient history",
                amount,
                if amount > 1 { "s" } else { "" }
            ),
            Some(-i64::from(amount)),
        ))
    }

    /// Debit `amount` if the balance covers it. Returns whether the debit occurred.
    pub fn spend(&mut self, amount: u32) -> bool {
        self.try_spend(amount).is_ok()
    }

    /// Credit the balance unconditionally and record an `earned` entry
    pub fn earn(&mut self, amount: u32) -> LogEntry {
        self.earn_with_message(
            amount,
            format!(
                "Earned {} Continuity Credit{}",
                amount,
                if amount == 1 { "" } else { "s" }
            ),
        )
    }

    /// Credit the balance and record an `earned` entry with a caller-supplied message
    pub(crate) fn earn_with_message(&mut self, amount: u32, message: String) -> LogEntry {
        self.store.credit(amount);
        debug!(amount, balance = self.store.credits(), "Credits earned");
        self.log.append(LogKind::Earned, message, Some(i64::from(amount)))
    }
}
