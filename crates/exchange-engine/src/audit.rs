//! Audit trail for ledger movements and access decisions.
//!
//! Entries are kept newest first by insertion order. Nothing is edited or
//! removed once appended; a fresh session starts with a fresh log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Kind of audit event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Earned,
    Spent,
    Denied,
    Info,
}

/// An entry in the audit log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Unique entry ID
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub message: String,
    /// Signed credit movement, if the event moved credits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<i64>,
}

impl LogEntry {
    fn new(kind: LogKind, message: String, credits: Option<i64>) -> Self {
        Self {
            id: format!("log-{}", uuid::Uuid::new_v4()),
            timestamp: Utc::now(),
            kind,
            message,
            credits,
        }
    }
}

/// Append-only, newest-first audit log.
#[derive(Clone, Debug, Default)]
pub struct AuditLog {
    entries: VecDeque<LogEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event at the head of the log and return a copy of it.
    pub fn append(&mut self, kind: LogKind, message: impl Into<String>, credits: Option<i64>) -> LogEntry {
        let entry = LogEntry::new(kind, message.into(), credits);
        self.entries.push_front(entry.clone());
        entry
    }

    /// Entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one kind, newest first
    pub fn of_kind(&self, kind: LogKind) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Net credit movement recorded in the log
    pub fn net_credits(&self) -> i64 {
        self.entries.iter().filter_map(|e| e.credits).sum()
    }

    /// Owned copy of the log, newest first
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}
