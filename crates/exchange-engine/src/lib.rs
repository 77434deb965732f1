//! Continuity Exchange Engine
//!
//! History-access authorization and Continuity Credit ledger for the patient
//! history exchange. Clinics publish encounters to earn credits and spend
//! credits to read other clinics' histories at a negotiated disclosure depth.
//!
//! - Access gate with ordered eligibility checks
//! - Depth negotiation across request, patient and clinic limits
//! - Credit ledger with a non-negative balance
//! - Encounter publishing with contribution rewards and trust score
//! - Newest-first audit log of every decision and ledger movement
//! - Redacted history views that never carry private clinician notes
//!
//! # Example
//!
//! ```rust
//! use continuity_exchange_engine::{
//!     ExchangeConfig, ExchangeEngine, HistoryDepth, HistoryRequest, OptInMode,
//! };
//!
//! let mut engine = ExchangeEngine::new(ExchangeConfig::default()).unwrap();
//! engine.set_opt_in_mode(OptInMode::OptInFull);
//! engine.earn_credits(2);
//!
//! let result = engine.request_history(&HistoryRequest {
//!     patient_id: "p2".to_string(),
//!     is_booked: true,
//!     has_consent: true,
//!     requested_depth: HistoryDepth::Full,
//! });
//!
//! assert!(result.allowed);
//! assert_eq!(result.granted_depth, Some(HistoryDepth::Summary));
//! assert_eq!(engine.settings().credits, 0);
//! ```

pub mod audit;
pub mod config;
pub mod depth;
pub mod directory;
pub mod disclosure;
pub mod engine;
pub mod error;
pub mod gate;
pub mod ledger;
pub mod publisher;
pub mod settings;
pub mod types;
pub mod walkthrough;

// Re-export commonly used types for convenience
pub use audit::{AuditLog, LogEntry, LogKind};
pub use config::ExchangeConfig;
pub use depth::{access_cost, clinic_shared_depth, negotiate, publish_reward};
pub use directory::PatientDirectory;
pub use disclosure::HistoryView;
pub use engine::{ExchangeEngine, SharedExchange};
pub use error::{ExchangeError, ExchangeResult};
pub use gate::GateCheck;
pub use ledger::{CreditLedger, LedgerError};
pub use settings::SettingsStore;
pub use types::{
    AccessResult, Booking, BookingStatus, ClinicSettings, Denial, Encounter, EncounterDraft, HistoryDepth,
    HistoryRequest, OptInMode, OriginVisibility, Patient,
};
pub use walkthrough::Walkthrough;
