//! Depth negotiation and credit schedules
//!
//! Reading and contributing are priced on separate schedules:
//!
//! | depth   | access cost | publish reward |
//! |---------|-------------|----------------|
//! | glance  | 0           | 1              |
//! | summary | 1           | 2              |
//! | full    | 2           | 3              |

use crate::types::{HistoryDepth, OptInMode};

/// Depth a clinic shares, and so may request, under its participation mode.
///
/// Opted-out clinics are refused before negotiation; they share nothing
/// beyond a glance.
pub fn clinic_shared_depth(mode: OptInMode) -> HistoryDepth {
    match mode {
        OptInMode::OptInFull => HistoryDepth::Full,
        OptInMode::OptInBasic => HistoryDepth::Summary,
        OptInMode::OptedOut => HistoryDepth::Glance,
    }
}

/// Granted depth: the ordinal minimum of the three limits.
pub fn negotiate(requested: HistoryDepth, patient_allowed: HistoryDepth, clinic_shared: HistoryDepth) -> HistoryDepth {
    requested.min(patient_allowed).min(clinic_shared)
}

/// Credits required to request a history at `requested` depth
pub fn access_cost(requested: HistoryDepth) -> u32 {
    match requested {
        HistoryDepth::Full => 2,
        HistoryDepth::Summary => 1,
        HistoryDepth::Glance => 0,
    }
}

/// Credits earned for publishing an encounter shared at `shared` depth
pub fn publish_reward(shared: HistoryDepth) -> u32 {
    match shared {
        HistoryDepth::Full => 3,
        HistoryDepth::Summary => 2,
        HistoryDepth::Glance => 1,
    }
}
