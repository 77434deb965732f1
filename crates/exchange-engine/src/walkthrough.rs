//! Guided walkthrough step counter.
//!
//! Purely sequential and kept apart from the engine. The only interaction is
//! at the edges: starting a walkthrough opens a fresh engine session and
//! resetting it restores the initial settings.

use serde::{Deserialize, Serialize};

use crate::engine::ExchangeEngine;

/// Opening log entry of a walkthrough session
pub const WALKTHROUGH_OPENING: &str = "Walkthrough started: Your clinic is currently opted out";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Walkthrough {
    step: u32,
    active: bool,
}

impl Walkthrough {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activate at step 1 and open a fresh session on `engine`
    pub fn start(&mut self, engine: &mut ExchangeEngine) {
        self.active = true;
        self.step = 1;
        engine.reset_session(Some(WALKTHROUGH_OPENING));
    }

    pub fn advance(&mut self) -> u32 {
        self.step = self.step.saturating_add(1);
        self.step
    }

    /// Advance only while active and at `expected`; returns whether it moved
    pub fn advance_from(&mut self, expected: u32) -> bool {
        if self.active && self.step == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Deactivate and restore the engine's initial settings
    pub fn reset(&mut self, engine: &mut ExchangeEngine) {
        self.active = false;
        self.step = 0;
        engine.restore_initial();
    }
}
