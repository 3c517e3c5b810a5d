//! Ownership State
//!
//! The transition rules for a beacon's ownership. Only decoded capture
//! commands move the state; status frames are telemetry and never do.
//! There is no release command, so ownership never returns to Neutral
//! once claimed.

use crate::types::{Message, TeamState};

/// A beacon's ownership with its transition rules
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ownership {
    current: TeamState,
}

impl Ownership {
    /// Start unclaimed
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: TeamState::Neutral,
        }
    }

    /// Start already claimed (robot role: the team is fixed)
    #[must_use]
    pub const fn claimed(state: TeamState) -> Self {
        Self { current: state }
    }

    /// Current ownership
    #[must_use]
    pub const fn current(&self) -> TeamState {
        self.current
    }

    /// Apply a decoded message; returns true if ownership changed
    ///
    /// Captures transition to the claiming team, idempotently. Status
    /// messages never mutate.
    pub fn apply(&mut self, message: Message) -> bool {
        if !message.is_capture() {
            return false;
        }
        let next = TeamState::from(message.team);
        let changed = next != self.current;
        self.current = next;
        changed
    }
}
