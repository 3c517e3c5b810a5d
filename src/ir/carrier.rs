//! Carrier Modulator
//!
//! Produces the ~38kHz square wave that rides under every protocol pulse.
//! There is no hardware PWM or timer peripheral behind this: the emitter
//! line is toggled by polling the microsecond clock, and frequency
//! accuracy is best-effort.

use crate::config::{CARRIER_HALF_PERIOD_US, CARRIER_RESYNC_US};
use crate::ir::line::{Clock, Deadline, TxLine};

/// Software-defined carrier generator
///
/// Owns its phase reference explicitly; there are no static counters.
/// The reference advances one half-period per toggle so the carrier
/// keeps long-run frequency, but if real time drifts more than
/// [`CARRIER_RESYNC_US`] ahead (other blocking work ran between calls),
/// the reference snaps to `now` rather than emitting a burst of
/// catch-up toggles. That trades momentary frequency accuracy for
/// bounded latency.
#[derive(Clone, Copy, Debug, Default)]
pub struct CarrierModulator {
    /// Clock value the current half-period started at
    phase_at_us: u64,
    /// Level the emitter line is currently driven to
    level: bool,
}

impl CarrierModulator {
    /// Create a modulator with an unsynchronized phase reference
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase_at_us: 0,
            level: false,
        }
    }

    /// Advance the carrier by one poll step
    fn step<C: Clock, P: TxLine>(&mut self, clock: &C, pin: &mut P) {
        let now = clock.now_us();

        // Stale reference: snap forward instead of catching up
        if now > self.phase_at_us + CARRIER_RESYNC_US {
            self.phase_at_us = now;
        }

        if now > self.phase_at_us + CARRIER_HALF_PERIOD_US {
            self.level = !self.level;
            pin.set(self.level);
            self.phase_at_us += CARRIER_HALF_PERIOD_US;
        }
    }

    /// Emit carrier on `pin` for `duration_us` microseconds
    ///
    /// Blocks for the full duration, then leaves the line driven low.
    /// No side effects beyond pin toggling.
    pub fn generate<C: Clock, P: TxLine>(&mut self, clock: &C, pin: &mut P, duration_us: u64) {
        let done = Deadline::after(clock, duration_us);
        while !done.expired(clock) {
            self.step(clock, pin);
        }
        pin.set(false);
        self.level = false;
    }
}
