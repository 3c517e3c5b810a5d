//! Frame Encoder
//!
//! Composes outbound frames from four waveform primitives over the
//! protocol unit T = 600µs:
//!
//! | Primitive | Space | Pulse |
//! |---|---|---|
//! | header | 3T idle | 3T carrier |
//! | bit one | 1T idle | 2T carrier |
//! | bit zero | 1T idle | 1T carrier |
//! | neutral broadcast | — | 10ms carrier + 1ms idle |
//!
//! A status frame is header + one-bit (status marker) + team bit, with
//! the neutral broadcast taking the team bit's place while unclaimed.
//! A capture frame is header + zero-bit + team bit.

use crate::config::{
    BIT_ONE_PULSE_US, BIT_SPACE_US, BIT_ZERO_PULSE_US, HEADER_PULSE_US, HEADER_QUIET_US,
    NEUTRAL_GAP_US, NEUTRAL_PULSE_US,
};
use crate::ir::carrier::CarrierModulator;
use crate::ir::line::{busy_wait_us, Clock, TxLine};
use crate::types::{Team, TeamState};

/// Outbound frame composer owning the emitter line
#[derive(Debug)]
pub struct FrameEncoder<C: Clock, P: TxLine> {
    clock: C,
    pin: P,
    carrier: CarrierModulator,
}

impl<C: Clock, P: TxLine> FrameEncoder<C, P> {
    /// Create an encoder over a clock handle and the emitter line
    pub fn new(clock: C, pin: P) -> Self {
        Self {
            clock,
            pin,
            carrier: CarrierModulator::new(),
        }
    }

    /// Hold the line idle for `us` microseconds
    fn space(&mut self, us: u64) {
        self.pin.set(false);
        busy_wait_us(&self.clock, us);
    }

    /// Emit carrier for `us` microseconds
    fn pulse(&mut self, us: u64) {
        self.carrier.generate(&self.clock, &mut self.pin, us);
    }

    /// Send the synchronization header (3T idle + 3T carrier)
    pub fn send_header(&mut self) {
        self.space(HEADER_QUIET_US);
        self.pulse(HEADER_PULSE_US);
    }

    /// Send a logical one (1T idle + 2T carrier)
    pub fn send_one(&mut self) {
        self.space(BIT_SPACE_US);
        self.pulse(BIT_ONE_PULSE_US);
    }

    /// Send a logical zero (1T idle + 1T carrier)
    pub fn send_zero(&mut self) {
        self.space(BIT_SPACE_US);
        self.pulse(BIT_ZERO_PULSE_US);
    }

    /// Send one data bit
    pub fn send_bit(&mut self, bit: bool) {
        if bit {
            self.send_one();
        } else {
            self.send_zero();
        }
    }

    /// Send the out-of-band neutral broadcast (10ms carrier + 1ms idle)
    ///
    /// The 10ms pulse cannot be confused with any data pulse (at most
    /// 2T = 1.2ms), so receivers reject it at the bit level.
    pub fn send_neutral(&mut self) {
        self.pulse(NEUTRAL_PULSE_US);
        self.space(NEUTRAL_GAP_US);
    }

    /// Send a status frame for the beacon's current ownership
    pub fn send_status(&mut self, state: TeamState) {
        self.send_header();
        self.send_one(); // command bit: status
        match state.team() {
            Some(team) => self.send_bit(team.bit()),
            None => self.send_neutral(),
        }
    }

    /// Send a capture frame claiming the beacon for `team`
    pub fn send_capture(&mut self, team: Team) {
        self.send_header();
        self.send_zero(); // command bit: capture
        self.send_bit(team.bit());
    }
}
