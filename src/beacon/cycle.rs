//! Exchange Loop
//!
//! One exchange per iteration, strictly half-duplex: transmit this
//! device's frame, listen for an incoming frame until the receive window
//! closes, apply any resulting ownership transition, then refresh the
//! indicator. Anything arriving during the transmit window is lost;
//! correctness relies on both endpoints sharing the exchange rhythm, not
//! on full duplex.
//!
//! Beacons and robots run the same loop; the [`Role`] decides which
//! frame goes out and whether a decoded capture may mutate ownership.

use crate::beacon::state::Ownership;
use crate::config::LISTEN_TIMEOUT_US;
use crate::ir::decode::FrameDecoder;
use crate::ir::encode::FrameEncoder;
use crate::ir::line::{Clock, RxLine, TxLine};
use crate::types::{Message, Role, TeamState};

/// Visual sink reflecting the current ownership
///
/// Driven once per cycle. Color mixing is the implementation's business;
/// the loop only reports state.
pub trait Indicator {
    /// Reflect `state` on the indicator
    fn show(&mut self, state: TeamState);
}

/// No-op indicator for headless nodes and tests
impl Indicator for () {
    fn show(&mut self, _state: TeamState) {}
}

/// The per-device exchange loop context
///
/// Owns everything a cycle touches: ownership, both line endpoints, the
/// carrier phase (inside the encoder), and the indicator. No globals.
pub struct BeaconLoop<C, TX, RX, I>
where
    C: Clock + Clone,
    TX: TxLine,
    RX: RxLine,
    I: Indicator,
{
    role: Role,
    ownership: Ownership,
    encoder: FrameEncoder<C, TX>,
    decoder: FrameDecoder<C, RX>,
    indicator: I,
    listen_timeout_us: u64,
}

impl<C, TX, RX, I> BeaconLoop<C, TX, RX, I>
where
    C: Clock + Clone,
    TX: TxLine,
    RX: RxLine,
    I: Indicator,
{
    /// Build the loop context for `role` over concrete lines
    ///
    /// A beacon starts Neutral; a robot starts permanently claimed for
    /// its own team.
    pub fn new(role: Role, clock: C, tx: TX, rx: RX, indicator: I) -> Self {
        let ownership = match role {
            Role::Beacon => Ownership::new(),
            Role::Robot(team) => Ownership::claimed(TeamState::from(team)),
        };
        Self {
            role,
            ownership,
            encoder: FrameEncoder::new(clock.clone(), tx),
            decoder: FrameDecoder::new(clock, rx),
            indicator,
            listen_timeout_us: LISTEN_TIMEOUT_US,
        }
    }

    /// Current ownership
    #[must_use]
    pub const fn team_state(&self) -> TeamState {
        self.ownership.current()
    }

    /// This device's role
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Override the receive window (default 100ms)
    pub fn set_listen_timeout(&mut self, timeout_us: u64) {
        self.listen_timeout_us = timeout_us;
    }

    /// Run one exchange cycle; returns whatever frame was heard
    ///
    /// Blocks for the full transmit duration plus up to the receive
    /// window. A decoded capture moves ownership only on a beacon;
    /// everything a robot hears is telemetry for the caller.
    pub fn run_cycle(&mut self) -> Option<Message> {
        match self.role {
            Role::Beacon => self.encoder.send_status(self.ownership.current()),
            Role::Robot(team) => self.encoder.send_capture(team),
        }

        let heard = self.decoder.read_message(self.listen_timeout_us);

        if let (Role::Beacon, Some(message)) = (self.role, heard) {
            self.ownership.apply(message);
        }

        self.indicator.show(self.ownership.current());
        heard
    }
}
