//! Frame Decoder
//!
//! Real-time decoding state machine over the demodulated receive line.
//! A decode attempt has two phases:
//!
//! 1. **Header search** — scan for a continuous quiet interval of at
//!    least 3T followed by a continuous carrier pulse of at least 3T,
//!    bounded by the caller's timeout.
//! 2. **Body sampling** — from the end of the header pulse, sample the
//!    line at fixed offsets (T/2, then every 1T) to validate the bit
//!    framing and extract the command and team bits.
//!
//! Every sampled level either matches its expected value or the attempt
//! aborts with `None` on the spot; no partial decode escapes the call.
//! All timing state is local to one attempt, so a garbled frame costs
//! nothing beyond the time spent on it and the next cycle re-enters
//! header search fresh.

use crate::config::{HEADER_PULSE_US, HEADER_QUIET_US, PROTOCOL_UNIT_US};
use crate::ir::line::{sample_after, Clock, Deadline, RxLine};
use crate::types::{LineLevel, Message, MessageKind, Team};

/// Outcome of one pulse-qualification pass during header search
enum PulseOutcome {
    /// A continuous pulse of at least 3T ended; body sampling may begin
    Header,
    /// Carrier appeared but dropped before qualifying
    Dropout,
    /// The search deadline elapsed
    TimedOut,
}

/// Inbound frame decoder owning the receive line
#[derive(Debug)]
pub struct FrameDecoder<C: Clock, P: RxLine> {
    clock: C,
    pin: P,
}

impl<C: Clock, P: RxLine> FrameDecoder<C, P> {
    /// Create a decoder over a clock handle and the receive line
    pub fn new(clock: C, pin: P) -> Self {
        Self { clock, pin }
    }

    /// Block until a frame decodes or `timeout_us` elapses with no header
    ///
    /// The timeout bounds the header search only; once a header
    /// qualifies, the fixed ~5T body window runs to completion or to the
    /// first malformed sample. A zero timeout returns `None` without
    /// blocking.
    pub fn read_message(&mut self, timeout_us: u64) -> Option<Message> {
        let deadline = Deadline::after(&self.clock, timeout_us);
        if !self.wait_for_header(deadline) {
            return None;
        }
        self.read_body()
    }

    /// Header search: quiet interval then qualifying pulse
    ///
    /// Returns true with the clock positioned at the end of the header
    /// pulse. A pulse that drops early sends the search back to the
    /// quiet phase rather than aborting, so line garbage before a real
    /// header only costs time.
    fn wait_for_header(&mut self, deadline: Deadline) -> bool {
        while !deadline.expired(&self.clock) {
            if !self.wait_quiet(deadline) {
                return false;
            }
            match self.wait_pulse(deadline) {
                PulseOutcome::Header => return true,
                PulseOutcome::Dropout => {}
                PulseOutcome::TimedOut => return false,
            }
        }
        false
    }

    /// Wait for the line to stay idle for a continuous 3T
    fn wait_quiet(&mut self, deadline: Deadline) -> bool {
        let mut quiet_since: Option<u64> = None;
        while !deadline.expired(&self.clock) {
            let now = self.clock.now_us();
            match self.pin.level() {
                LineLevel::Idle => match quiet_since {
                    None => quiet_since = Some(now),
                    Some(since) if now >= since + HEADER_QUIET_US => return true,
                    Some(_) => {}
                },
                // Carrier resets the quiet timer
                LineLevel::Carrier => quiet_since = None,
            }
        }
        false
    }

    /// Wait for a continuous carrier pulse of at least 3T to end
    fn wait_pulse(&mut self, deadline: Deadline) -> PulseOutcome {
        let mut pulse_since: Option<u64> = None;
        while !deadline.expired(&self.clock) {
            let now = self.clock.now_us();
            match self.pin.level() {
                LineLevel::Carrier => {
                    if pulse_since.is_none() {
                        pulse_since = Some(now);
                    }
                }
                LineLevel::Idle => match pulse_since {
                    // Pulse end marks the body sampling origin
                    Some(since) if now >= since + HEADER_PULSE_US => return PulseOutcome::Header,
                    Some(_) => return PulseOutcome::Dropout,
                    None => {}
                },
            }
        }
        PulseOutcome::TimedOut
    }

    /// Take one body sample `us` after the previous one
    fn sample(&mut self, us: u64) -> LineLevel {
        sample_after(&self.clock, &mut self.pin, us)
    }

    /// Fixed-offset body sampling from the end of the header pulse
    ///
    /// Offsets land mid-interval: T/2 into the first bit space, then
    /// every 1T. Status frames carry their pulse one T longer than
    /// capture frames, so after a status command bit one extra
    /// space-validity sample realigns onto the team bit.
    fn read_body(&mut self) -> Option<Message> {
        // T/2 into the first bit space: must be quiet
        if self.sample(PROTOCOL_UNIT_US / 2) != LineLevel::Idle {
            return None;
        }

        // Mid first bit pulse: must be carrier for either command value
        if self.sample(PROTOCOL_UNIT_US) != LineLevel::Carrier {
            return None;
        }

        // One T later the command values diverge: a one-bit (status) is
        // still pulsing, a zero-bit (capture) has gone quiet
        let kind = if self.sample(PROTOCOL_UNIT_US) == LineLevel::Carrier {
            // Status: consume the team bit's space before sampling it
            if self.sample(PROTOCOL_UNIT_US) != LineLevel::Idle {
                return None;
            }
            MessageKind::Status
        } else {
            MessageKind::Capture
        };

        // Mid team bit pulse: must be carrier for either team
        if self.sample(PROTOCOL_UNIT_US) != LineLevel::Carrier {
            return None;
        }

        // One T later the team values diverge: blue (one) still pulsing,
        // red (zero) gone quiet
        let team = Team::from_bit(self.sample(PROTOCOL_UNIT_US) == LineLevel::Carrier);

        Some(Message { kind, team })
    }
}
