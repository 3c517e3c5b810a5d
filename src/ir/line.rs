//! Line-Level Primitives
//!
//! The seams between protocol code and hardware: a monotonic microsecond
//! clock, a driven emitter line, a sampled receiver line, and the
//! deadline-polling helpers every wait in the protocol is built from.

use crate::types::LineLevel;

/// Monotonic microsecond clock
///
/// Implementations must never move backwards. Handles are cloned into
/// the encoder and decoder, so a clock should be cheap to copy (the
/// embedded clock is zero-sized; the simulated clock is a shared-cell
/// reference).
pub trait Clock {
    /// Current monotonic time in microseconds since an arbitrary epoch
    fn now_us(&self) -> u64;
}

/// Driver side of the IR emitter line (active high)
pub trait TxLine {
    /// Drive the line high (emitter on) or low (emitter off)
    fn set(&mut self, high: bool);
}

/// Receiver side of the link: the demodulated carrier-detect line
///
/// Implementations translate the receiver's active-low electrical
/// convention into a [`LineLevel`].
pub trait RxLine {
    /// Sample the current line level
    fn level(&mut self) -> LineLevel;
}

/// A point in time a wait loop is bounded by
///
/// Every wait in the protocol layer is entered with a deadline computed
/// up front; there is no other cancellation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deadline(u64);

impl Deadline {
    /// Deadline `us` microseconds from now
    pub fn after<C: Clock>(clock: &C, us: u64) -> Self {
        Self(clock.now_us().saturating_add(us))
    }

    /// Deadline at an absolute clock value
    #[must_use]
    pub const fn at(us: u64) -> Self {
        Self(us)
    }

    /// Check the deadline against the clock
    pub fn expired<C: Clock>(self, clock: &C) -> bool {
        clock.now_us() >= self.0
    }

    /// The absolute clock value of the deadline
    #[must_use]
    pub const fn instant(self) -> u64 {
        self.0
    }
}

/// Busy-wait until `us` microseconds have elapsed
///
/// Polls the clock in a tight loop. Blocking is intentional and load
/// bearing: the protocol's sampling offsets tolerate only a few
/// microseconds of jitter, so this must not be replaced with a yielding
/// delay.
pub fn busy_wait_us<C: Clock>(clock: &C, us: u64) {
    let deadline = Deadline::after(clock, us);
    while !deadline.expired(clock) {}
}

/// Wait `us` microseconds, then take one sample of the receive line
///
/// The fixed-offset sampling primitive the decode body is built from.
pub fn sample_after<C: Clock, R: RxLine>(clock: &C, rx: &mut R, us: u64) -> LineLevel {
    busy_wait_us(clock, us);
    rx.level()
}
