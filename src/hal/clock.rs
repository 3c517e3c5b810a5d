//! Boot-Time Clock
//!
//! The monotonic microsecond clock backing every protocol wait on
//! hardware.

use crate::ir::line::Clock;

/// Monotonic clock counting microseconds since boot
///
/// Zero-sized handle over the embassy time driver; cloning is free, so
/// the encoder and decoder each hold their own.
#[derive(Clone, Copy, Debug, Default)]
pub struct BootClock;

impl Clock for BootClock {
    fn now_us(&self) -> u64 {
        embassy_time::Instant::now().as_micros()
    }
}
