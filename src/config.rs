//! System configuration and protocol constants
//!
//! This module defines the bit-exact timing constants of the infrared
//! protocol. Independently built beacons and robots interoperate only if
//! they agree on every value here, so nothing below may be tuned per-device
//! except the carrier half-period (and then only against real hardware).

/// Protocol time unit T in microseconds
///
/// Every bit and header interval is a small multiple of this unit.
pub const PROTOCOL_UNIT_US: u64 = 600;

/// Carrier half-period in microseconds
///
/// The emitter line toggles once per half-period. The constant implies
/// the nominal ≈38.4kHz carrier; the protocol documentation quotes
/// 37.9kHz, but the numeric constant is authoritative.
pub const CARRIER_HALF_PERIOD_US: u64 = 26;

/// Carrier phase resync threshold in microseconds
///
/// If real time runs this far past the modulator's phase reference, the
/// reference snaps forward instead of catching up toggle-by-toggle.
pub const CARRIER_RESYNC_US: u64 = 100;

/// Header quiet interval (3T of line idle before the sync pulse)
///
/// One legacy transmitter accepted 1T here; 3T matches the protocol
/// definition and rejects mid-frame garbage, so 3T is canonical.
pub const HEADER_QUIET_US: u64 = 3 * PROTOCOL_UNIT_US;

/// Header sync pulse (3T of continuous carrier)
pub const HEADER_PULSE_US: u64 = 3 * PROTOCOL_UNIT_US;

/// Space preceding every data bit (1T idle)
pub const BIT_SPACE_US: u64 = PROTOCOL_UNIT_US;

/// Pulse width of a logical one (2T carrier)
pub const BIT_ONE_PULSE_US: u64 = 2 * PROTOCOL_UNIT_US;

/// Pulse width of a logical zero (1T carrier)
pub const BIT_ZERO_PULSE_US: u64 = PROTOCOL_UNIT_US;

/// Neutral broadcast pulse (10ms carrier)
///
/// Deliberately out-of-band: no valid data pulse exceeds 2T = 1.2ms, so
/// a neutral burst can never alias a protocol bit.
pub const NEUTRAL_PULSE_US: u64 = 10_000;

/// Gap after the neutral broadcast pulse (1ms idle)
pub const NEUTRAL_GAP_US: u64 = 1_000;

/// Default receive window per exchange cycle
pub const LISTEN_TIMEOUT_US: u64 = 100_000;

/// Upper bound on decode time after a header is found
///
/// The body state machine samples at fixed offsets spanning at most 5.5T;
/// 6T covers that plus execution jitter between reads.
pub const DECODE_BODY_US: u64 = 6 * PROTOCOL_UNIT_US;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// IR emitter drive (active high, through the carrier transistor)
    pub const IR_TX: &str = "PB0";

    /// IR receiver output (active low: LOW = carrier detected)
    pub const IR_RX: &str = "PB1";

    /// Indicator LED red channel
    pub const LED_R: &str = "PA9";

    /// Indicator LED green channel
    pub const LED_G: &str = "PA10";

    /// Indicator LED blue channel
    pub const LED_B: &str = "PA11";
}

/// Nominal carrier frequency in Hz implied by the toggle constant
#[must_use]
pub const fn carrier_frequency_hz() -> u64 {
    1_000_000 / CARRIER_HALF_PERIOD_US
}
