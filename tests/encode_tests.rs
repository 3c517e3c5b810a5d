//! Frame Encoder Tests
//!
//! Records the raw emitter line, demodulates it back into an envelope,
//! and checks every primitive and frame shape against the protocol
//! timing table.

use beacon_firmware::config::{
    BIT_ONE_PULSE_US, BIT_SPACE_US, BIT_ZERO_PULSE_US, HEADER_PULSE_US, HEADER_QUIET_US,
    NEUTRAL_PULSE_US,
};
use beacon_firmware::ir::encode::FrameEncoder;
use beacon_firmware::sim::{EdgeLog, SimClock, SimTime, TxRecorder, Waveform};
use beacon_firmware::types::{LineLevel, Team, TeamState};

/// Envelope timing tolerance: carrier granularity plus loop jitter
const TOL_US: u64 = 120;

fn record(emit: impl FnOnce(&mut FrameEncoder<SimClock<'_>, TxRecorder<'_>>)) -> Waveform {
    let time = SimTime::new();
    let log = EdgeLog::new();
    let mut encoder = FrameEncoder::new(SimClock::new(&time), TxRecorder::new(&time, &log));
    emit(&mut encoder);
    log.demodulate()
}

fn assert_close(actual: u64, expected: u64) {
    let delta = actual.abs_diff(expected);
    assert!(delta <= TOL_US, "interval {actual}µs, expected {expected}µs");
}

/// Check an envelope against (level, duration) expectations
fn assert_envelope(envelope: &Waveform, expected: &[(LineLevel, u64)]) {
    let intervals = envelope.intervals();
    assert_eq!(
        intervals.len(),
        expected.len(),
        "segment count {} != {}",
        intervals.len(),
        expected.len()
    );
    for (&(level, duration), &(want_level, want_duration)) in intervals.iter().zip(expected) {
        assert_eq!(level, want_level);
        assert_close(duration, want_duration);
    }
}

// ============================================================================
// Waveform Primitives
// ============================================================================

#[test]
fn header_is_quiet_then_pulse() {
    let envelope = record(|e| e.send_header());
    assert_envelope(
        &envelope,
        &[
            (LineLevel::Idle, HEADER_QUIET_US),
            (LineLevel::Carrier, HEADER_PULSE_US),
        ],
    );
}

#[test]
fn one_bit_is_long_pulse() {
    let envelope = record(|e| e.send_one());
    assert_envelope(
        &envelope,
        &[
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ONE_PULSE_US),
        ],
    );
}

#[test]
fn zero_bit_is_short_pulse() {
    let envelope = record(|e| e.send_zero());
    assert_envelope(
        &envelope,
        &[
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ZERO_PULSE_US),
        ],
    );
}

#[test]
fn neutral_burst_is_out_of_band() {
    let envelope = record(|e| e.send_neutral());
    let intervals = envelope.intervals();
    let (level, duration) = *intervals.last().expect("no burst recorded");
    assert_eq!(level, LineLevel::Carrier);
    assert_close(duration, NEUTRAL_PULSE_US);
    // Far beyond any valid data pulse
    assert!(duration > 2 * BIT_ONE_PULSE_US);
}

// ============================================================================
// Frame Composition
// ============================================================================

#[test]
fn status_red_frame_shape() {
    let envelope = record(|e| e.send_status(TeamState::Red));
    assert_envelope(
        &envelope,
        &[
            (LineLevel::Idle, HEADER_QUIET_US),
            (LineLevel::Carrier, HEADER_PULSE_US),
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ONE_PULSE_US), // status marker
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ZERO_PULSE_US), // red
        ],
    );
}

#[test]
fn status_blue_frame_shape() {
    let envelope = record(|e| e.send_status(TeamState::Blue));
    assert_envelope(
        &envelope,
        &[
            (LineLevel::Idle, HEADER_QUIET_US),
            (LineLevel::Carrier, HEADER_PULSE_US),
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ONE_PULSE_US),
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ONE_PULSE_US), // blue
        ],
    );
}

#[test]
fn status_neutral_merges_marker_and_burst() {
    // The neutral burst follows the status marker with no space, so the
    // receiver sees one continuous out-of-band pulse
    let envelope = record(|e| e.send_status(TeamState::Neutral));
    assert_envelope(
        &envelope,
        &[
            (LineLevel::Idle, HEADER_QUIET_US),
            (LineLevel::Carrier, HEADER_PULSE_US),
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ONE_PULSE_US + NEUTRAL_PULSE_US),
        ],
    );
}

#[test]
fn capture_red_frame_shape() {
    let envelope = record(|e| e.send_capture(Team::Red));
    assert_envelope(
        &envelope,
        &[
            (LineLevel::Idle, HEADER_QUIET_US),
            (LineLevel::Carrier, HEADER_PULSE_US),
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ZERO_PULSE_US), // capture marker
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ZERO_PULSE_US), // red
        ],
    );
}

#[test]
fn capture_blue_frame_shape() {
    let envelope = record(|e| e.send_capture(Team::Blue));
    assert_envelope(
        &envelope,
        &[
            (LineLevel::Idle, HEADER_QUIET_US),
            (LineLevel::Carrier, HEADER_PULSE_US),
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ZERO_PULSE_US),
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ONE_PULSE_US), // blue
        ],
    );
}
