//! Exchange Loop Tests
//!
//! Runs full beacon and robot cycles over the simulated link: the real
//! encoder transmits into an edge log while the decoder listens to a
//! scripted receive waveform on the same simulated clock.

use beacon_firmware::beacon::cycle::{BeaconLoop, Indicator};
use beacon_firmware::config::{
    BIT_ONE_PULSE_US, BIT_SPACE_US, BIT_ZERO_PULSE_US, HEADER_PULSE_US, NEUTRAL_PULSE_US,
};
use beacon_firmware::sim::{EdgeLog, RxProbe, SimClock, SimTime, TxRecorder, Waveform};
use beacon_firmware::types::{LineLevel, Message, Role, Team, TeamState};

/// Indicator stub remembering the last state it was shown
#[derive(Default)]
struct LastShown(Option<TeamState>);

impl Indicator for &mut LastShown {
    fn show(&mut self, state: TeamState) {
        self.0 = Some(state);
    }
}

type SimLoop<'a> = BeaconLoop<SimClock<'a>, TxRecorder<'a>, RxProbe<'a>, &'a mut LastShown>;

fn sim_loop<'a>(
    role: Role,
    time: &'a SimTime,
    log: &'a EdgeLog,
    incoming: &'a Waveform,
    shown: &'a mut LastShown,
) -> SimLoop<'a> {
    BeaconLoop::new(
        role,
        SimClock::new(time),
        TxRecorder::new(time, log),
        RxProbe::new(time, incoming),
        shown,
    )
}

/// Check the tail of the transmitted envelope against expected
/// (level, duration) pairs
fn assert_tail(log: &EdgeLog, expected: &[(LineLevel, u64)]) {
    let intervals = log.demodulate().intervals();
    assert!(intervals.len() >= expected.len(), "envelope too short");
    let tail = &intervals[intervals.len() - expected.len()..];
    for (&(level, duration), &(want_level, want_duration)) in tail.iter().zip(expected) {
        assert_eq!(level, want_level);
        assert!(
            duration.abs_diff(want_duration) <= 120,
            "interval {duration}µs, expected {want_duration}µs"
        );
    }
}

// ============================================================================
// Beacon Scenarios
// ============================================================================

#[test]
fn neutral_beacon_hears_nothing() {
    let time = SimTime::new();
    let log = EdgeLog::new();
    let incoming = Waveform::new();
    let mut shown = LastShown::default();
    let mut node = sim_loop(Role::Beacon, &time, &log, &incoming, &mut shown);

    let heard = node.run_cycle();

    assert_eq!(heard, None);
    assert_eq!(node.team_state(), TeamState::Neutral);
    assert_eq!(shown.0, Some(TeamState::Neutral));
    // The broadcast carried the out-of-band neutral burst
    assert_tail(
        &log,
        &[(LineLevel::Carrier, BIT_ONE_PULSE_US + NEUTRAL_PULSE_US)],
    );
}

#[test]
fn neutral_beacon_captured_by_red() {
    let time = SimTime::new();
    let log = EdgeLog::new();
    let mut incoming = Waveform::new();
    // Robot frame arrives well after the beacon's own transmit window
    incoming.idle(30_000);
    incoming.push_capture(Team::Red);
    let mut shown = LastShown::default();
    let mut node = sim_loop(Role::Beacon, &time, &log, &incoming, &mut shown);

    assert_eq!(node.run_cycle(), Some(Message::capture(Team::Red)));
    assert_eq!(node.team_state(), TeamState::Red);

    // Next cycle broadcasts the claimed state: header + one + zero
    // (the idle ahead of the header spans the whole listen window, so
    // the tail starts at the header pulse)
    assert_eq!(node.run_cycle(), None);
    assert_tail(
        &log,
        &[
            (LineLevel::Carrier, HEADER_PULSE_US),
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ONE_PULSE_US),
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ZERO_PULSE_US),
        ],
    );
    assert_eq!(shown.0, Some(TeamState::Red));
}

#[test]
fn red_beacon_captured_by_blue() {
    let time = SimTime::new();
    let log = EdgeLog::new();
    let mut incoming = Waveform::new();
    incoming.idle(30_000);
    incoming.push_capture(Team::Red);
    incoming.idle(20_000);
    incoming.push_capture(Team::Blue);
    let mut shown = LastShown::default();
    let mut node = sim_loop(Role::Beacon, &time, &log, &incoming, &mut shown);

    assert_eq!(node.run_cycle(), Some(Message::capture(Team::Red)));
    assert_eq!(node.team_state(), TeamState::Red);

    assert_eq!(node.run_cycle(), Some(Message::capture(Team::Blue)));
    assert_eq!(node.team_state(), TeamState::Blue);
    assert_eq!(shown.0, Some(TeamState::Blue));
}

#[test]
fn status_frame_never_captures() {
    let time = SimTime::new();
    let log = EdgeLog::new();
    let mut incoming = Waveform::new();
    incoming.idle(30_000);
    incoming.push_capture(Team::Red);
    incoming.idle(20_000);
    incoming.push_status(TeamState::Blue);
    let mut shown = LastShown::default();
    let mut node = sim_loop(Role::Beacon, &time, &log, &incoming, &mut shown);

    assert_eq!(node.run_cycle(), Some(Message::capture(Team::Red)));
    assert_eq!(node.team_state(), TeamState::Red);

    // Another beacon's telemetry is heard but moves nothing
    assert_eq!(node.run_cycle(), Some(Message::status(Team::Blue)));
    assert_eq!(node.team_state(), TeamState::Red);
    assert_eq!(shown.0, Some(TeamState::Red));
}

#[test]
fn repeated_capture_is_idempotent() {
    let time = SimTime::new();
    let log = EdgeLog::new();
    let mut incoming = Waveform::new();
    incoming.idle(30_000);
    incoming.push_capture(Team::Blue);
    incoming.idle(20_000);
    incoming.push_capture(Team::Blue);
    let mut shown = LastShown::default();
    let mut node = sim_loop(Role::Beacon, &time, &log, &incoming, &mut shown);

    assert_eq!(node.run_cycle(), Some(Message::capture(Team::Blue)));
    assert_eq!(node.run_cycle(), Some(Message::capture(Team::Blue)));
    assert_eq!(node.team_state(), TeamState::Blue);
}

// ============================================================================
// Robot Role
// ============================================================================

#[test]
fn robot_transmits_capture_and_keeps_its_team() {
    let time = SimTime::new();
    let log = EdgeLog::new();
    let mut incoming = Waveform::new();
    incoming.idle(20_000);
    incoming.push_status(TeamState::Red);
    let mut shown = LastShown::default();
    let mut node = sim_loop(Role::Robot(Team::Blue), &time, &log, &incoming, &mut shown);

    let heard = node.run_cycle();

    // Telemetry surfaces to the caller; the robot's team is fixed
    assert_eq!(heard, Some(Message::status(Team::Red)));
    assert_eq!(node.team_state(), TeamState::Blue);

    // The robot's frame is header + zero (capture) + one (blue)
    assert_tail(
        &log,
        &[
            (LineLevel::Carrier, HEADER_PULSE_US),
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ZERO_PULSE_US),
            (LineLevel::Idle, BIT_SPACE_US),
            (LineLevel::Carrier, BIT_ONE_PULSE_US),
        ],
    );
}

#[test]
fn robot_ignores_capture_frames() {
    let time = SimTime::new();
    let log = EdgeLog::new();
    let mut incoming = Waveform::new();
    incoming.idle(20_000);
    incoming.push_capture(Team::Red);
    let mut shown = LastShown::default();
    let mut node = sim_loop(Role::Robot(Team::Blue), &time, &log, &incoming, &mut shown);

    assert_eq!(node.run_cycle(), Some(Message::capture(Team::Red)));
    assert_eq!(node.team_state(), TeamState::Blue);
}

// ============================================================================
// Receive Window
// ============================================================================

#[test]
fn listen_window_bounds_the_cycle() {
    let time = SimTime::new();
    let log = EdgeLog::new();
    let incoming = Waveform::new();
    let mut shown = LastShown::default();
    let mut node = sim_loop(Role::Beacon, &time, &log, &incoming, &mut shown);
    node.set_listen_timeout(5_000);

    let start = time.now();
    node.run_cycle();
    let elapsed = time.now() - start;

    // Neutral broadcast (~16.4ms) plus the 5ms window plus slack
    assert!(elapsed < 25_000, "cycle took {elapsed}µs");
}
