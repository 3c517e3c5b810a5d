//! Simulated Link
//!
//! Deterministic host-side stand-ins for the clock and both IR lines, so
//! the real modulator, encoder, and decoder run unmodified in tests. The
//! simulated clock advances a shared time cell by a fixed tick on every
//! read, which models execution cost and guarantees every busy-wait
//! terminates; waveforms describe the receive line as a function of that
//! shared time.

use core::cell::{Cell, RefCell};

use heapless::Vec;

use crate::config::CARRIER_HALF_PERIOD_US;
use crate::ir::line::{Clock, RxLine, TxLine};
use crate::types::{LineLevel, Team, TeamState};

/// Maximum envelope segments in a [`Waveform`]
const MAX_SEGMENTS: usize = 256;

/// Maximum raw pin edges in an [`EdgeLog`]
const MAX_EDGES: usize = 4096;

/// Gap between toggles that ends a carrier burst during demodulation
///
/// Real toggles arrive every half-period; a gap of several half-periods
/// means the carrier stopped. Protocol spaces are at least 600µs, far
/// above this threshold.
const DEMOD_GAP_US: u64 = 4 * CARRIER_HALF_PERIOD_US;

/// Shared simulated time in microseconds
#[derive(Debug, Default)]
pub struct SimTime(Cell<u64>);

impl SimTime {
    /// Start the simulation at t = 0
    #[must_use]
    pub const fn new() -> Self {
        Self(Cell::new(0))
    }

    /// Current simulated time
    #[must_use]
    pub fn now(&self) -> u64 {
        self.0.get()
    }

    /// Advance time by `us` microseconds
    pub fn advance(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }
}

/// Monotonic clock over a [`SimTime`]
///
/// Each read returns the current time and then advances it by the tick,
/// so consecutive reads are strictly increasing and busy-wait loops make
/// progress without wall-clock delays.
#[derive(Clone, Copy, Debug)]
pub struct SimClock<'a> {
    time: &'a SimTime,
    tick_us: u64,
}

impl<'a> SimClock<'a> {
    /// Clock advancing 1µs per read
    #[must_use]
    pub const fn new(time: &'a SimTime) -> Self {
        Self { time, tick_us: 1 }
    }

    /// Clock advancing `tick_us` per read (coarser execution jitter)
    #[must_use]
    pub const fn with_tick(time: &'a SimTime, tick_us: u64) -> Self {
        Self { time, tick_us }
    }
}

impl Clock for SimClock<'_> {
    fn now_us(&self) -> u64 {
        let now = self.time.now();
        self.time.advance(self.tick_us);
        now
    }
}

/// One envelope segment, stored as cumulative end time plus level
#[derive(Clone, Copy, Debug)]
struct Segment {
    end_us: u64,
    level: LineLevel,
}

/// Demodulated line level as a function of time
///
/// Built by appending idle/carrier intervals; reads outside all appended
/// segments are idle, matching a quiet line before and after a frame.
#[derive(Debug, Default)]
pub struct Waveform {
    segments: Vec<Segment, MAX_SEGMENTS>,
}

impl Waveform {
    /// Empty waveform (idle forever)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push(&mut self, duration_us: u64, level: LineLevel) {
        let start = self.duration_us();
        assert!(
            self.segments
                .push(Segment {
                    end_us: start + duration_us,
                    level,
                })
                .is_ok(),
            "waveform capacity exceeded"
        );
    }

    /// Append an idle interval
    pub fn idle(&mut self, duration_us: u64) -> &mut Self {
        self.push(duration_us, LineLevel::Idle);
        self
    }

    /// Append a carrier interval
    pub fn carrier(&mut self, duration_us: u64) -> &mut Self {
        self.push(duration_us, LineLevel::Carrier);
        self
    }

    /// Append a protocol header (3T idle + 3T carrier)
    pub fn push_header(&mut self) -> &mut Self {
        use crate::config::{HEADER_PULSE_US, HEADER_QUIET_US};
        self.idle(HEADER_QUIET_US).carrier(HEADER_PULSE_US)
    }

    /// Append a logical one (1T idle + 2T carrier)
    pub fn push_one(&mut self) -> &mut Self {
        use crate::config::{BIT_ONE_PULSE_US, BIT_SPACE_US};
        self.idle(BIT_SPACE_US).carrier(BIT_ONE_PULSE_US)
    }

    /// Append a logical zero (1T idle + 1T carrier)
    pub fn push_zero(&mut self) -> &mut Self {
        use crate::config::{BIT_SPACE_US, BIT_ZERO_PULSE_US};
        self.idle(BIT_SPACE_US).carrier(BIT_ZERO_PULSE_US)
    }

    /// Append a neutral broadcast (10ms carrier + 1ms idle)
    pub fn push_neutral(&mut self) -> &mut Self {
        use crate::config::{NEUTRAL_GAP_US, NEUTRAL_PULSE_US};
        self.carrier(NEUTRAL_PULSE_US).idle(NEUTRAL_GAP_US)
    }

    /// Append a complete status frame for `state`
    pub fn push_status(&mut self, state: TeamState) -> &mut Self {
        self.push_header();
        self.push_one();
        match state.team() {
            Some(Team::Red) => self.push_zero(),
            Some(Team::Blue) => self.push_one(),
            None => self.push_neutral(),
        }
    }

    /// Append a complete capture frame for `team`
    pub fn push_capture(&mut self, team: Team) -> &mut Self {
        self.push_header();
        self.push_zero();
        match team {
            Team::Red => self.push_zero(),
            Team::Blue => self.push_one(),
        }
    }

    /// Line level at absolute time `t_us`
    #[must_use]
    pub fn level_at(&self, t_us: u64) -> LineLevel {
        for segment in &self.segments {
            if t_us < segment.end_us {
                return segment.level;
            }
        }
        LineLevel::Idle
    }

    /// Total appended duration
    #[must_use]
    pub fn duration_us(&self) -> u64 {
        self.segments.last().map_or(0, |s| s.end_us)
    }

    /// The waveform's segments as (level, duration) pairs
    #[must_use]
    pub fn intervals(&self) -> Vec<(LineLevel, u64), MAX_SEGMENTS> {
        let mut out = Vec::new();
        let mut start = 0;
        for segment in &self.segments {
            let _ = out.push((segment.level, segment.end_us - start));
            start = segment.end_us;
        }
        out
    }

    /// Copy of this waveform preceded by `us` of extra idle
    #[must_use]
    pub fn with_lead(&self, us: u64) -> Self {
        let mut out = Self::new();
        out.idle(us);
        let mut start = 0;
        for segment in &self.segments {
            out.push(segment.end_us - start, segment.level);
            start = segment.end_us;
        }
        out
    }
}

/// Receive-line probe reading a [`Waveform`] at the shared time
#[derive(Clone, Copy, Debug)]
pub struct RxProbe<'a> {
    time: &'a SimTime,
    waveform: &'a Waveform,
}

impl<'a> RxProbe<'a> {
    /// Probe `waveform` against `time`
    #[must_use]
    pub const fn new(time: &'a SimTime, waveform: &'a Waveform) -> Self {
        Self { time, waveform }
    }
}

impl RxLine for RxProbe<'_> {
    fn level(&mut self) -> LineLevel {
        self.waveform.level_at(self.time.now())
    }
}

/// Shared log of raw emitter-line transitions
///
/// The recorder writes into this through a shared reference so tests can
/// keep a handle while the encoder owns the recorder.
#[derive(Debug, Default)]
pub struct EdgeLog {
    edges: RefCell<Vec<(u64, bool), MAX_EDGES>>,
}

impl EdgeLog {
    /// Empty log
    #[must_use]
    pub const fn new() -> Self {
        Self {
            edges: RefCell::new(Vec::new()),
        }
    }

    /// Number of recorded transitions
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.borrow().len()
    }

    /// Check whether nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.borrow().is_empty()
    }

    /// Time of the `i`-th transition
    #[must_use]
    pub fn edge_at(&self, i: usize) -> Option<u64> {
        self.edges.borrow().get(i).map(|&(t, _)| t)
    }

    /// Level the line was left at by the last transition
    #[must_use]
    pub fn last_level(&self) -> Option<bool> {
        self.edges.borrow().last().map(|&(_, high)| high)
    }

    /// Times of all recorded transitions
    #[must_use]
    pub fn edge_times(&self) -> Vec<u64, MAX_EDGES> {
        let mut out = Vec::new();
        for &(t, _) in self.edges.borrow().iter() {
            let _ = out.push(t);
        }
        out
    }

    fn record(&self, t_us: u64, high: bool) {
        assert!(
            self.edges.borrow_mut().push((t_us, high)).is_ok(),
            "edge log capacity exceeded"
        );
    }

    /// Recover the carrier envelope from the raw transitions
    ///
    /// Consecutive toggles closer than [`DEMOD_GAP_US`] belong to one
    /// carrier burst, mirroring how a demodulating receiver stretches
    /// individual carrier cycles into a continuous detect level.
    #[must_use]
    pub fn demodulate(&self) -> Waveform {
        let mut envelope = Waveform::new();
        let mut cursor = 0u64;
        let mut burst: Option<(u64, u64)> = None; // (start, last edge)

        for &(t, _) in self.edges.borrow().iter() {
            match burst {
                None => burst = Some((t, t)),
                Some((start, last)) if t.saturating_sub(last) > DEMOD_GAP_US => {
                    let end = last + CARRIER_HALF_PERIOD_US;
                    envelope.idle(start - cursor);
                    envelope.carrier(end - start);
                    cursor = end;
                    burst = Some((t, t));
                }
                Some((start, _)) => burst = Some((start, t)),
            }
        }

        if let Some((start, last)) = burst {
            let end = last + CARRIER_HALF_PERIOD_US;
            envelope.idle(start - cursor);
            envelope.carrier(end - start);
        }

        envelope
    }
}

/// Emitter-line recorder writing transitions into an [`EdgeLog`]
#[derive(Debug)]
pub struct TxRecorder<'a> {
    time: &'a SimTime,
    log: &'a EdgeLog,
    level: bool,
}

impl<'a> TxRecorder<'a> {
    /// Recorder over `time`, logging into `log` (line initially low)
    #[must_use]
    pub const fn new(time: &'a SimTime, log: &'a EdgeLog) -> Self {
        Self {
            time,
            log,
            level: false,
        }
    }
}

impl TxLine for TxRecorder<'_> {
    fn set(&mut self, high: bool) {
        if high != self.level {
            self.level = high;
            self.log.record(self.time.now(), high);
        }
    }
}
