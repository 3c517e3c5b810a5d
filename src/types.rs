//! Shared types used across the beacon firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time. Protocol code never handles raw pin booleans or
//! magic team numbers; it handles these types.

use core::fmt;

/// One of the two claimable teams
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Team {
    /// Red team (team bit = zero)
    Red,
    /// Blue team (team bit = one)
    Blue,
}

impl Team {
    /// The opposing team
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }

    /// Wire encoding of the team bit (red = zero, blue = one)
    #[must_use]
    pub const fn bit(self) -> bool {
        matches!(self, Self::Blue)
    }

    /// Decode a team from its wire bit
    #[must_use]
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Self::Blue
        } else {
            Self::Red
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Team {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Red => defmt::write!(f, "RED"),
            Self::Blue => defmt::write!(f, "BLUE"),
        }
    }
}

/// Beacon ownership state
///
/// Initialized to `Neutral` at startup and mutated only by the exchange
/// loop on a valid capture decode. There is no release command: once
/// claimed, ownership only moves between Red and Blue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TeamState {
    /// Unclaimed
    #[default]
    Neutral,
    /// Held by the red team
    Red,
    /// Held by the blue team
    Blue,
}

impl TeamState {
    /// The holding team, if claimed
    #[must_use]
    pub const fn team(self) -> Option<Team> {
        match self {
            Self::Neutral => None,
            Self::Red => Some(Team::Red),
            Self::Blue => Some(Team::Blue),
        }
    }

    /// Check whether the beacon has been claimed
    #[must_use]
    pub const fn is_claimed(self) -> bool {
        !matches!(self, Self::Neutral)
    }
}

impl From<Team> for TeamState {
    fn from(team: Team) -> Self {
        match team {
            Team::Red => Self::Red,
            Team::Blue => Self::Blue,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TeamState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Neutral => defmt::write!(f, "NEUTRAL"),
            Self::Red => defmt::write!(f, "RED"),
            Self::Blue => defmt::write!(f, "BLUE"),
        }
    }
}

/// Frame kind carried in the command bit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// Beacon-to-robot ownership broadcast (command bit = one)
    Status,
    /// Robot-to-beacon claim (command bit = zero)
    Capture,
}

#[cfg(feature = "embedded")]
impl defmt::Format for MessageKind {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Status => defmt::write!(f, "STATUS"),
            Self::Capture => defmt::write!(f, "CAPTURE"),
        }
    }
}

/// A fully decoded frame
///
/// Produced by the frame decoder, consumed immediately by the exchange
/// loop, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Message {
    /// Status or capture
    pub kind: MessageKind,
    /// The team the frame refers to
    pub team: Team,
}

impl Message {
    /// Build a status message
    #[must_use]
    pub const fn status(team: Team) -> Self {
        Self {
            kind: MessageKind::Status,
            team,
        }
    }

    /// Build a capture message
    #[must_use]
    pub const fn capture(team: Team) -> Self {
        Self {
            kind: MessageKind::Capture,
            team,
        }
    }

    /// Check whether this is a capture command
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        matches!(self.kind, MessageKind::Capture)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            MessageKind::Status => "status",
            MessageKind::Capture => "capture",
        };
        let team = match self.team {
            Team::Red => "red",
            Team::Blue => "blue",
        };
        write!(f, "{kind}-{team}")
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Message {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}-{}", self.kind, self.team);
    }
}

/// Demodulated level of the receive line
///
/// The receiver hardware is active-low (electrical LOW = carrier seen);
/// `RxLine` implementations absorb that polarity so protocol code only
/// ever compares against these two values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineLevel {
    /// No carrier on the line
    Idle,
    /// Carrier currently detected
    Carrier,
}

#[cfg(feature = "embedded")]
impl defmt::Format for LineLevel {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Idle => defmt::write!(f, "idle"),
            Self::Carrier => defmt::write!(f, "carrier"),
        }
    }
}

/// Device role in the exchange
///
/// Beacons and robots run the same loop over the same encoder/decoder
/// pair; the role decides which frame goes out each cycle and whether a
/// decoded capture may mutate ownership.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Capture point: broadcasts status, accepts captures
    Beacon,
    /// Robot claiming for a fixed team: transmits captures, reads status
    Robot(Team),
}

#[cfg(feature = "embedded")]
impl defmt::Format for Role {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Beacon => defmt::write!(f, "beacon"),
            Self::Robot(team) => defmt::write!(f, "robot/{}", team),
        }
    }
}
