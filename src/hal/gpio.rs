//! GPIO Abstractions
//!
//! Type-safe wrappers giving semantic meaning to the beacon's pins:
//! the emitter drive line, the active-low receiver line, and the
//! three-channel indicator LED. All are generic over the embedded-hal
//! digital traits, so any pin type the HAL provides fits.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::beacon::cycle::Indicator;
use crate::ir::line::{RxLine, TxLine};
use crate::types::{LineLevel, TeamState};

/// IR emitter drive line (active high)
pub struct EmitterPin<P: OutputPin> {
    pin: P,
}

impl<P: OutputPin> EmitterPin<P> {
    /// Wrap an output pin (driven low immediately)
    pub fn new(mut pin: P) -> Self {
        pin.set_low().ok();
        Self { pin }
    }
}

impl<P: OutputPin> TxLine for EmitterPin<P> {
    fn set(&mut self, high: bool) {
        // GPIO writes on this target are infallible
        if high {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
    }
}

/// Demodulated IR receiver line
///
/// The receiver module pulls its output LOW while it sees carrier; the
/// polarity is absorbed here so protocol code only sees [`LineLevel`].
pub struct ReceiverPin<P: InputPin> {
    pin: P,
}

impl<P: InputPin> ReceiverPin<P> {
    /// Wrap an input pin (expects an external or internal pull-up)
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> RxLine for ReceiverPin<P> {
    fn level(&mut self) -> LineLevel {
        // A failed read counts as idle; the decoder treats it as any
        // other malformed sample
        if self.pin.is_low().unwrap_or(false) {
            LineLevel::Carrier
        } else {
            LineLevel::Idle
        }
    }
}

/// Three-channel indicator LED
///
/// On/off per channel: green while neutral, red or blue once claimed.
pub struct RgbIndicator<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    red: R,
    green: G,
    blue: B,
}

impl<R, G, B> RgbIndicator<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    /// Wrap the three channel pins (all driven off)
    pub fn new(mut red: R, mut green: G, mut blue: B) -> Self {
        red.set_low().ok();
        green.set_low().ok();
        blue.set_low().ok();
        Self { red, green, blue }
    }
}

impl<R, G, B> Indicator for RgbIndicator<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    fn show(&mut self, state: TeamState) {
        let (r, g, b) = match state {
            TeamState::Neutral => (false, true, false),
            TeamState::Red => (true, false, false),
            TeamState::Blue => (false, false, true),
        };
        if r {
            self.red.set_high().ok();
        } else {
            self.red.set_low().ok();
        }
        if g {
            self.green.set_high().ok();
        } else {
            self.green.set_low().ok();
        }
        if b {
            self.blue.set_high().ok();
        } else {
            self.blue.set_low().ok();
        }
    }
}
