//! Capture-Beacon Firmware Library
//!
//! This library provides the core functionality for an infrared
//! "capture beacon" game node. A beacon broadcasts its ownership state
//! (Neutral, Red, or Blue) over a 38kHz infrared carrier and can be
//! claimed by a robot sending an infrared capture command. Carrier
//! generation, frame encoding, and decoding are all software-defined:
//! raw pin toggling against a monotonic microsecond clock, with no
//! signal-processing peripheral.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Beacon Loop  │  Ownership State  │  Indicator Sink          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      IR PROTOCOL LAYER                       │
//! │  Carrier Modulator │ Frame Encoder │ Frame Decoder           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  Emitter Pin  │  Receiver Pin  │  RGB LED  │  Clock          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **No hidden statics**: carrier phase, ownership, and pin handles
//!   live in explicit context objects
//! - **Blocking by construction**: a frame send or receive never yields;
//!   all waits are deadline busy-polls on a microsecond clock
//! - **Type-driven design**: line levels, teams, and messages are
//!   domain types, never raw integers
//! - **No unsafe in application code**: all unsafe isolated in HAL/FFI layers
//! - **Explicit error handling**: a failed decode is `None`, never a fault

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Wraps concrete GPIO pins and the boot-time clock behind the line
/// traits used by the IR protocol layer.
#[cfg(feature = "embedded")]
pub mod hal;

/// Infrared Protocol Layer
///
/// Carrier modulation, frame encoding, and the decoding state machine.
pub mod ir;

/// Beacon Game Logic
///
/// Ownership state transitions and the per-cycle exchange loop.
pub mod beacon;

/// Simulated Link
///
/// Deterministic clock, waveforms, and pin probes for host-side tests.
pub mod sim;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    // Line traits
    pub use crate::ir::line::{Clock, RxLine, TxLine};

    // Common traits
    pub use embedded_hal::digital::{InputPin, OutputPin};

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
