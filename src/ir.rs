//! Infrared Protocol Layer
//!
//! Software-defined carrier generation, frame encoding, and the decoding
//! state machine. Everything here is synchronous and blocking: timing is
//! enforced by busy-polling a monotonic microsecond clock, and a send or
//! receive never yields mid-frame.

pub mod carrier;
pub mod decode;
pub mod encode;
pub mod line;
