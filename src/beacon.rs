//! Beacon Game Logic
//!
//! Ownership state transitions and the per-cycle exchange loop that
//! ties the encoder, decoder, and indicator together.

pub mod cycle;
pub mod state;
