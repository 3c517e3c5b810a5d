//! Hardware Abstraction Layer
//!
//! Wraps concrete GPIO pins and the boot-time clock behind the line
//! traits used by the IR protocol layer. This module isolates all
//! hardware-specific code.

pub mod clock;
pub mod gpio;
