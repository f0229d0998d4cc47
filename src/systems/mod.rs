//! Engine systems.
//!
//! Submodules overview
//! - [`rumble`] – sample boost and evaluate the rumble accumulator
//! - [`time`] – update simulation time and delta

pub mod rumble;
pub mod time;
