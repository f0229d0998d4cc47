//! ECS resources made available to systems.
//!
//! Overview
//! - `focusedvehicle` – the vehicle whose hits and boost produce rumbles
//! - `rumble` – the rumble accumulator and its envelopes
//! - `rumbleconfig` – rumble tunables loaded from an INI file
//! - `worldtime` – simulation time and delta
pub mod focusedvehicle;
pub mod rumble;
pub mod rumbleconfig;
pub mod worldtime;
