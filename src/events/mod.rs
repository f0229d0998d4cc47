//! Event types and observers.
//!
//! Submodules:
//! - [`vehicle`] – focus, damage and destruction notifications for vehicles
//!   and the observers that turn them into rumbles
pub mod vehicle;
