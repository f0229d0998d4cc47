//! ECS components for entities.
//!
//! Submodules overview:
//! - [`vehicle`] – vehicle activation state and engine boost values

pub mod vehicle;
