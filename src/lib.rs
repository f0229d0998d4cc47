//! Vehicle rumble library.
//!
//! Turns vehicle gameplay notifications (hits, destruction, engine boost)
//! into a single rumble level per frame for camera shake and controller
//! vibration. Built on bevy_ecs resources, events, observers and systems.

pub mod components;
pub mod events;
pub mod resources;
pub mod simulation;
pub mod systems;
