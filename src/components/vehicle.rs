//! Vehicle components read by the rumble systems.
//!
//! These are written by gameplay code outside this crate. The rumble systems
//! only read them:
//! - [`Vehicle`] – whether the vehicle is currently active in the scene
//! - [`Engines`] – the current boost values of the vehicle's engines

use bevy_ecs::prelude::Component;

/// Lifecycle state of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleActivationState {
    #[default]
    Inactive,
    ActiveInScene,
    Destroyed,
}

/// Marks an entity as a vehicle.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Vehicle {
    pub activation: VehicleActivationState,
}

impl Vehicle {
    pub fn active() -> Self {
        Vehicle {
            activation: VehicleActivationState::ActiveInScene,
        }
    }

    pub fn is_active_in_scene(&self) -> bool {
        self.activation == VehicleActivationState::ActiveInScene
    }
}

/// Current engine boost of a vehicle, per local axis (x, y, z).
///
/// The z axis is the forward thrust axis.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Engines {
    pub boost_values: [f32; 3],
}

impl Engines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engines currently boosting forward by `boost`.
    pub fn with_forward_boost(mut self, boost: f32) -> Self {
        self.boost_values[2] = boost;
        self
    }

    /// Boost along the forward (z) axis.
    pub fn forward_boost(&self) -> f32 {
        self.boost_values[2]
    }
}
