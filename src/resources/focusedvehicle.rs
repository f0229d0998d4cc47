//! Focused vehicle resource.
//!
//! Damage and destruction notifications only produce rumbles for the vehicle
//! stored here. It is changed through
//! [`FocusedVehicleChangedEvent`](crate::events::vehicle::FocusedVehicleChangedEvent).

use bevy_ecs::prelude::{Entity, Resource};

/// The vehicle the player is currently controlling or watching, if any.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusedVehicle(pub Option<Entity>);

impl FocusedVehicle {
    pub fn get(&self) -> Option<Entity> {
        self.0
    }

    /// Whether `entity` is the focused vehicle.
    pub fn is(&self, entity: Entity) -> bool {
        self.0 == Some(entity)
    }
}
