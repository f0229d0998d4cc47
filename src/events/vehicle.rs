//! Vehicle notifications and the observers that turn them into rumbles.
//!
//! Gameplay code triggers these events; the observers in this module keep
//! [`FocusedVehicle`] up to date and add rumbles to the [`RumbleManager`]
//! when the focused vehicle is hit or destroyed. Notifications about any
//! other vehicle are ignored, so switching focus never requires
//! unsubscribing from the previous vehicle.
//!
//! Register the observers once with
//! [`register_rumble_observers`](crate::systems::rumble::register_rumble_observers).
//!
//! # Example
//!
//! ```ignore
//! world.trigger(FocusedVehicleChangedEvent { vehicle: Some(ship) });
//! world.trigger(VehicleDamagedEvent { vehicle: ship, damage: 35.0 });
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::resources::focusedvehicle::FocusedVehicle;
use crate::resources::rumble::RumbleManager;
use crate::resources::rumbleconfig::RumbleConfig;

/// A different vehicle (or none) is now in focus.
#[derive(Event, Debug, Clone, Copy)]
pub struct FocusedVehicleChangedEvent {
    pub vehicle: Option<Entity>,
}

/// A vehicle received damage.
#[derive(Event, Debug, Clone, Copy)]
pub struct VehicleDamagedEvent {
    pub vehicle: Entity,
    /// Amount of damage dealt by the hit.
    pub damage: f32,
}

/// A vehicle was destroyed.
#[derive(Event, Debug, Clone, Copy)]
pub struct VehicleDestroyedEvent {
    pub vehicle: Entity,
}

/// Observer that stores the newly focused vehicle.
///
/// Inserts [`FocusedVehicle`] if it does not exist yet.
pub fn focused_vehicle_changed_observer(
    trigger: On<FocusedVehicleChangedEvent>,
    mut commands: Commands,
    focused: Option<ResMut<FocusedVehicle>>,
) {
    let vehicle = trigger.event().vehicle;
    info!("Focused vehicle changed to {:?}", vehicle);
    match focused {
        Some(mut focused) => focused.0 = vehicle,
        None => commands.insert_resource(FocusedVehicle(vehicle)),
    }
}

/// Observer that adds a damage rumble when the focused vehicle is hit.
///
/// The level is `damage * damage_to_rumble_coefficient` clamped to `[0, 1]`;
/// the envelope times come from [`RumbleConfig`].
pub fn vehicle_damaged_observer(
    trigger: On<VehicleDamagedEvent>,
    focused: Option<Res<FocusedVehicle>>,
    config: Option<Res<RumbleConfig>>,
    rumble: Option<ResMut<RumbleManager>>,
) {
    let event = trigger.event();
    if !focused.is_some_and(|f| f.is(event.vehicle)) {
        return;
    }
    let Some(mut rumble) = rumble else {
        warn!("RumbleManager missing, dropping damage rumble");
        return;
    };
    let shape = match config {
        Some(config) => config.damage_rumble_shape(event.damage),
        None => RumbleConfig::new().damage_rumble_shape(event.damage),
    };
    debug!(
        "Focused vehicle {:?} took {} damage, rumble level {}",
        event.vehicle, event.damage, shape.max_level
    );
    rumble.add_envelope(shape);
}

/// Observer that adds the death rumble when the focused vehicle is destroyed.
///
/// Does nothing when `death_rumble_on_destroyed` is disabled.
pub fn vehicle_destroyed_observer(
    trigger: On<VehicleDestroyedEvent>,
    focused: Option<Res<FocusedVehicle>>,
    config: Option<Res<RumbleConfig>>,
    rumble: Option<ResMut<RumbleManager>>,
) {
    let vehicle = trigger.event().vehicle;
    if !focused.is_some_and(|f| f.is(vehicle)) {
        return;
    }
    let config = config.map(|c| (*c).clone()).unwrap_or_default();
    if !config.death_rumble_on_destroyed {
        debug!("Death rumble disabled, ignoring destruction of {:?}", vehicle);
        return;
    }
    let Some(mut rumble) = rumble else {
        warn!("RumbleManager missing, dropping death rumble");
        return;
    };
    info!("Focused vehicle {:?} destroyed, adding death rumble", vehicle);
    rumble.add_envelope(config.death_rumble_shape());
}
