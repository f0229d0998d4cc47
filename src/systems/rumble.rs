//! Rumble systems.
//!
//! This module provides the per-frame systems that drive the
//! [`RumbleManager`](crate::resources::rumble::RumbleManager):
//!
//! 1. [`sync_rumble_clock`] moves the manager's clock to this frame's time,
//!    so rumbles added during the frame start now.
//! 2. [`boost_rumble_system`] samples the focused vehicle's forward boost
//!    into the continuous level.
//! 3. [`update_rumble_system`] evaluates all rumbles and stores the combined
//!    level.
//!
//! Steps 1 and 2 belong to [`RumbleSet::Sample`], step 3 to
//! [`RumbleSet::Evaluate`]. Gameplay systems that trigger vehicle events
//! should run before [`RumbleSet::Evaluate`] so their rumbles are seen in the
//! same frame.
//!
//! # Resource Dependencies
//! - `WorldTime` – simulation clock
//! - `RumbleManager` (mutable) – the accumulator
//! - `FocusedVehicle`, `RumbleConfig` (optional)

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::vehicle::{Engines, Vehicle};
use crate::events::vehicle::{
    focused_vehicle_changed_observer, vehicle_damaged_observer, vehicle_destroyed_observer,
};
use crate::resources::focusedvehicle::FocusedVehicle;
use crate::resources::rumble::RumbleManager;
use crate::resources::rumbleconfig::RumbleConfig;
use crate::resources::worldtime::WorldTime;

/// Ordering of the rumble systems within a frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RumbleSet {
    /// Clock sync and continuous level sampling.
    Sample,
    /// Evaluation of the combined level.
    Evaluate,
}

/// Move the rumble clock to the current world time.
pub fn sync_rumble_clock(world_time: Res<WorldTime>, mut rumble: ResMut<RumbleManager>) {
    rumble.sync_clock(world_time.elapsed);
}

/// Feed the focused vehicle's forward boost into the continuous level.
///
/// Only vehicles that are active in the scene and have [`Engines`] rumble.
pub fn boost_rumble_system(
    focused: Option<Res<FocusedVehicle>>,
    config: Option<Res<RumbleConfig>>,
    vehicles: Query<(&Vehicle, &Engines)>,
    mut rumble: ResMut<RumbleManager>,
) {
    let Some(entity) = focused.and_then(|f| f.get()) else {
        return;
    };
    let Ok((vehicle, engines)) = vehicles.get(entity) else {
        return;
    };
    if !vehicle.is_active_in_scene() {
        return;
    }
    let boost = engines.forward_boost();
    let level = match config {
        Some(config) => config.boost_rumble_level(boost),
        None => RumbleConfig::new().boost_rumble_level(boost),
    };
    rumble.set_continuous_level(level);
}

/// Evaluate all rumbles at the current world time.
pub fn update_rumble_system(world_time: Res<WorldTime>, mut rumble: ResMut<RumbleManager>) {
    let level = rumble.tick(world_time.elapsed);
    trace!(
        "Rumble level {} at {} ({} active)",
        level,
        world_time.elapsed,
        rumble.len()
    );
}

/// Add the rumble systems to `schedule`, ordered by [`RumbleSet`].
pub fn add_rumble_systems(schedule: &mut Schedule) {
    schedule.configure_sets((RumbleSet::Sample, RumbleSet::Evaluate).chain());
    schedule.add_systems(
        (sync_rumble_clock, boost_rumble_system)
            .chain()
            .in_set(RumbleSet::Sample),
    );
    schedule.add_systems(update_rumble_system.in_set(RumbleSet::Evaluate));
}

/// Register the vehicle event observers on `world`.
///
/// Also inserts an empty [`FocusedVehicle`] if none exists yet.
pub fn register_rumble_observers(world: &mut World) {
    world.init_resource::<FocusedVehicle>();
    world.add_observer(focused_vehicle_changed_observer);
    world.add_observer(vehicle_damaged_observer);
    world.add_observer(vehicle_destroyed_observer);
    // Ensure the observers are registered before any event is triggered.
    world.flush();
}
