//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// applies the current `time_scale`, writes both `elapsed` and `delta`, and
/// counts the frame. Negative deltas are treated as zero so the clock never
/// runs backwards.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt.max(0.0) * wt.time_scale.max(0.0);
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_update_world_time_accumulates() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());

        update_world_time(&mut world, 0.25);
        update_world_time(&mut world, 0.5);

        let wt = world.resource::<WorldTime>();
        assert!(approx_eq(wt.elapsed, 0.75));
        assert!(approx_eq(wt.delta, 0.5));
        assert_eq!(wt.frame_count, 2);
    }

    #[test]
    fn test_update_world_time_applies_time_scale() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(0.5));

        update_world_time(&mut world, 1.0);

        let wt = world.resource::<WorldTime>();
        assert!(approx_eq(wt.elapsed, 0.5));
        assert!(approx_eq(wt.delta, 0.5));
    }

    #[test]
    fn test_update_world_time_frozen_and_negative() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(0.0));

        update_world_time(&mut world, 1.0);
        {
            let mut wt = world.resource_mut::<WorldTime>();
            wt.time_scale = 1.0;
        }
        update_world_time(&mut world, -1.0);

        let wt = world.resource::<WorldTime>();
        assert!(approx_eq(wt.elapsed, 0.0));
        assert_eq!(wt.frame_count, 2);
    }
}
