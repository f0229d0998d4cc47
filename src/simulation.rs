//! Headless rumble simulation.
//!
//! Drives a small ECS world frame by frame: one focused vehicle, the rumble
//! systems and observers, and a scripted [`Timeline`] of hits, boost changes
//! and destruction. Each frame produces a [`RumbleSample`]. Used by the
//! `vehicle-rumble` binary and by the integration tests.

use bevy_ecs::prelude::*;
use log::{debug, info};
use serde::Serialize;

use crate::components::vehicle::{Engines, Vehicle, VehicleActivationState};
use crate::events::vehicle::{
    FocusedVehicleChangedEvent, VehicleDamagedEvent, VehicleDestroyedEvent,
};
use crate::resources::rumble::RumbleManager;
use crate::resources::rumbleconfig::RumbleConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::rumble::{add_rumble_systems, register_rumble_observers};
use crate::systems::time::update_world_time;

/// Something that happens to the simulated vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineAction {
    /// The vehicle takes this much damage.
    Damage(f32),
    /// The forward boost changes to this value and stays there.
    Boost(f32),
    /// The vehicle is destroyed.
    Destroy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineEvent {
    /// World time in seconds at which the action fires.
    pub time: f32,
    pub action: TimelineAction,
}

/// Upper bound on frames a single [`Simulation::run`] may produce
/// (one hour at 1000 fps).
pub const MAX_SIMULATION_FRAMES: u64 = 3_600_000;

/// Time-ordered list of scripted actions.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: Vec<TimelineEvent>,
    next: usize,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action. Actions at the same time fire in insertion order.
    ///
    /// An action pushed for a time that has already been drained fires on
    /// the next [`drain_due`](Self::drain_due).
    pub fn push(&mut self, time: f32, action: TimelineAction) {
        let at = self
            .events
            .partition_point(|e| e.time <= time)
            .max(self.next);
        self.events.insert(at, TimelineEvent { time, action });
    }

    pub fn with(mut self, time: f32, action: TimelineAction) -> Self {
        self.push(time, action);
        self
    }

    /// Pop every action due at or before `now`.
    pub fn drain_due(&mut self, now: f32) -> Vec<TimelineEvent> {
        let start = self.next;
        while self.next < self.events.len() && self.events[self.next].time <= now {
            self.next += 1;
        }
        self.events[start..self.next].to_vec()
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.events.len()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Parse a `TIME:VALUE` pair such as `0.5:40`.
pub fn parse_timed_value(s: &str) -> Result<(f32, f32), String> {
    let (time, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TIME:VALUE, got '{}'", s))?;
    let time: f32 = time
        .trim()
        .parse()
        .map_err(|e| format!("invalid time '{}': {}", time, e))?;
    let value: f32 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value '{}': {}", value, e))?;
    if !time.is_finite() || time < 0.0 {
        return Err(format!("time must be a non-negative number, got {}", time));
    }
    Ok((time, value))
}

/// Number of fixed frames needed to cover `duration` seconds at `fps`.
pub fn frame_count(duration: f32, fps: u32) -> Result<u64, String> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(format!(
            "duration must be a non-negative number, got {}",
            duration
        ));
    }
    let frames = (f64::from(duration) * f64::from(fps.max(1))).round();
    if frames > MAX_SIMULATION_FRAMES as f64 {
        return Err(format!(
            "{}s at {} fps is {} frames, more than the limit of {}",
            duration,
            fps.max(1),
            frames,
            MAX_SIMULATION_FRAMES
        ));
    }
    Ok(frames as u64)
}

/// Rumble state after one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RumbleSample {
    pub frame: u64,
    pub time: f32,
    pub level: f32,
    pub active: usize,
}

/// A world with one focused vehicle and the rumble pipeline installed.
pub struct Simulation {
    world: World,
    schedule: Schedule,
    vehicle: Entity,
    timeline: Timeline,
}

impl Simulation {
    pub fn new(config: RumbleConfig, timeline: Timeline) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(RumbleManager::new());
        world.insert_resource(config);
        register_rumble_observers(&mut world);

        let vehicle = world.spawn((Vehicle::active(), Engines::new())).id();
        world.trigger(FocusedVehicleChangedEvent {
            vehicle: Some(vehicle),
        });

        let mut schedule = Schedule::default();
        add_rumble_systems(&mut schedule);

        info!("Simulation ready with {} timeline events", timeline.len());
        Simulation {
            world,
            schedule,
            vehicle,
            timeline,
        }
    }

    /// Advance by `dt` seconds and return the resulting sample.
    ///
    /// Timeline actions due by the new time fire before the rumble systems
    /// run, so their rumbles start on this frame.
    pub fn step(&mut self, dt: f32) -> RumbleSample {
        update_world_time(&mut self.world, dt);
        let now = self.world.resource::<WorldTime>().elapsed;
        self.world.resource_mut::<RumbleManager>().sync_clock(now);

        for event in self.timeline.drain_due(now) {
            self.apply(event);
        }

        self.schedule.run(&mut self.world);

        let time = self.world.resource::<WorldTime>();
        let rumble = self.world.resource::<RumbleManager>();
        RumbleSample {
            frame: time.frame_count,
            time: time.elapsed,
            level: rumble.current_level(),
            active: rumble.len(),
        }
    }

    /// Run fixed steps of `1 / fps` seconds until `duration` is covered.
    ///
    /// Fails for a non-finite or negative `duration`, or when the run would
    /// exceed [`MAX_SIMULATION_FRAMES`].
    pub fn run(&mut self, duration: f32, fps: u32) -> Result<Vec<RumbleSample>, String> {
        let frames = frame_count(duration, fps)?;
        let dt = 1.0 / fps.max(1) as f32;
        Ok((0..frames).map(|_| self.step(dt)).collect())
    }

    fn apply(&mut self, event: TimelineEvent) {
        debug!("Timeline {:?} at {}", event.action, event.time);
        match event.action {
            TimelineAction::Damage(damage) => {
                self.world.trigger(VehicleDamagedEvent {
                    vehicle: self.vehicle,
                    damage,
                });
            }
            TimelineAction::Boost(boost) => {
                if let Some(mut engines) = self.world.get_mut::<Engines>(self.vehicle) {
                    engines.boost_values[2] = boost;
                }
            }
            TimelineAction::Destroy => {
                if let Some(mut vehicle) = self.world.get_mut::<Vehicle>(self.vehicle) {
                    vehicle.activation = VehicleActivationState::Destroyed;
                }
                self.world.trigger(VehicleDestroyedEvent {
                    vehicle: self.vehicle,
                });
            }
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// The simulated (focused) vehicle.
    pub fn vehicle(&self) -> Entity {
        self.vehicle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timed_value() {
        assert_eq!(parse_timed_value("0.5:40"), Ok((0.5, 40.0)));
        assert_eq!(parse_timed_value(" 2 : -1.5 "), Ok((2.0, -1.5)));
    }

    #[test]
    fn test_parse_timed_value_errors() {
        assert!(parse_timed_value("0.5").is_err());
        assert!(parse_timed_value("soon:40").is_err());
        assert!(parse_timed_value("0.5:lots").is_err());
        assert!(parse_timed_value("-1:40").is_err());
    }

    #[test]
    fn test_timeline_orders_by_time() {
        let mut tl = Timeline::new()
            .with(2.0, TimelineAction::Destroy)
            .with(0.5, TimelineAction::Damage(10.0))
            .with(0.5, TimelineAction::Boost(1.0));

        assert_eq!(tl.len(), 3);
        assert!(tl.drain_due(0.4).is_empty());

        let due = tl.drain_due(1.0);
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].action, TimelineAction::Damage(10.0));
        assert_eq!(due[1].action, TimelineAction::Boost(1.0));
        assert!(!tl.is_finished());

        let due = tl.drain_due(5.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].action, TimelineAction::Destroy);
        assert!(tl.is_finished());
        assert!(tl.drain_due(10.0).is_empty());
    }

    #[test]
    fn test_run_produces_one_sample_per_frame() {
        let mut sim = Simulation::new(RumbleConfig::new(), Timeline::new());
        let samples = sim.run(1.0, 10).unwrap();
        assert_eq!(samples.len(), 10);
        assert_eq!(samples[9].frame, 10);
        assert!(samples.iter().all(|s| s.level == 0.0 && s.active == 0));
    }

    #[test]
    fn test_timeline_push_after_drain_keeps_fired_events() {
        let mut tl = Timeline::new().with(1.0, TimelineAction::Damage(1.0));
        assert_eq!(tl.drain_due(1.0).len(), 1);

        tl.push(0.5, TimelineAction::Damage(2.0));

        let due = tl.drain_due(2.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].action, TimelineAction::Damage(2.0));
        assert!(tl.is_finished());
    }

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(1.0, 60), Ok(60));
        assert_eq!(frame_count(0.0, 60), Ok(0));
        assert_eq!(frame_count(2.0, 0), Ok(2));
    }

    #[test]
    fn test_frame_count_rejects_unbounded_durations() {
        assert!(frame_count(f32::INFINITY, 60).is_err());
        assert!(frame_count(f32::NAN, 60).is_err());
        assert!(frame_count(-1.0, 60).is_err());
        assert!(frame_count(1e10, 60).is_err());
    }

    #[test]
    fn test_run_rejects_infinite_duration_without_stepping() {
        let mut sim = Simulation::new(RumbleConfig::new(), Timeline::new());
        assert!(sim.run(f32::INFINITY, 60).is_err());
        assert!(sim.run(1e10, 60).is_err());
        assert_eq!(sim.world().resource::<WorldTime>().frame_count, 0);
    }

    #[test]
    fn test_sample_serializes_to_json() {
        let sample = RumbleSample {
            frame: 3,
            time: 0.5,
            level: 0.25,
            active: 1,
        };
        let json = serde_json::to_value(sample).unwrap();
        assert_eq!(json["frame"].as_u64(), Some(3));
        assert_eq!(json["level"].as_f64(), Some(0.25));
        assert_eq!(json["active"].as_u64(), Some(1));
    }
}
