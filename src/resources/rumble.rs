//! Rumble accumulator resource.
//!
//! The [`RumbleManager`] keeps a list of short-lived [`Rumble`] envelopes
//! (attack, sustain, decay) and reduces them once per frame to a single
//! scalar level. Camera shake and controller vibration drivers read that
//! level through [`RumbleManager::current_level`].
//!
//! # How It Works
//!
//! 1. Gameplay code (usually an observer) calls [`RumbleManager::add_rumble`];
//!    the envelope starts at the manager's current clock.
//! 2. A per-frame sampler may call [`RumbleManager::set_continuous_level`]
//!    (e.g. engine boost). Within one frame only the largest value is kept.
//! 3. [`RumbleManager::tick`] evaluates every envelope at the given time,
//!    drops the expired ones, folds in the continuous level and resets it.
//!
//! Envelopes and the continuous level combine with `max`, never with a sum:
//! two simultaneous half-strength hits still give a half-strength rumble.
//!
//! Envelopes are only removed by `tick`. A host that stops ticking the
//! manager while still adding rumbles will grow the list without bound.
//!
//! # Related
//!
//! - [`crate::systems::rumble`] – systems that sample boost and run the tick
//! - [`crate::events::vehicle`] – observers that add damage and death rumbles

use bevy_ecs::prelude::Resource;
use log::{trace, warn};
use smallvec::SmallVec;

/// Inline capacity for active envelopes. More than this spills to the heap.
const INLINE_RUMBLES: usize = 8;

/// Shape of a rumble envelope, without a start time.
///
/// Used for configured rumbles (damage, death) that are instantiated later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RumbleShape {
    /// Peak level reached after the attack phase.
    pub max_level: f32,
    /// Seconds to ramp from zero to `max_level`.
    pub attack_time: f32,
    /// Seconds held at `max_level`.
    pub sustain_time: f32,
    /// Seconds to ramp from `max_level` back to zero.
    pub decay_time: f32,
}

impl RumbleShape {
    pub fn new(max_level: f32, attack_time: f32, sustain_time: f32, decay_time: f32) -> Self {
        RumbleShape {
            max_level,
            attack_time,
            sustain_time,
            decay_time,
        }
    }
}

/// One active rumble envelope.
///
/// The current phase (attack, sustain, decay, expired) is derived from the
/// elapsed time and is never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rumble {
    pub max_level: f32,
    pub attack_time: f32,
    pub sustain_time: f32,
    pub decay_time: f32,
    /// Clock value when the rumble was added.
    pub start_time: f32,
}

impl Rumble {
    /// Create an envelope starting at `start_time`.
    ///
    /// Negative durations are clamped to zero.
    pub fn new(
        max_level: f32,
        attack_time: f32,
        sustain_time: f32,
        decay_time: f32,
        start_time: f32,
    ) -> Self {
        Rumble {
            max_level,
            attack_time: attack_time.max(0.0),
            sustain_time: sustain_time.max(0.0),
            decay_time: decay_time.max(0.0),
            start_time,
        }
    }

    /// Total duration of the envelope in seconds.
    pub fn lifespan(&self) -> f32 {
        self.attack_time + self.sustain_time + self.decay_time
    }

    /// Whether the envelope is over at `current_time`.
    ///
    /// At exactly the end of its lifespan an envelope already contributes
    /// zero, so it is treated as expired there too.
    pub fn is_expired(&self, current_time: f32) -> bool {
        current_time - self.start_time >= self.lifespan()
    }

    /// Normalized amplitude in `[0, 1]` after `elapsed` seconds.
    ///
    /// Zero-length attack jumps straight to full level; zero-length decay
    /// drops straight to zero.
    pub fn amplitude(&self, elapsed: f32) -> f32 {
        if elapsed < self.attack_time {
            if self.attack_time > 0.0 {
                (elapsed / self.attack_time).clamp(0.0, 1.0)
            } else {
                1.0
            }
        } else if elapsed < self.attack_time + self.sustain_time {
            1.0
        } else if self.decay_time > 0.0 {
            let since_decay = elapsed - self.attack_time - self.sustain_time;
            (1.0 - since_decay / self.decay_time).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Level this envelope contributes at `current_time`.
    pub fn level_at(&self, current_time: f32) -> f32 {
        self.amplitude(current_time - self.start_time) * self.max_level
    }
}

/// Accumulates rumble envelopes and a continuous level into one output.
#[derive(Resource, Debug, Clone, Default)]
pub struct RumbleManager {
    rumbles: SmallVec<[Rumble; INLINE_RUMBLES]>,
    continuous_level: f32,
    current_level: f32,
    clock: f32,
}

impl RumbleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rumble starting at the manager's current clock.
    ///
    /// Negative durations are a caller error; they are clamped to zero.
    pub fn add_rumble(
        &mut self,
        max_level: f32,
        attack_time: f32,
        sustain_time: f32,
        decay_time: f32,
    ) {
        if attack_time < 0.0 || sustain_time < 0.0 || decay_time < 0.0 {
            warn!(
                "Negative rumble duration clamped to zero: attack={}, sustain={}, decay={}",
                attack_time, sustain_time, decay_time
            );
        }
        let rumble = Rumble::new(max_level, attack_time, sustain_time, decay_time, self.clock);
        trace!("Adding rumble {:?}", rumble);
        self.rumbles.push(rumble);
    }

    /// Add a rumble from a preconfigured shape.
    pub fn add_envelope(&mut self, shape: RumbleShape) {
        self.add_rumble(
            shape.max_level,
            shape.attack_time,
            shape.sustain_time,
            shape.decay_time,
        );
    }

    /// Report the continuous level for the current frame.
    ///
    /// Repeated calls before the next [`tick`](Self::tick) keep the maximum.
    pub fn set_continuous_level(&mut self, level: f32) {
        self.continuous_level = self.continuous_level.max(level);
    }

    /// Continuous level that the next tick will fold in.
    pub fn continuous_level(&self) -> f32 {
        self.continuous_level
    }

    /// Move the clock without evaluating anything.
    ///
    /// Rumbles added afterwards start at `current_time`.
    pub fn sync_clock(&mut self, current_time: f32) {
        self.clock = current_time;
    }

    /// Clock value new rumbles will start at.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Evaluate all rumbles at `current_time` and return the combined level.
    ///
    /// Expired rumbles are removed and the continuous level is reset to zero.
    pub fn tick(&mut self, current_time: f32) -> f32 {
        self.clock = current_time;

        let mut level = 0.0_f32;
        self.rumbles.retain(|rumble| {
            if rumble.is_expired(current_time) {
                return false;
            }
            level = level.max(rumble.level_at(current_time));
            true
        });

        level = level.max(self.continuous_level);
        self.continuous_level = 0.0;
        self.current_level = level;
        level
    }

    /// Combined level computed by the last tick.
    pub fn current_level(&self) -> f32 {
        self.current_level
    }

    /// Active rumbles in insertion order.
    pub fn rumbles(&self) -> &[Rumble] {
        &self.rumbles
    }

    pub fn len(&self) -> usize {
        self.rumbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rumbles.is_empty()
    }

    /// Drop every rumble and the pending continuous level.
    pub fn clear(&mut self) {
        self.rumbles.clear();
        self.continuous_level = 0.0;
        self.current_level = 0.0;
    }
}
