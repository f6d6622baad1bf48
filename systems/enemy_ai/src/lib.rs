#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system steering enemies and obstacles relative to the player.
//!
//! Rats hold a preferred distance band and spit from inside it, the boss
//! walks straight at the player and burns health on contact, and cars patrol
//! along X, wrapping around at the street bounds.

mod boss;
mod ranged;
mod traffic;

use maw_core::{
    advanced_seconds, Command, EntityKind, EntitySnapshot, EntityView, Event, HazardTuning,
    RatTuning,
};

/// Vectors shorter than this are never normalised.
pub const DIRECTION_GUARD: f32 = 1e-4;

/// Enemy behaviour system covering rats, the boss and patrolling cars.
#[derive(Clone, Debug)]
pub struct EnemyAi {
    rat: RatTuning,
    hazards: HazardTuning,
}

impl EnemyAi {
    /// Creates the system from rat and hazard tuning.
    #[must_use]
    pub fn new(rat: RatTuning, hazards: HazardTuning) -> Self {
        Self { rat, hazards }
    }

    /// Emits steering, attack and contact-damage commands for one tick.
    ///
    /// Nothing happens while the player is inactive.
    pub fn handle(
        &self,
        events: &[Event],
        player: &EntitySnapshot,
        enemies: &EntityView,
        obstacles: &EntityView,
        out: &mut Vec<Command>,
    ) {
        if !player.is_active() {
            return;
        }

        let dt = advanced_seconds(events);
        if dt <= 0.0 {
            return;
        }

        for rat in enemies.active_of(EntityKind::Rat) {
            ranged::steer(&self.rat, dt, player, rat, out);
        }
        for boss in enemies.active_of(EntityKind::Boss) {
            boss::chase(&self.hazards, dt, player, boss, out);
        }
        for car in obstacles.active_of(EntityKind::Car) {
            traffic::patrol(&self.hazards, dt, player, car, out);
        }
    }
}

impl Default for EnemyAi {
    fn default() -> Self {
        Self::new(RatTuning::default(), HazardTuning::default())
    }
}
