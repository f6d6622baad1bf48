#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system advancing rat spit and player fur balls.
//!
//! Every active missile is integrated along its velocity and its lifetime is
//! counted down. Spit that ends up close enough to the player damages it,
//! fur balls that touch an enemy damage the first one they touch, and a hit
//! always takes precedence over expiry in the same tick.

use std::collections::BTreeMap;

use glam::Vec3;
use maw_core::{
    advanced_seconds, overlaps, planar_distance, Body, Command, EntityId, EntityKind,
    EntitySnapshot, EntityState, EntityView, Event, MeleeTuning, RatTuning,
};

/// Projectile and attack-volume lifecycle system.
#[derive(Clone, Debug)]
pub struct Projectiles {
    rat: RatTuning,
    melee: MeleeTuning,
}

impl Projectiles {
    /// Creates the system from spit and fur-ball tuning.
    #[must_use]
    pub fn new(rat: RatTuning, melee: MeleeTuning) -> Self {
        Self { rat, melee }
    }

    /// Emits integration, hit and expiry commands for every active missile.
    pub fn handle(
        &self,
        events: &[Event],
        player: &EntitySnapshot,
        projectiles: &EntityView,
        attack_volumes: &EntityView,
        enemies: &EntityView,
        out: &mut Vec<Command>,
    ) {
        let dt = advanced_seconds(events);
        if dt <= 0.0 {
            return;
        }

        let mut player_health = player.is_active().then_some(player.health);
        for spit in projectiles.active_of(EntityKind::Spit) {
            let Some(flight) = advance(spit, dt, out) else {
                continue;
            };
            let hit = player_health.is_some_and(|health| {
                health > 0.0
                    && planar_distance(player.position(), flight.position) < self.rat.spit_hit_radius
            });
            if hit {
                log::info!("HIT: spit #{} strikes Maw", spit.id.get());
                out.push(Command::Damage {
                    entity: EntityId::PLAYER,
                    amount: self.rat.spit_damage,
                });
                player_health = player_health.map(|health| health - self.rat.spit_damage);
                out.push(Command::Deactivate { entity: spit.id });
            } else if flight.expired {
                out.push(Command::Deactivate { entity: spit.id });
            }
        }

        let mut enemy_health: BTreeMap<EntityId, f32> = enemies
            .active()
            .map(|enemy| (enemy.id, enemy.health))
            .collect();
        for volume in attack_volumes.active_of(EntityKind::FurBall) {
            let Some(flight) = advance(volume, dt, out) else {
                continue;
            };
            let moved = Body {
                position: flight.position,
                ..volume.body
            };
            let target = enemies.active().find(|enemy| {
                enemy_health.get(&enemy.id).is_some_and(|left| *left > 0.0)
                    && overlaps(&moved, &enemy.body)
            });
            if let Some(enemy) = target {
                out.push(Command::Damage {
                    entity: enemy.id,
                    amount: self.melee.volume_damage,
                });
                if let Some(left) = enemy_health.get_mut(&enemy.id) {
                    *left -= self.melee.volume_damage;
                }
                out.push(Command::Deactivate { entity: volume.id });
            } else if flight.expired {
                out.push(Command::Deactivate { entity: volume.id });
            }
        }
    }
}

impl Default for Projectiles {
    fn default() -> Self {
        Self::new(RatTuning::default(), MeleeTuning::default())
    }
}

struct Flight {
    position: Vec3,
    expired: bool,
}

fn advance(missile: &EntitySnapshot, dt: f32, out: &mut Vec<Command>) -> Option<Flight> {
    let EntityState::Missile {
        velocity,
        lifetime_remaining,
    } = missile.state
    else {
        return None;
    };

    let position = missile.position() + velocity * dt;
    let lifetime_remaining = lifetime_remaining - dt;
    out.push(Command::UpdateMissile {
        entity: missile.id,
        position,
        lifetime_remaining,
    });
    Some(Flight {
        position,
        expired: lifetime_remaining <= 0.0,
    })
}
