#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system driving the player's melee attack.
//!
//! A rising edge on the attack trigger opens an attack window. With the
//! fur-ball style three volumes are thrown in a fan as soon as the window
//! opens. Part way through the window the swipe lands exactly once: enemies
//! within reach take melee damage, and every live fur ball touching an enemy
//! is spent on the first one it touches. The trigger re-arms once the window
//! closes.

use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use maw_core::{
    advanced_seconds, overlaps, planar_distance, AttackStyle, Command, ControlState, EntityId,
    EntityKind, EntitySnapshot, EntityView, Event, MeleeTuning,
};

const DIRECTION_GUARD: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
struct AttackWindow {
    elapsed: f32,
    hit_applied: bool,
}

/// Player melee system that queues attack-volume and damage commands.
#[derive(Debug)]
pub struct PlayerCombat {
    melee: MeleeTuning,
    window: Option<AttackWindow>,
    trigger_held: bool,
    scratch: Vec<Command>,
}

impl PlayerCombat {
    /// Creates a new combat system with no attack in progress.
    #[must_use]
    pub fn new(melee: MeleeTuning) -> Self {
        Self {
            melee,
            window: None,
            trigger_held: false,
            scratch: Vec::new(),
        }
    }

    /// Reports whether an attack window is currently open.
    #[must_use]
    pub fn is_attacking(&self) -> bool {
        self.window.is_some()
    }

    /// Advances the attack window and emits the commands it produces this tick.
    pub fn handle(
        &mut self,
        events: &[Event],
        controls: &ControlState,
        player: &EntitySnapshot,
        enemies: &EntityView,
        attack_volumes: &EntityView,
        out: &mut Vec<Command>,
    ) {
        let rising_edge = controls.attack && !self.trigger_held;
        self.trigger_held = controls.attack;

        if !player.is_active() {
            self.window = None;
            return;
        }

        self.scratch.clear();
        let dt = advanced_seconds(events);

        if let Some(mut window) = self.window.take() {
            window.elapsed += dt;
            if !window.hit_applied && window.elapsed >= self.hit_time() {
                window.hit_applied = true;
                self.land_hits(player, enemies, attack_volumes);
            }
            if window.elapsed >= self.melee.duration {
                log::info!("ATTACK: Maw is ready to strike again");
            } else {
                self.window = Some(window);
            }
        }

        if rising_edge && self.window.is_none() {
            log::info!("ATTACK: Maw lashes out");
            if self.melee.style == AttackStyle::FurBallFan {
                self.throw_fan(player);
            }
            self.window = Some(AttackWindow {
                elapsed: 0.0,
                hit_applied: false,
            });
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }

    fn hit_time(&self) -> f32 {
        self.melee.duration * self.melee.hit_fraction
    }

    fn throw_fan(&mut self, player: &EntitySnapshot) {
        let front = Quat::from_rotation_y(player.yaw.to_radians()) * Vec3::Z;
        let right = front.cross(Vec3::Y);
        let mut directions = vec![front];
        if right.length() > DIRECTION_GUARD {
            let right = right.normalize();
            for side in [1.0, -1.0] {
                let diagonal = front + right * self.melee.fan_spread * side;
                if diagonal.length() > DIRECTION_GUARD {
                    directions.push(diagonal.normalize());
                }
            }
        }

        let launch = player.position() + Vec3::Y * self.melee.volume_height;
        for direction in directions {
            self.scratch.push(Command::SpawnAttackVolume {
                origin: launch + direction * self.melee.volume_forward_offset,
                velocity: direction * self.melee.volume_speed,
            });
        }
    }

    fn land_hits(
        &mut self,
        player: &EntitySnapshot,
        enemies: &EntityView,
        attack_volumes: &EntityView,
    ) {
        let mut health: BTreeMap<EntityId, f32> = enemies
            .active()
            .map(|enemy| (enemy.id, enemy.health))
            .collect();

        for enemy in enemies.active() {
            if planar_distance(player.position(), enemy.position()) > self.melee.range {
                continue;
            }
            self.strike(enemy, self.melee.damage, &mut health);
        }

        for volume in attack_volumes.active_of(EntityKind::FurBall) {
            let target = enemies.active().find(|enemy| {
                health.get(&enemy.id).is_some_and(|left| *left > 0.0)
                    && overlaps(&volume.body, &enemy.body)
            });
            if let Some(enemy) = target {
                self.strike(enemy, self.melee.volume_damage, &mut health);
                self.scratch.push(Command::Deactivate { entity: volume.id });
            }
        }
    }

    fn strike(&mut self, enemy: &EntitySnapshot, amount: f32, health: &mut BTreeMap<EntityId, f32>) {
        let Some(left) = health.get_mut(&enemy.id) else {
            return;
        };
        if *left <= 0.0 {
            return;
        }
        *left -= amount;
        self.scratch.push(Command::Damage {
            entity: enemy.id,
            amount,
        });
    }
}

impl Default for PlayerCombat {
    fn default() -> Self {
        Self::new(MeleeTuning::default())
    }
}
