#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maw.
//!
//! The world owns the player, every per-category entity collection, the
//! level state machine and the placement random stream. It only changes in
//! response to [`Command`] values passed to [`apply`], and reports what
//! happened through [`Event`] values.

mod registry;
mod spawn;

use std::time::Duration;

use glam::Vec3;
use maw_core::{
    Command, EntityId, EntityKind, EntityState, Event, GameOutcome, LevelState, Placement, Tuning,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use registry::{Entity, EntityRegistry};
use spawn::{Corridor, ScatterSearch};

/// Represents the authoritative Maw world state.
#[derive(Debug)]
pub struct World {
    tuning: Tuning,
    player: Entity,
    registry: EntityRegistry,
    level: LevelState,
    outcome: Option<GameOutcome>,
    placement_rng: ChaCha8Rng,
    tick_index: u64,
    elapsed: Duration,
}

impl World {
    /// Creates a world populated with the shipped tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    /// Creates a world in the sewer level: the player at its spawn point and
    /// both rows of sewer walls.
    #[must_use]
    pub fn with_tuning(tuning: Tuning) -> Self {
        let player = spawn::player(EntityId::PLAYER, &tuning.player);
        let mut registry = EntityRegistry::new();
        spawn::sewer_walls(&mut registry, &tuning.layout, tuning.player.spawn_position);

        Self {
            placement_rng: ChaCha8Rng::seed_from_u64(tuning.seed),
            player,
            registry,
            level: LevelState::Sewers,
            outcome: None,
            tick_index: 0,
            elapsed: Duration::ZERO,
            tuning,
        }
    }

    fn entity(&self, id: EntityId) -> Option<&Entity> {
        if id == EntityId::PLAYER {
            Some(&self.player)
        } else {
            self.registry.get(id)
        }
    }

    fn active_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let entity = if id == EntityId::PLAYER {
            Some(&mut self.player)
        } else {
            self.registry.get_mut(id)
        };
        entity.filter(|entity| entity.active)
    }

    fn insert(&mut self, entity: Entity, out_events: &mut Vec<Event>) {
        let event = Event::EntitySpawned {
            entity: entity.id,
            kind: entity.kind,
            position: entity.position,
        };
        log::debug!(
            "spawned {} #{} at {:?}",
            entity.kind.label(),
            entity.id.get(),
            entity.position
        );
        if self.registry.insert(entity) {
            out_events.push(event);
        }
    }

    fn spawn_enemy(
        &mut self,
        kind: EntityKind,
        at: Vec3,
        placement: Placement,
        out_events: &mut Vec<Event>,
    ) {
        if !kind.is_enemy() {
            log::debug!("ignored enemy spawn request for {}", kind.label());
            return;
        }
        let id = self.registry.allocate_id();
        let Some(mut entity) = spawn::enemy(id, kind, at, &self.tuning) else {
            return;
        };

        if placement == Placement::Scatter {
            let corridor = (self.level == LevelState::Sewers).then(|| Corridor {
                center: self.player.position.x,
                half_width: self.tuning.rat.corridor_half_width,
            });
            let search = ScatterSearch {
                radius: self.tuning.rat.spawn_radius,
                attempts: self.tuning.rat.placement_attempts,
                corridor,
            };
            let placed = spawn::scatter(
                entity.body(),
                at,
                search,
                &self.registry,
                &mut self.placement_rng,
            );
            entity.position = placed.position;
            if placed.fell_back {
                log::debug!(
                    "placement for {} #{} fell back to {:?}",
                    kind.label(),
                    id.get(),
                    at
                );
                out_events.push(Event::PlacementFellBack {
                    entity: id,
                    kind,
                    requested: at,
                });
            }
        }

        self.insert(entity, out_events);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands addressing unknown or inactive entities are ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            world.elapsed = world.elapsed.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::MovePlayer { translation } => {
            if let Some(player) = world.active_entity_mut(EntityId::PLAYER) {
                player.position += translation;
            }
        }
        Command::RotatePlayer { degrees } => {
            if let Some(player) = world.active_entity_mut(EntityId::PLAYER) {
                player.yaw += degrees;
            }
        }
        Command::MoveEntity {
            entity,
            translation,
        } => {
            if let Some(target) = world.active_entity_mut(entity) {
                target.position += translation;
            }
        }
        Command::PlaceEntity { entity, position } => {
            if let Some(target) = world.active_entity_mut(entity) {
                target.position = position;
            }
        }
        Command::SetAttacking { entity, attacking } => {
            if let Some(target) = world.active_entity_mut(entity) {
                if let EntityState::Combatant {
                    attacking: ref mut stance,
                    ..
                } = target.state
                {
                    *stance = attacking;
                }
            }
        }
        Command::SetCooldown { entity, remaining } => {
            if let Some(target) = world.active_entity_mut(entity) {
                if let EntityState::Combatant {
                    ref mut cooldown_remaining,
                    ..
                } = target.state
                {
                    *cooldown_remaining = remaining;
                }
            }
        }
        Command::UpdateMissile {
            entity,
            position,
            lifetime_remaining,
        } => {
            if let Some(target) = world.active_entity_mut(entity) {
                if let EntityState::Missile {
                    lifetime_remaining: ref mut lifetime,
                    ..
                } = target.state
                {
                    *lifetime = lifetime_remaining;
                    target.position = position;
                }
            }
        }
        Command::Damage { entity, amount } => {
            if let Some(target) = world.active_entity_mut(entity) {
                target.health -= amount;
                out_events.push(Event::EntityDamaged {
                    entity,
                    kind: target.kind,
                    amount,
                    remaining: target.health,
                });
                if target.health <= 0.0 {
                    target.active = false;
                    out_events.push(Event::EntityDefeated {
                        entity,
                        kind: target.kind,
                    });
                }
            }
        }
        Command::RestoreHealth { entity } => {
            if let Some(target) = world.active_entity_mut(entity) {
                target.health = target.max_health;
                if entity == EntityId::PLAYER {
                    out_events.push(Event::PlayerHealed {
                        health: target.health,
                    });
                }
            }
        }
        Command::Deactivate { entity } => {
            if let Some(target) = world.active_entity_mut(entity) {
                target.active = false;
                out_events.push(Event::EntityDeactivated {
                    entity,
                    kind: target.kind,
                });
            }
        }
        Command::SpawnEnemy {
            kind,
            at,
            placement,
        } => world.spawn_enemy(kind, at, placement, out_events),
        Command::SpawnObstacle { at } => {
            let id = world.registry.allocate_id();
            let car = spawn::obstacle(id, at, &world.tuning);
            world.insert(car, out_events);
        }
        Command::SpawnPickup { kind, at } => {
            if !kind.is_pickup() {
                log::debug!("ignored pickup spawn request for {}", kind.label());
                return;
            }
            let id = world.registry.allocate_id();
            if let Some(pickup) = spawn::pickup(id, kind, at, &world.tuning.layout) {
                world.insert(pickup, out_events);
            }
        }
        Command::SpawnProjectile { origin, velocity } => {
            let id = world.registry.allocate_id();
            let spit = spawn::projectile(id, origin, velocity, &world.tuning.rat);
            world.insert(spit, out_events);
        }
        Command::SpawnAttackVolume { origin, velocity } => {
            let id = world.registry.allocate_id();
            let fur_ball = spawn::attack_volume(id, origin, velocity, &world.tuning.melee);
            world.insert(fur_ball, out_events);
        }
        Command::ClearCategory { category } => {
            let removed = world.registry.clear(category);
            out_events.push(Event::CategoryCleared { category, removed });
        }
        Command::AdvanceLevel { to } => {
            let from = world.level;
            if to <= from || to.is_terminal() {
                log::debug!("rejected level change from {:?} to {:?}", from, to);
                return;
            }
            world.level = to;
            out_events.push(Event::LevelAdvanced { from, to });
        }
        Command::EndGame { outcome } => {
            let from = world.level;
            if from.is_terminal() {
                return;
            }
            world.level = LevelState::GameOver;
            world.outcome = Some(outcome);
            out_events.push(Event::LevelAdvanced {
                from,
                to: LevelState::GameOver,
            });
            out_events.push(Event::GameEnded { outcome });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use maw_core::{
        Category, Drawable, EntityId, EntitySnapshot, EntityView, Frame, GameOutcome, LevelState,
        Tuning,
    };

    use super::World;

    /// Provides read-only access to the tuning the world was created with.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Reports the active level.
    #[must_use]
    pub fn level(world: &World) -> LevelState {
        world.level
    }

    /// Reports how the game ended, if it has.
    #[must_use]
    pub fn outcome(world: &World) -> Option<GameOutcome> {
        world.outcome
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Simulated time accumulated across every tick.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> EntitySnapshot {
        world.player.snapshot()
    }

    /// Captures the state of a single entity, including the player.
    #[must_use]
    pub fn entity(world: &World, id: EntityId) -> Option<EntitySnapshot> {
        world.entity(id).map(|entity| entity.snapshot())
    }

    /// Captures every entity stored in the provided category, active or not.
    #[must_use]
    pub fn entities(world: &World, category: Category) -> EntityView {
        EntityView::from_snapshots(
            world
                .registry
                .collection(category)
                .iter()
                .map(|entity| entity.snapshot())
                .collect(),
        )
    }

    /// Builds the drawable frame for the current state: the player first,
    /// then active entities in category storage order.
    #[must_use]
    pub fn frame(world: &World) -> Frame {
        let drawables = std::iter::once(&world.player)
            .chain(world.registry.iter())
            .filter(|entity| entity.active)
            .map(|entity| Drawable {
                entity: entity.id,
                kind: entity.kind,
                position: entity.position,
                scale: entity.scale,
                yaw: entity.yaw,
            })
            .collect();

        Frame {
            tick: world.tick_index,
            level: world.level,
            outcome: world.outcome,
            player_health: world.player.health,
            player_max_health: world.player.max_health,
            drawables,
        }
    }
}
