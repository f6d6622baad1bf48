#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maw simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems read immutable
//! [`EntityView`] snapshots and respond with [`Command`] values describing
//! desired mutations, the world executes those commands via its `apply`
//! entry point, and then reports [`Event`] values that the frame driver turns
//! into progress messages.

mod collision;
mod frame;
mod input;
mod tuning;

use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use collision::{
    overlaps, planar_distance, resolve_overlap, Body, SEPARATION_EPSILON, WALL_PADDING,
};
pub use frame::{Drawable, Frame};
pub use input::{ControlState, InputSource, Key};
pub use tuning::{
    AttackStyle, HazardTuning, InvalidTuning, LayoutTuning, MeleeTuning, PlayerTuning, RatTuning,
    Tuning, TuningProblem, WaveTuning, MAX_EXTENT,
};

/// Title shown by adapters when the experience boots.
pub const GAME_TITLE: &str = "Maw: A Father's Quest";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Translates the player by the provided world-space offset.
    MovePlayer {
        /// Offset added to the player's position.
        translation: Vec3,
    },
    /// Rotates the player around the vertical axis.
    RotatePlayer {
        /// Signed yaw change measured in degrees.
        degrees: f32,
    },
    /// Translates a non-player entity by the provided offset.
    MoveEntity {
        /// Entity that should move.
        entity: EntityId,
        /// Offset added to the entity's position.
        translation: Vec3,
    },
    /// Places an entity (including the player) at an absolute position.
    PlaceEntity {
        /// Entity that should be relocated.
        entity: EntityId,
        /// New world-space position.
        position: Vec3,
    },
    /// Updates whether an enemy is currently in its attack stance.
    SetAttacking {
        /// Enemy whose stance changes.
        entity: EntityId,
        /// Whether the enemy is attacking.
        attacking: bool,
    },
    /// Stores the remaining cooldown of an enemy's ranged attack.
    SetCooldown {
        /// Enemy whose cooldown is updated.
        entity: EntityId,
        /// Seconds left until the next attack.
        remaining: f32,
    },
    /// Stores the integrated position and lifetime of a projectile or attack volume.
    UpdateMissile {
        /// Projectile or attack volume being advanced.
        entity: EntityId,
        /// Position after integrating velocity.
        position: Vec3,
        /// Seconds the missile has left before expiring.
        lifetime_remaining: f32,
    },
    /// Subtracts health from an entity, deactivating it when health reaches zero.
    Damage {
        /// Entity receiving the damage.
        entity: EntityId,
        /// Amount of health removed.
        amount: f32,
    },
    /// Restores an entity to its maximum health.
    RestoreHealth {
        /// Entity being healed.
        entity: EntityId,
    },
    /// Marks an entity inactive without altering its health.
    Deactivate {
        /// Entity being deactivated.
        entity: EntityId,
    },
    /// Requests that an enemy be created near the provided point.
    SpawnEnemy {
        /// Enemy kind to spawn.
        kind: EntityKind,
        /// Requested spawn point.
        at: Vec3,
        /// Strategy used to choose the final position.
        placement: Placement,
    },
    /// Requests a patrolling car at the provided point.
    SpawnObstacle {
        /// Spawn point of the car.
        at: Vec3,
    },
    /// Requests a pickup or objective at the provided point.
    SpawnPickup {
        /// Pickup kind to spawn.
        kind: EntityKind,
        /// Spawn point of the pickup.
        at: Vec3,
    },
    /// Requests a ranged projectile.
    SpawnProjectile {
        /// Launch position.
        origin: Vec3,
        /// Launch velocity in world units per second.
        velocity: Vec3,
    },
    /// Requests a melee attack volume.
    SpawnAttackVolume {
        /// Launch position.
        origin: Vec3,
        /// Launch velocity in world units per second.
        velocity: Vec3,
    },
    /// Removes every entity stored in the provided category.
    ClearCategory {
        /// Collection that should be emptied.
        category: Category,
    },
    /// Moves the level state machine forward to the provided state.
    AdvanceLevel {
        /// Level that becomes active. Requests that would regress are ignored.
        to: LevelState,
    },
    /// Ends the game with the provided outcome.
    EndGame {
        /// Outcome recorded for the finished game.
        outcome: GameOutcome,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an entity was created by a spawner.
    EntitySpawned {
        /// Identifier allocated to the entity.
        entity: EntityId,
        /// Kind of the spawned entity.
        kind: EntityKind,
        /// Final position chosen by the spawner.
        position: Vec3,
    },
    /// Reports that scattered placement exhausted its attempts and used the requested point.
    PlacementFellBack {
        /// Identifier allocated to the entity.
        entity: EntityId,
        /// Kind of the spawned entity.
        kind: EntityKind,
        /// Requested point the entity was placed at.
        requested: Vec3,
    },
    /// Reports that an entity lost health.
    EntityDamaged {
        /// Entity that was damaged.
        entity: EntityId,
        /// Kind of the damaged entity.
        kind: EntityKind,
        /// Amount of health removed.
        amount: f32,
        /// Health left after the damage.
        remaining: f32,
    },
    /// Reports that damage drove an entity's health to zero.
    EntityDefeated {
        /// Entity that was defeated.
        entity: EntityId,
        /// Kind of the defeated entity.
        kind: EntityKind,
    },
    /// Reports that an entity was deactivated without being defeated.
    EntityDeactivated {
        /// Entity that became inactive.
        entity: EntityId,
        /// Kind of the deactivated entity.
        kind: EntityKind,
    },
    /// Reports that the player was restored to full health.
    PlayerHealed {
        /// Health after healing.
        health: f32,
    },
    /// Reports that a category collection was emptied.
    CategoryCleared {
        /// Category that was cleared.
        category: Category,
        /// Number of entities removed.
        removed: usize,
    },
    /// Announces that the level state machine advanced.
    LevelAdvanced {
        /// Level that was left.
        from: LevelState,
        /// Level that became active.
        to: LevelState,
    },
    /// Announces that the game reached its terminal state.
    GameEnded {
        /// Outcome of the finished game.
        outcome: GameOutcome,
    },
}

/// Sums the simulated time reported by `TimeAdvanced` events, in seconds.
#[must_use]
pub fn advanced_seconds(events: &[Event]) -> f32 {
    events
        .iter()
        .filter_map(|event| match event {
            Event::TimeAdvanced { dt } => Some(dt.as_secs_f32()),
            _ => None,
        })
        .sum()
}

/// Unique identifier assigned to an entity. Identifiers are never reused within a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Identifier permanently reserved for the player.
    pub const PLAYER: Self = Self(0);

    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Closed set of entity kinds known to the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    /// Maw, the player-controlled cat.
    Player,
    /// Ranged enemy that keeps its distance and spits projectiles.
    Rat,
    /// Melee guard standing between the player and the lasagna.
    Man,
    /// Final enemy that chases the player.
    Boss,
    /// Patrolling car obstacle on the street level.
    Car,
    /// Heal pickup.
    Lasagna,
    /// Key pickup unlocking the boss level.
    Key,
    /// Rescue objective.
    Kitten,
    /// Ranged projectile fired by rats.
    Spit,
    /// Short-lived melee attack volume thrown by the player.
    FurBall,
    /// Static sewer wall segment.
    SewerWall,
}

impl EntityKind {
    /// Numeric discriminator used by the level data model.
    #[must_use]
    pub const fn discriminant(self) -> u8 {
        match self {
            Self::Player => 0,
            Self::Rat => 1,
            Self::Man => 2,
            Self::Boss => 3,
            Self::Car => 4,
            Self::Lasagna => 5,
            Self::Key => 6,
            Self::Kitten => 7,
            Self::Spit => 8,
            Self::FurBall => 9,
            Self::SewerWall => 10,
        }
    }

    /// Collection that owns entities of this kind. The player lives outside every collection.
    #[must_use]
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::Player => None,
            Self::Rat | Self::Man | Self::Boss => Some(Category::Enemies),
            Self::Car => Some(Category::Obstacles),
            Self::Lasagna | Self::Key | Self::Kitten => Some(Category::Items),
            Self::Spit => Some(Category::Projectiles),
            Self::FurBall => Some(Category::AttackVolumes),
            Self::SewerWall => Some(Category::Walls),
        }
    }

    /// Reports whether the kind is an enemy.
    #[must_use]
    pub const fn is_enemy(self) -> bool {
        matches!(self, Self::Rat | Self::Man | Self::Boss)
    }

    /// Reports whether the kind is a pickup or objective.
    #[must_use]
    pub const fn is_pickup(self) -> bool {
        matches!(self, Self::Lasagna | Self::Key | Self::Kitten)
    }

    /// Human readable label used in progress messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Player => "Maw",
            Self::Rat => "rat",
            Self::Man => "man",
            Self::Boss => "boss",
            Self::Car => "car",
            Self::Lasagna => "lasagna",
            Self::Key => "key",
            Self::Kitten => "kitten",
            Self::Spit => "spit",
            Self::FurBall => "fur ball",
            Self::SewerWall => "sewer wall",
        }
    }
}

/// Per-category entity collections held by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Rats, men and the boss.
    Enemies,
    /// Rat spit.
    Projectiles,
    /// Player fur balls.
    AttackVolumes,
    /// Sewer walls.
    Walls,
    /// Cars.
    Obstacles,
    /// Pickups and the rescue objective.
    Items,
}

impl Category {
    /// Every category in storage order.
    pub const ALL: [Self; 6] = [
        Self::Enemies,
        Self::Projectiles,
        Self::AttackVolumes,
        Self::Walls,
        Self::Obstacles,
        Self::Items,
    ];

    /// Position of the category within [`Category::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Enemies => 0,
            Self::Projectiles => 1,
            Self::AttackVolumes => 2,
            Self::Walls => 3,
            Self::Obstacles => 4,
            Self::Items => 5,
        }
    }
}

/// Strategy an enemy spawner uses to choose the final position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Place exactly at the requested point.
    Exact,
    /// Search random offsets around the requested point for a free spot.
    Scatter,
}

/// Level state machine in its fixed forward order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LevelState {
    /// Defeat the rats crawling through the sewer.
    Sewers,
    /// Cross the street without being run over.
    Street,
    /// Defeat the guards and eat the lasagna.
    MenLasagna,
    /// Find the key.
    KeyPuzzle,
    /// Defeat the boss and rescue the kitten.
    BossRescue,
    /// Terminal state.
    GameOver,
}

impl LevelState {
    /// Every state in forward order.
    pub const ORDER: [Self; 6] = [
        Self::Sewers,
        Self::Street,
        Self::MenLasagna,
        Self::KeyPuzzle,
        Self::BossRescue,
        Self::GameOver,
    ];

    /// State that follows this one, or `None` for the terminal state.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Sewers => Some(Self::Street),
            Self::Street => Some(Self::MenLasagna),
            Self::MenLasagna => Some(Self::KeyPuzzle),
            Self::KeyPuzzle => Some(Self::BossRescue),
            Self::BossRescue => Some(Self::GameOver),
            Self::GameOver => None,
        }
    }

    /// One-based level number shown in progress messages.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Sewers => 1,
            Self::Street => 2,
            Self::MenLasagna => 3,
            Self::KeyPuzzle => 4,
            Self::BossRescue => 5,
            Self::GameOver => 6,
        }
    }

    /// Short upper-case level name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sewers => "SEWERS",
            Self::Street => "STREET",
            Self::MenLasagna => "GUARDS",
            Self::KeyPuzzle => "PUZZLE",
            Self::BossRescue => "BOSS",
            Self::GameOver => "GAME OVER",
        }
    }

    /// Objective shown to the player when the level starts.
    #[must_use]
    pub const fn objective(self) -> &'static str {
        match self {
            Self::Sewers => "Defeat 10 Rats!",
            Self::Street => "Avoid Cars!",
            Self::MenLasagna => "Defeat men and eat Lasagna!",
            Self::KeyPuzzle => "Find the Key!",
            Self::BossRescue => "Save the Kitten!",
            Self::GameOver => "Thanks for playing!",
        }
    }

    /// Progress line announcing the level, e.g. `LEVEL 2: STREET - Avoid Cars!`.
    #[must_use]
    pub fn banner(self) -> String {
        format!("LEVEL {}: {} - {}", self.number(), self.name(), self.objective())
    }

    /// Reports whether the state is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The boss fell and the kitten was rescued.
    Victory,
    /// Maw ran out of health.
    Defeat,
}

impl GameOutcome {
    /// Progress line announcing the outcome.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Victory => "YOU WIN! KITTEN SAVED!",
            Self::Defeat => "GAME OVER: Maw has fallen.",
        }
    }
}

/// Per-variant mutable state carried by an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityState {
    /// No timers or velocity: the player, pickups and walls.
    Inert,
    /// Enemy attack stance and ranged cooldown.
    Combatant {
        /// Whether the enemy is in its attack stance.
        attacking: bool,
        /// Seconds left until the next ranged attack.
        cooldown_remaining: f32,
        /// Cooldown restored after each attack.
        cooldown: f32,
    },
    /// Constant patrol velocity of a car.
    Patrol {
        /// Velocity in world units per second.
        velocity: Vec3,
    },
    /// Flight state of a projectile or attack volume.
    Missile {
        /// Velocity in world units per second.
        velocity: Vec3,
        /// Seconds left before the missile expires.
        lifetime_remaining: f32,
    },
}

/// Immutable representation of a single entity used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntitySnapshot {
    /// Identifier allocated to the entity.
    pub id: EntityId,
    /// Collision body: kind, position, scale and activity.
    pub body: Body,
    /// Orientation around the vertical axis in degrees.
    pub yaw: f32,
    /// Current health.
    pub health: f32,
    /// Health restored by healing.
    pub max_health: f32,
    /// Per-variant state.
    pub state: EntityState,
}

impl EntitySnapshot {
    /// Kind of the entity.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.body.kind
    }

    /// World-space position of the entity.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Reports whether the entity participates in the simulation.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.body.active
    }
}

/// Read-only snapshot describing a set of entities in deterministic order.
#[derive(Clone, Debug, Default)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Creates a new view from the provided snapshots, ordered by identifier.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EntitySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over every captured snapshot.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over the active snapshots only.
    pub fn active(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter().filter(|snapshot| snapshot.is_active())
    }

    /// Iterator over the active snapshots of a single kind.
    pub fn active_of(&self, kind: EntityKind) -> impl Iterator<Item = &EntitySnapshot> {
        self.active().filter(move |snapshot| snapshot.kind() == kind)
    }

    /// Finds the snapshot for the provided identifier.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&EntitySnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .and_then(|index| self.snapshots.get(index))
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EntitySnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_follow_data_model() {
        let kinds = [
            EntityKind::Player,
            EntityKind::Rat,
            EntityKind::Man,
            EntityKind::Boss,
            EntityKind::Car,
            EntityKind::Lasagna,
            EntityKind::Key,
            EntityKind::Kitten,
            EntityKind::Spit,
            EntityKind::FurBall,
            EntityKind::SewerWall,
        ];
        for (expected, kind) in kinds.iter().enumerate() {
            assert_eq!(usize::from(kind.discriminant()), expected);
        }
    }

    #[test]
    fn level_order_only_moves_forward() {
        for pair in LevelState::ORDER.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(LevelState::GameOver.next(), None);
    }

    #[test]
    fn banner_uses_fixed_prefix() {
        assert_eq!(LevelState::Street.banner(), "LEVEL 2: STREET - Avoid Cars!");
        assert_eq!(LevelState::Sewers.banner(), "LEVEL 1: SEWERS - Defeat 10 Rats!");
    }

    #[test]
    fn advanced_seconds_ignores_other_events() {
        let events = [
            Event::TimeAdvanced {
                dt: Duration::from_millis(250),
            },
            Event::PlayerHealed { health: 100.0 },
            Event::TimeAdvanced {
                dt: Duration::from_millis(500),
            },
        ];
        assert!((advanced_seconds(&events) - 0.75).abs() < 1e-6);
        assert_eq!(advanced_seconds(&[]), 0.0);
    }

    #[test]
    fn categories_index_matches_storage_order() {
        for (index, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), index);
        }
    }

    #[test]
    fn view_lookup_finds_snapshots_by_id() {
        let snapshot = |id: u32| EntitySnapshot {
            id: EntityId::new(id),
            body: Body::new(EntityKind::Rat, Vec3::ZERO, Vec3::ONE, id % 2 == 0),
            yaw: 0.0,
            health: 40.0,
            max_health: 40.0,
            state: EntityState::Inert,
        };
        let view = EntityView::from_snapshots(vec![snapshot(4), snapshot(1), snapshot(2)]);

        assert_eq!(view.len(), 3);
        assert_eq!(view.get(EntityId::new(2)).map(|found| found.id.get()), Some(2));
        assert!(view.get(EntityId::new(3)).is_none());
        assert_eq!(view.active().count(), 2);
    }
}
