#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame driver wiring the Maw world to its systems.
//!
//! One call to [`Simulation::step`] is one tick. The tick runs every
//! [`Stage`] of [`PIPELINE`] in order. Each stage reads fresh views of the
//! world, lets its system emit commands and applies them before the next
//! stage runs, so later stages observe the effects of earlier ones. Events
//! produced along the way are collected for the tick and turned into
//! progress log lines when the tick finishes.

mod driver;
mod progress;

use std::time::Duration;

use maw_core::{Category, Command, ControlState, Event, Frame, LevelState, Tuning};
use maw_system_collision::Collision;
use maw_system_enemy_ai::EnemyAi;
use maw_system_level::{LevelDirector, LevelInputs};
use maw_system_movement::Movement;
use maw_system_player_combat::PlayerCombat;
use maw_system_projectiles::Projectiles;
use maw_system_spawning::Spawning;
use maw_world::{self as world, query, World};

pub use driver::{
    run, Clock, FixedClock, FrameSink, MonotonicClock, RunSummary, StopReason,
};

/// Named stages of a tick, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Advances the world clock.
    Tick,
    /// Releases sewer rat waves.
    Spawning,
    /// Moves and rotates the player.
    Movement,
    /// Steers rats, the boss and cars.
    EnemyAi,
    /// Runs the player's melee attack.
    Combat,
    /// Advances spit and fur balls.
    Projectiles,
    /// Separates overlapping bodies.
    Collision,
    /// Evaluates level exit conditions.
    Level,
}

/// Stages executed by [`Simulation::step`], in order.
pub const PIPELINE: [Stage; 8] = [
    Stage::Tick,
    Stage::Spawning,
    Stage::Movement,
    Stage::EnemyAi,
    Stage::Combat,
    Stage::Projectiles,
    Stage::Collision,
    Stage::Level,
];

/// Owns the world and every system, and runs the tick pipeline.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    spawning: Spawning,
    movement: Movement,
    enemy_ai: EnemyAi,
    combat: PlayerCombat,
    projectiles: Projectiles,
    collision: Collision,
    level: LevelDirector,
    controls: ControlState,
    dt: Duration,
    tick_events: Vec<Event>,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Simulation {
    /// Creates a simulation in the sewer level.
    #[must_use]
    pub fn new(tuning: Tuning) -> Self {
        Self {
            spawning: Spawning::new(tuning.waves.clone(), tuning.seed),
            movement: Movement::new(&tuning.player),
            enemy_ai: EnemyAi::new(tuning.rat.clone(), tuning.hazards.clone()),
            combat: PlayerCombat::new(tuning.melee.clone()),
            projectiles: Projectiles::new(tuning.rat.clone(), tuning.melee.clone()),
            collision: Collision::new(),
            level: LevelDirector::new(&tuning),
            world: World::with_tuning(tuning),
            controls: ControlState::default(),
            dt: Duration::ZERO,
            tick_events: Vec::new(),
            events: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Provides read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Active level.
    #[must_use]
    pub fn level(&self) -> LevelState {
        query::level(&self.world)
    }

    /// Reports whether the game has reached its terminal state.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.level().is_terminal()
    }

    /// Events produced since the current tick began.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drawable state of the world after the latest tick.
    #[must_use]
    pub fn frame(&self) -> Frame {
        query::frame(&self.world)
    }

    /// Runs one complete tick with the sampled controls and measured elapsed time.
    ///
    /// Once the game is over only the clock keeps advancing.
    pub fn step(&mut self, controls: ControlState, dt: Duration) {
        self.begin_tick(controls, dt);
        for stage in PIPELINE {
            if stage != Stage::Tick && self.is_finished() {
                break;
            }
            self.run_stage(stage);
        }
        self.finish_tick();
    }

    /// Starts a tick without running any stage.
    pub fn begin_tick(&mut self, controls: ControlState, dt: Duration) {
        self.controls = controls;
        self.dt = dt;
        self.tick_events.clear();
        self.events.clear();
    }

    /// Reports the progress of the tick started by [`Simulation::begin_tick`].
    pub fn finish_tick(&mut self) {
        progress::report(&self.events);
    }

    /// Applies a command outside the pipeline, recording its events for the current tick.
    pub fn submit(&mut self, command: Command) {
        self.commands.push(command);
        self.flush();
    }

    /// Runs a single stage of the current tick.
    pub fn run_stage(&mut self, stage: Stage) {
        let state = &self.world;
        let player = query::player(state);
        match stage {
            Stage::Tick => {
                let mut generated = Vec::new();
                world::apply(&mut self.world, Command::Tick { dt: self.dt }, &mut generated);
                self.tick_events.extend(generated.iter().cloned());
                self.events.extend(generated);
                return;
            }
            Stage::Spawning => self.spawning.handle(
                &self.tick_events,
                query::level(state),
                &self.controls,
                &player,
                &mut self.commands,
            ),
            Stage::Movement => self.movement.handle(
                &self.tick_events,
                &self.controls,
                &player,
                &mut self.commands,
            ),
            Stage::EnemyAi => self.enemy_ai.handle(
                &self.tick_events,
                &player,
                &query::entities(state, Category::Enemies),
                &query::entities(state, Category::Obstacles),
                &mut self.commands,
            ),
            Stage::Combat => self.combat.handle(
                &self.tick_events,
                &self.controls,
                &player,
                &query::entities(state, Category::Enemies),
                &query::entities(state, Category::AttackVolumes),
                &mut self.commands,
            ),
            Stage::Projectiles => self.projectiles.handle(
                &self.tick_events,
                &player,
                &query::entities(state, Category::Projectiles),
                &query::entities(state, Category::AttackVolumes),
                &query::entities(state, Category::Enemies),
                &mut self.commands,
            ),
            Stage::Collision => self.collision.handle(
                &player,
                &query::entities(state, Category::Enemies),
                &query::entities(state, Category::Walls),
                &mut self.commands,
            ),
            Stage::Level => self.level.handle(
                LevelInputs {
                    level: query::level(state),
                    player: &player,
                    enemies: &query::entities(state, Category::Enemies),
                    items: &query::entities(state, Category::Items),
                },
                &mut self.commands,
            ),
        }
        self.flush();
    }

    fn flush(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
