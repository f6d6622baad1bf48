#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system evaluating level exit conditions once per tick.
//!
//! | Level        | Leaves when                                   |
//! |--------------|-----------------------------------------------|
//! | Sewers       | enough rats are down                          |
//! | Street       | the player crosses the exit line              |
//! | MenLasagna   | the player eats the lasagna with no enemy up  |
//! | KeyPuzzle    | the player picks up the key                   |
//! | BossRescue   | the boss is down and the player reaches the kitten |
//!
//! Each exit clears the collections the level no longer needs, spawns the
//! population of the next level and then requests the transition. A player
//! that has fallen ends the game from any level.

use glam::Vec3;
use maw_core::{
    overlaps, Category, Command, EntityId, EntityKind, EntitySnapshot, EntityView, GameOutcome,
    HazardTuning, LayoutTuning, LevelState, Placement, Tuning,
};

/// Read-only state the level system inspects.
#[derive(Clone, Copy, Debug)]
pub struct LevelInputs<'a> {
    /// Active level.
    pub level: LevelState,
    /// Player snapshot.
    pub player: &'a EntitySnapshot,
    /// Every stored enemy, active or not.
    pub enemies: &'a EntityView,
    /// Every stored pickup, active or not.
    pub items: &'a EntityView,
}

/// Level state machine system.
#[derive(Clone, Debug)]
pub struct LevelDirector {
    kills_to_advance: usize,
    hazards: HazardTuning,
    layout: LayoutTuning,
}

impl LevelDirector {
    /// Creates the system from the full tuning set.
    #[must_use]
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            kills_to_advance: tuning.waves.kills_to_advance,
            hazards: tuning.hazards.clone(),
            layout: tuning.layout.clone(),
        }
    }

    /// Emits the commands for at most one transition.
    pub fn handle(&self, inputs: LevelInputs<'_>, out: &mut Vec<Command>) {
        if inputs.level.is_terminal() {
            return;
        }

        if !inputs.player.is_active() {
            out.push(Command::EndGame {
                outcome: GameOutcome::Defeat,
            });
            return;
        }

        match inputs.level {
            LevelState::Sewers => self.leave_sewers(inputs, out),
            LevelState::Street => self.leave_street(inputs, out),
            LevelState::MenLasagna => self.leave_guards(inputs, out),
            LevelState::KeyPuzzle => self.leave_puzzle(inputs, out),
            LevelState::BossRescue => leave_boss(inputs, out),
            LevelState::GameOver => {}
        }
    }

    fn leave_sewers(&self, inputs: LevelInputs<'_>, out: &mut Vec<Command>) {
        let fallen = inputs
            .enemies
            .iter()
            .filter(|enemy| enemy.kind() == EntityKind::Rat && !enemy.is_active())
            .count();
        if fallen < self.kills_to_advance {
            return;
        }

        out.push(Command::ClearCategory {
            category: Category::Enemies,
        });
        out.push(Command::ClearCategory {
            category: Category::Walls,
        });
        for index in 0..self.hazards.car_count {
            out.push(Command::SpawnObstacle {
                at: self.hazards.car_origin - Vec3::Z * self.hazards.car_spacing * index as f32,
            });
        }
        out.push(Command::AdvanceLevel {
            to: LevelState::Street,
        });
    }

    fn leave_street(&self, inputs: LevelInputs<'_>, out: &mut Vec<Command>) {
        if inputs.player.position().z >= self.layout.street_exit_z {
            return;
        }

        out.push(Command::ClearCategory {
            category: Category::Obstacles,
        });
        for at in &self.layout.man_positions {
            out.push(Command::SpawnEnemy {
                kind: EntityKind::Man,
                at: *at,
                placement: Placement::Exact,
            });
        }
        out.push(Command::SpawnPickup {
            kind: EntityKind::Lasagna,
            at: self.layout.lasagna_position,
        });
        out.push(Command::AdvanceLevel {
            to: LevelState::MenLasagna,
        });
    }

    fn leave_guards(&self, inputs: LevelInputs<'_>, out: &mut Vec<Command>) {
        let Some(lasagna) = touched(inputs, EntityKind::Lasagna) else {
            return;
        };

        if inputs.enemies.active().next().is_some() {
            if inputs.player.health < inputs.player.max_health {
                log::debug!("lasagna heals Maw while the guards still stand");
                out.push(Command::RestoreHealth {
                    entity: EntityId::PLAYER,
                });
            }
            return;
        }

        out.push(Command::Deactivate { entity: lasagna });
        out.push(Command::RestoreHealth {
            entity: EntityId::PLAYER,
        });
        out.push(Command::ClearCategory {
            category: Category::Items,
        });
        out.push(Command::SpawnPickup {
            kind: EntityKind::Key,
            at: self.layout.key_position,
        });
        out.push(Command::AdvanceLevel {
            to: LevelState::KeyPuzzle,
        });
    }

    fn leave_puzzle(&self, inputs: LevelInputs<'_>, out: &mut Vec<Command>) {
        let Some(key) = touched(inputs, EntityKind::Key) else {
            return;
        };

        out.push(Command::Deactivate { entity: key });
        out.push(Command::SpawnEnemy {
            kind: EntityKind::Boss,
            at: self.layout.boss_position,
            placement: Placement::Exact,
        });
        out.push(Command::SpawnPickup {
            kind: EntityKind::Kitten,
            at: self.layout.kitten_position,
        });
        out.push(Command::AdvanceLevel {
            to: LevelState::BossRescue,
        });
    }
}

impl Default for LevelDirector {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

fn leave_boss(inputs: LevelInputs<'_>, out: &mut Vec<Command>) {
    if inputs.enemies.active_of(EntityKind::Boss).next().is_some() {
        return;
    }
    if touched(inputs, EntityKind::Kitten).is_some() {
        out.push(Command::EndGame {
            outcome: GameOutcome::Victory,
        });
    }
}

fn touched(inputs: LevelInputs<'_>, kind: EntityKind) -> Option<EntityId> {
    inputs
        .items
        .active_of(kind)
        .find(|item| overlaps(&inputs.player.body, &item.body))
        .map(|item| item.id)
}
