#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for the sewer rat waves.
//!
//! The schedule stays dormant until the player first moves. A start delay
//! then elapses, the level banner is announced, and one wave is released per
//! interval until every configured wave has spawned or the total cap is
//! reached. Each rat is requested around an anchor offset from the player by
//! whole units, and the world scatters it from there.

use glam::Vec3;
use maw_core::{
    advanced_seconds, Command, ControlState, EntityKind, EntitySnapshot, Event, LevelState,
    Placement, WaveTuning,
};

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
enum WavePhase {
    AwaitingMovement,
    Countdown { elapsed: f32 },
    Running { next_wave: usize, timer: f32 },
}

/// Pure system that emits rat spawn requests while the sewer level is active.
#[derive(Debug)]
pub struct Spawning {
    waves: WaveTuning,
    phase: WavePhase,
    spawned: u32,
    rng_state: u64,
}

impl Spawning {
    /// Creates a new spawning system using the supplied schedule and seed.
    #[must_use]
    pub fn new(waves: WaveTuning, rng_seed: u64) -> Self {
        Self {
            waves,
            phase: WavePhase::AwaitingMovement,
            spawned: 0,
            rng_state: rng_seed,
        }
    }

    /// Number of rats requested so far.
    #[must_use]
    pub const fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Reports whether the start delay has elapsed and waves are being released.
    #[must_use]
    pub const fn waves_started(&self) -> bool {
        matches!(self.phase, WavePhase::Running { .. })
    }

    /// Consumes events and the sampled controls to emit spawn commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        level: LevelState,
        controls: &ControlState,
        player: &EntitySnapshot,
        out: &mut Vec<Command>,
    ) {
        if level != LevelState::Sewers {
            return;
        }

        let dt = advanced_seconds(events);

        if self.phase == WavePhase::AwaitingMovement && controls.any_movement() {
            self.phase = WavePhase::Countdown { elapsed: 0.0 };
        }

        if let WavePhase::Countdown { elapsed } = self.phase {
            let elapsed = elapsed + dt;
            if elapsed >= self.waves.start_delay {
                log::info!("{}", LevelState::Sewers.banner());
                self.phase = WavePhase::Running {
                    next_wave: 0,
                    timer: 0.0,
                };
            } else {
                self.phase = WavePhase::Countdown { elapsed };
            }
        }

        if let WavePhase::Running { next_wave, timer } = self.phase {
            if self.spawned >= self.waves.total {
                return;
            }

            let timer = timer + dt;
            let Some(&size) = self.waves.sizes.get(next_wave) else {
                return;
            };
            if timer < self.waves.interval {
                self.phase = WavePhase::Running { next_wave, timer };
                return;
            }

            let count = size.min(self.waves.total - self.spawned);
            for _ in 0..count {
                let anchor = player.position()
                    + Vec3::new(self.anchor_offset(), 0.0, self.anchor_offset());
                out.push(Command::SpawnEnemy {
                    kind: EntityKind::Rat,
                    at: anchor,
                    placement: Placement::Scatter,
                });
                self.spawned += 1;
            }
            self.phase = WavePhase::Running {
                next_wave: next_wave + 1,
                timer: 0.0,
            };
        }
    }

    fn anchor_offset(&mut self) -> f32 {
        let spread = self.waves.anchor_spread;
        if spread <= 0 {
            return 0.0;
        }
        let span = u64::from(spread.unsigned_abs()) * 2;
        let value = (self.advance_rng() >> 33) % span;
        (value as i64 - i64::from(spread)) as f32
    }

    fn advance_rng(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        self.rng_state
    }
}
