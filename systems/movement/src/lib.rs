#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system translating sampled controls into player movement commands.

use glam::Vec3;
use maw_core::{advanced_seconds, Command, ControlState, EntitySnapshot, Event, PlayerTuning};

/// Player movement system. Forward is −Z and rotating left increases yaw.
#[derive(Clone, Copy, Debug)]
pub struct Movement {
    move_speed: f32,
    rotation_speed: f32,
}

impl Movement {
    /// Creates a movement system using the player's speed and rotation rate.
    #[must_use]
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            move_speed: tuning.move_speed,
            rotation_speed: tuning.rotation_speed,
        }
    }

    /// Emits translation and rotation commands for the held keys.
    pub fn handle(
        &self,
        events: &[Event],
        controls: &ControlState,
        player: &EntitySnapshot,
        out: &mut Vec<Command>,
    ) {
        if !player.is_active() {
            return;
        }

        let dt = advanced_seconds(events);
        if dt <= 0.0 {
            return;
        }

        let mut direction = Vec3::ZERO;
        if controls.move_forward {
            direction.z -= 1.0;
        }
        if controls.move_back {
            direction.z += 1.0;
        }
        if controls.strafe_left {
            direction.x -= 1.0;
        }
        if controls.strafe_right {
            direction.x += 1.0;
        }
        if direction != Vec3::ZERO {
            out.push(Command::MovePlayer {
                translation: direction * self.move_speed * dt,
            });
        }

        let mut turn = 0.0;
        if controls.rotate_left {
            turn += 1.0;
        }
        if controls.rotate_right {
            turn -= 1.0;
        }
        if turn != 0.0 {
            out.push(Command::RotatePlayer {
                degrees: turn * self.rotation_speed * dt,
            });
        }
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self::new(&PlayerTuning::default())
    }
}
