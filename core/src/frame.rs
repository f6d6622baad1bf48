//! Drawable state handed to rendering collaborators after every tick.

use glam::Vec3;

use crate::{EntityId, EntityKind, GameOutcome, LevelState};

/// Transform of a single active entity. The mesh is implied by `kind`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drawable {
    /// Entity being drawn.
    pub entity: EntityId,
    /// Kind of the entity, used by renderers to select a mesh.
    pub kind: EntityKind,
    /// World-space position.
    pub position: Vec3,
    /// Non-uniform scale.
    pub scale: Vec3,
    /// Yaw in degrees.
    pub yaw: f32,
}

/// Everything a renderer needs to present one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Number of ticks simulated so far.
    pub tick: u64,
    /// Active level.
    pub level: LevelState,
    /// Outcome once the game is over.
    pub outcome: Option<GameOutcome>,
    /// Player health used for the health bar.
    pub player_health: f32,
    /// Player maximum health.
    pub player_max_health: f32,
    /// Active entities in deterministic order, player first.
    pub drawables: Vec<Drawable>,
}

impl Frame {
    /// Player health as a fraction of the maximum, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        if self.player_max_health <= f32::EPSILON {
            return 0.0;
        }
        (self.player_health / self.player_max_health).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_ratio_is_clamped() {
        let mut frame = Frame {
            tick: 0,
            level: LevelState::Sewers,
            outcome: None,
            player_health: -20.0,
            player_max_health: 100.0,
            drawables: Vec::new(),
        };
        assert_eq!(frame.health_ratio(), 0.0);

        frame.player_health = 75.0;
        assert!((frame.health_ratio() - 0.75).abs() < f32::EPSILON);
    }
}
