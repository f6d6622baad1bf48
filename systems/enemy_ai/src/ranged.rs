//! Distance-band behaviour of ranged rats.

use glam::Vec3;
use maw_core::{planar_distance, Command, EntitySnapshot, EntityState, RatTuning};

use crate::DIRECTION_GUARD;

pub(crate) fn steer(
    tuning: &RatTuning,
    dt: f32,
    player: &EntitySnapshot,
    rat: &EntitySnapshot,
    out: &mut Vec<Command>,
) {
    let EntityState::Combatant {
        attacking,
        cooldown_remaining,
        cooldown,
    } = rat.state
    else {
        return;
    };

    let distance = planar_distance(player.position(), rat.position());
    let toward = Vec3::new(
        player.position().x - rat.position().x,
        0.0,
        player.position().z - rat.position().z,
    );

    if distance < tuning.min_distance || distance > tuning.max_distance {
        let heading = if distance < tuning.min_distance {
            -toward
        } else {
            toward
        };
        if heading.length() > DIRECTION_GUARD {
            out.push(Command::MoveEntity {
                entity: rat.id,
                translation: heading.normalize() * tuning.speed * dt,
            });
        }
        if attacking {
            out.push(Command::SetAttacking {
                entity: rat.id,
                attacking: false,
            });
        }
        return;
    }

    if !attacking {
        out.push(Command::SetAttacking {
            entity: rat.id,
            attacking: true,
        });
    }

    let remaining = cooldown_remaining - dt;
    if remaining > 0.0 {
        out.push(Command::SetCooldown {
            entity: rat.id,
            remaining,
        });
        return;
    }

    let target = player.position() - Vec3::Y * tuning.aim_drop;
    let aim = target - rat.position();
    if aim.length() > DIRECTION_GUARD {
        out.push(Command::SpawnProjectile {
            origin: rat.position() + Vec3::Y * tuning.muzzle_height,
            velocity: aim.normalize() * tuning.spit_speed,
        });
    }
    out.push(Command::SetCooldown {
        entity: rat.id,
        remaining: cooldown,
    });
}
