//! Boss chase and contact damage.

use maw_core::{overlaps, Body, Command, EntityId, EntitySnapshot, HazardTuning};

pub(crate) fn chase(
    tuning: &HazardTuning,
    dt: f32,
    player: &EntitySnapshot,
    boss: &EntitySnapshot,
    out: &mut Vec<Command>,
) {
    let offset = player.position() - boss.position();
    let length = offset.length();
    let mut position = boss.position();
    if length > tuning.boss_min_step_distance {
        let step = offset / length * tuning.boss_speed * dt;
        position += step;
        out.push(Command::MoveEntity {
            entity: boss.id,
            translation: step,
        });
    }

    let moved = Body {
        position,
        ..boss.body
    };
    if overlaps(&player.body, &moved) {
        out.push(Command::Damage {
            entity: EntityId::PLAYER,
            amount: tuning.boss_contact_dps * dt,
        });
    }
}
