//! Car patrol with wrap-around at the street bounds.

use maw_core::{overlaps, Body, Command, EntityId, EntitySnapshot, EntityState, HazardTuning};

pub(crate) fn patrol(
    tuning: &HazardTuning,
    dt: f32,
    player: &EntitySnapshot,
    car: &EntitySnapshot,
    out: &mut Vec<Command>,
) {
    let EntityState::Patrol { velocity } = car.state else {
        return;
    };

    let mut position = car.position() + velocity * dt;
    if velocity.x >= 0.0 && position.x > tuning.car_bound {
        position.x = -tuning.car_bound;
    } else if velocity.x < 0.0 && position.x < -tuning.car_bound {
        position.x = tuning.car_bound;
    }
    out.push(Command::PlaceEntity {
        entity: car.id,
        position,
    });

    let moved = Body {
        position,
        ..car.body
    };
    if overlaps(&player.body, &moved) {
        out.push(Command::Damage {
            entity: EntityId::PLAYER,
            amount: tuning.car_contact_dps * dt,
        });
    }
}
