//! Turns world events into the textual progress log.

use log::Level;
use maw_core::{EntityId, Event};

pub(crate) fn report(events: &[Event]) {
    for event in events {
        if let Some((level, text)) = line(event) {
            log::log!(level, "{text}");
        }
    }
}

fn line(event: &Event) -> Option<(Level, String)> {
    let line = match event {
        Event::LevelAdvanced { to, .. } if !to.is_terminal() => (Level::Info, to.banner()),
        Event::GameEnded { outcome } => (Level::Info, outcome.message().to_owned()),
        Event::EntityDefeated { entity, kind } if *entity == EntityId::PLAYER => {
            (Level::Debug, format!("{} has fallen", kind.label()))
        }
        Event::EntityDefeated { entity, kind } => (
            Level::Info,
            format!("HIT: {} #{} is down", kind.label(), entity.get()),
        ),
        // Contact damage lands every frame, so player damage stays at debug.
        Event::EntityDamaged {
            entity, remaining, ..
        } if *entity == EntityId::PLAYER => (Level::Debug, format!("Maw health: {remaining:.1}")),
        Event::EntityDamaged {
            entity,
            kind,
            amount,
            remaining,
        } => (
            Level::Info,
            format!(
                "HIT: {} #{} takes {amount} damage, {remaining:.1} left",
                kind.label(),
                entity.get()
            ),
        ),
        Event::PlayerHealed { health } => (
            Level::Info,
            format!("Maw eats the lasagna and is back to {health:.0} health"),
        ),
        Event::CategoryCleared { category, removed } => (
            Level::Debug,
            format!("cleared {removed} entities from {category:?}"),
        ),
        _ => return None,
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maw_core::{EntityKind, GameOutcome};

    #[test]
    fn every_enemy_hit_gets_an_info_line() {
        let (level, text) = line(&Event::EntityDamaged {
            entity: EntityId::new(7),
            kind: EntityKind::Rat,
            amount: 40.0,
            remaining: 0.0,
        })
        .expect("hits are logged");

        assert_eq!(level, Level::Info);
        assert!(text.starts_with("HIT: "));
        assert!(text.contains("#7 takes 40 damage"));
    }

    #[test]
    fn player_damage_and_bookkeeping_stay_at_debug() {
        let (level, _) = line(&Event::EntityDamaged {
            entity: EntityId::PLAYER,
            kind: EntityKind::Player,
            amount: 0.2,
            remaining: 99.8,
        })
        .expect("player damage is logged");
        assert_eq!(level, Level::Debug);

        let (level, text) = line(&Event::GameEnded {
            outcome: GameOutcome::Victory,
        })
        .expect("the ending is logged");
        assert_eq!(level, Level::Info);
        assert_eq!(text, GameOutcome::Victory.message());
    }
}
