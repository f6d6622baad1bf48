#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that separates overlapping bodies once per tick.
//!
//! Enemies are first pushed apart pairwise in storage order. Each active wall
//! then pushes the player and every enemy out of it. Resolution is sequential,
//! so later pairs see the positions produced by earlier ones. Bodies that
//! moved are written back through `PlaceEntity` commands.

use maw_core::{resolve_overlap, Body, Command, EntityId, EntitySnapshot, EntityView};

#[derive(Clone, Copy, Debug)]
struct Tracked {
    id: EntityId,
    body: Body,
    start: Body,
}

impl Tracked {
    fn new(snapshot: &EntitySnapshot) -> Self {
        Self {
            id: snapshot.id,
            body: snapshot.body,
            start: snapshot.body,
        }
    }
}

/// Collision resolution system with a reusable body buffer.
#[derive(Debug, Default)]
pub struct Collision {
    enemies: Vec<Tracked>,
}

impl Collision {
    /// Creates a collision system with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves enemy-enemy and dynamic-wall overlaps and emits the corrected positions.
    pub fn handle(
        &mut self,
        player: &EntitySnapshot,
        enemies: &EntityView,
        walls: &EntityView,
        out: &mut Vec<Command>,
    ) {
        self.enemies.clear();
        self.enemies
            .extend(enemies.active().map(Tracked::new));
        let mut player = Tracked::new(player);

        for index in 0..self.enemies.len() {
            let (head, tail) = self.enemies.split_at_mut(index + 1);
            let current = &mut head[index];
            for other in tail.iter_mut() {
                resolve_overlap(&mut current.body, &mut other.body);
            }
        }

        for wall in walls.active() {
            let mut wall_body = wall.body;
            resolve_overlap(&mut player.body, &mut wall_body);
            for enemy in &mut self.enemies {
                resolve_overlap(&mut enemy.body, &mut wall_body);
            }
        }

        for tracked in std::iter::once(&player).chain(self.enemies.iter()) {
            if tracked.body.position != tracked.start.position {
                out.push(Command::PlaceEntity {
                    entity: tracked.id,
                    position: tracked.body.position,
                });
            }
        }
    }
}
