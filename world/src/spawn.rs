//! Spawner factories and scattered placement.

use glam::Vec3;
use maw_core::{
    overlaps, Body, Category, EntityId, EntityKind, EntityState, LayoutTuning, MeleeTuning,
    PlayerTuning, RatTuning, Tuning, MAX_EXTENT,
};
use rand::Rng;

use crate::registry::{Entity, EntityRegistry};

/// Categories a scattered spawn must not overlap.
const PLACEMENT_BLOCKERS: [Category; 3] = [Category::Enemies, Category::Obstacles, Category::Items];

pub(crate) fn player(id: EntityId, tuning: &PlayerTuning) -> Entity {
    Entity::new(
        id,
        EntityKind::Player,
        tuning.spawn_position,
        tuning.scale,
        tuning.max_health,
        EntityState::Inert,
    )
    .with_yaw(tuning.initial_yaw)
}

/// Builds an enemy record, or `None` when `kind` is not an enemy.
pub(crate) fn enemy(id: EntityId, kind: EntityKind, at: Vec3, tuning: &Tuning) -> Option<Entity> {
    let (scale, health, cooldown) = match kind {
        EntityKind::Rat => (tuning.rat.scale, tuning.rat.health, tuning.rat.cooldown),
        EntityKind::Man => (tuning.hazards.man_scale, tuning.hazards.man_health, 0.0),
        EntityKind::Boss => (tuning.hazards.boss_scale, tuning.hazards.boss_health, 0.0),
        _ => return None,
    };
    let state = EntityState::Combatant {
        attacking: false,
        cooldown_remaining: cooldown,
        cooldown,
    };
    Some(Entity::new(id, kind, at, scale, health, state))
}

pub(crate) fn obstacle(id: EntityId, at: Vec3, tuning: &Tuning) -> Entity {
    Entity::new(
        id,
        EntityKind::Car,
        at,
        tuning.hazards.car_scale,
        0.0,
        EntityState::Patrol {
            velocity: tuning.hazards.car_velocity,
        },
    )
}

/// Builds a pickup record, or `None` when `kind` is not a pickup.
pub(crate) fn pickup(id: EntityId, kind: EntityKind, at: Vec3, layout: &LayoutTuning) -> Option<Entity> {
    let scale = match kind {
        EntityKind::Lasagna => layout.lasagna_scale,
        EntityKind::Key => layout.key_scale,
        EntityKind::Kitten => layout.kitten_scale,
        _ => return None,
    };
    Some(Entity::new(id, kind, at, scale, 0.0, EntityState::Inert))
}

pub(crate) fn projectile(id: EntityId, origin: Vec3, velocity: Vec3, rat: &RatTuning) -> Entity {
    Entity::new(
        id,
        EntityKind::Spit,
        origin,
        rat.spit_scale,
        0.0,
        EntityState::Missile {
            velocity,
            lifetime_remaining: rat.spit_lifetime,
        },
    )
}

pub(crate) fn attack_volume(id: EntityId, origin: Vec3, velocity: Vec3, melee: &MeleeTuning) -> Entity {
    Entity::new(
        id,
        EntityKind::FurBall,
        origin,
        melee.volume_scale,
        0.0,
        EntityState::Missile {
            velocity,
            lifetime_remaining: melee.volume_lifetime,
        },
    )
}

/// Inserts both rows of sewer walls, starting level with `origin` and running towards −Z.
pub(crate) fn sewer_walls(registry: &mut EntityRegistry, layout: &LayoutTuning, origin: Vec3) {
    for segment in 0..layout.wall_segments {
        let z = origin.z - segment as f32 * layout.wall_spacing;
        for side in [-1.0_f32, 1.0] {
            let id = registry.allocate_id();
            let position = Vec3::new(origin.x + side * layout.wall_side_offset, 0.0, z);
            let wall = Entity::new(
                id,
                EntityKind::SewerWall,
                position,
                layout.wall_scale,
                0.0,
                EntityState::Inert,
            )
            .with_yaw(layout.wall_yaw);
            let _ = registry.insert(wall);
        }
    }
}

/// Band the scattered X coordinate is clamped into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Corridor {
    pub(crate) center: f32,
    pub(crate) half_width: f32,
}

impl Corridor {
    fn clamp(self, x: f32) -> f32 {
        x.max(self.center - self.half_width)
            .min(self.center + self.half_width)
    }
}

/// Parameters of a scattered placement search.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScatterSearch {
    pub(crate) radius: f32,
    pub(crate) attempts: u32,
    pub(crate) corridor: Option<Corridor>,
}

/// Result of a scattered placement search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Placed {
    pub(crate) position: Vec3,
    pub(crate) fell_back: bool,
}

/// Searches random offsets around `requested` for a spot where `body` overlaps
/// no enemy, obstacle or pickup, falling back to `requested` on exhaustion.
pub(crate) fn scatter<R: Rng>(
    body: Body,
    requested: Vec3,
    search: ScatterSearch,
    registry: &EntityRegistry,
    rng: &mut R,
) -> Placed {
    for _ in 0..search.attempts {
        let mut candidate = Vec3::new(
            requested.x + sample_offset(rng, search.radius),
            requested.y,
            requested.z + sample_offset(rng, search.radius),
        );
        if let Some(corridor) = search.corridor {
            candidate.x = corridor.clamp(candidate.x);
        }

        let probe = Body {
            position: candidate,
            ..body
        };
        let blocked = PLACEMENT_BLOCKERS.iter().any(|category| {
            registry
                .collection(*category)
                .iter()
                .any(|entity| overlaps(&probe, &entity.body()))
        });
        if !blocked {
            return Placed {
                position: candidate,
                fell_back: false,
            };
        }
    }

    Placed {
        position: requested,
        fell_back: true,
    }
}

fn sample_offset<R: Rng>(rng: &mut R, radius: f32) -> f32 {
    let radius = radius.min(MAX_EXTENT);
    if radius > 0.0 {
        rng.gen_range(-radius..radius)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn sewer_walls_line_both_sides_of_the_corridor() {
        let mut registry = EntityRegistry::new();
        let layout = LayoutTuning::default();
        sewer_walls(&mut registry, &layout, Vec3::new(0.0, 0.5, 0.0));

        let walls = registry.collection(Category::Walls);
        assert_eq!(walls.len(), 32);
        assert!(walls
            .iter()
            .all(|wall| (wall.position.x.abs() - 8.0).abs() < 1e-6));
        let deepest = walls
            .iter()
            .map(|wall| wall.position.z)
            .fold(f32::INFINITY, f32::min);
        assert!((deepest + 105.0).abs() < 1e-4);
    }

    #[test]
    fn rats_spawn_with_a_full_cooldown() {
        let tuning = Tuning::default();
        let rat = enemy(EntityId::new(3), EntityKind::Rat, Vec3::ZERO, &tuning)
            .expect("rats are enemies");
        assert_eq!(
            rat.state,
            EntityState::Combatant {
                attacking: false,
                cooldown_remaining: 2.0,
                cooldown: 2.0,
            }
        );
        assert!(enemy(EntityId::new(4), EntityKind::Key, Vec3::ZERO, &tuning).is_none());
    }

    #[test]
    fn scatter_stays_inside_radius_and_corridor() {
        let registry = EntityRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let body = Body::new(EntityKind::Rat, Vec3::ZERO, Vec3::splat(1.2), true);
        let requested = Vec3::new(6.0, 1.0, -4.0);
        let search = ScatterSearch {
            radius: 3.0,
            attempts: 30,
            corridor: Some(Corridor {
                center: 0.0,
                half_width: 7.2,
            }),
        };

        for _ in 0..50 {
            let placed = scatter(body, requested, search, &registry, &mut rng);
            assert!(!placed.fell_back);
            assert!(placed.position.x <= 7.2 + f32::EPSILON);
            assert!((placed.position.x - requested.x).abs() <= 3.0);
            assert!((placed.position.z - requested.z).abs() <= 3.0);
            assert!((placed.position.y - requested.y).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn oversized_scatter_radius_is_capped() {
        let registry = EntityRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let body = Body::new(EntityKind::Rat, Vec3::ZERO, Vec3::splat(1.2), true);
        let search = ScatterSearch {
            radius: 3.0e38,
            attempts: 30,
            corridor: None,
        };

        let placed = scatter(body, Vec3::ZERO, search, &registry, &mut rng);
        assert!(!placed.fell_back);
        assert!(placed.position.is_finite());
        assert!(placed.position.x.abs() <= MAX_EXTENT);
        assert!(placed.position.z.abs() <= MAX_EXTENT);
    }

    #[test]
    fn exhausted_scatter_falls_back_to_requested_point() {
        let mut registry = EntityRegistry::new();
        let id = registry.allocate_id();
        let mut tuning = Tuning::default();
        tuning.hazards.car_scale = Vec3::splat(100.0);
        assert!(registry.insert(obstacle(id, Vec3::ZERO, &tuning)));

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let body = Body::new(EntityKind::Rat, Vec3::ZERO, Vec3::splat(1.2), true);
        let requested = Vec3::new(1.0, 1.0, -2.0);
        let search = ScatterSearch {
            radius: 3.0,
            attempts: 30,
            corridor: None,
        };
        let placed = scatter(body, requested, search, &registry, &mut rng);

        assert!(placed.fell_back);
        assert_eq!(placed.position, requested);
    }
}
