//! Axis-aligned overlap tests and minimum-translation resolution on the XZ plane.

use glam::{Vec2, Vec3};

use crate::EntityKind;

/// Extra half-extent added to both participants whenever a sewer wall takes part in a test.
pub const WALL_PADDING: f32 = 0.5;

/// Distance added on top of the penetration depth so resolved bodies stop touching.
pub const SEPARATION_EPSILON: f32 = 0.001;

/// Collision-relevant subset of an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Kind of the entity owning the body.
    pub kind: EntityKind,
    /// World-space centre.
    pub position: Vec3,
    /// Non-uniform scale. Half of the X and Z components form the box half-extents.
    pub scale: Vec3,
    /// Inactive bodies never collide.
    pub active: bool,
}

impl Body {
    /// Creates a new body.
    #[must_use]
    pub const fn new(kind: EntityKind, position: Vec3, scale: Vec3, active: bool) -> Self {
        Self {
            kind,
            position,
            scale,
            active,
        }
    }

    /// Half-extents on the X (`x`) and Z (`y`) axes.
    #[must_use]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.scale.x * 0.5, self.scale.z * 0.5)
    }

    /// Reports whether the body belongs to a static wall.
    #[must_use]
    pub const fn is_wall(&self) -> bool {
        matches!(self.kind, EntityKind::SewerWall)
    }

    /// Reports whether the body belongs to the player.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player)
    }
}

/// Distance between two points ignoring the vertical axis.
#[must_use]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

/// Reports whether two active bodies overlap on the XZ plane.
///
/// The comparison is strict, so boxes that merely touch do not overlap.
#[must_use]
pub fn overlaps(a: &Body, b: &Body) -> bool {
    if !a.active || !b.active {
        return false;
    }

    let reach = combined_half_extents(a, b);
    (a.position.x - b.position.x).abs() < reach.x && (a.position.z - b.position.z).abs() < reach.y
}

/// Pushes two overlapping bodies apart along the axis of smaller penetration.
///
/// Walls never move, the player is never pushed by a non-wall, and two
/// ordinary bodies share the correction equally. `a` moves in the direction
/// of `a - b` (zero counts as positive) and `b` in the opposite direction.
pub fn resolve_overlap(a: &mut Body, b: &mut Body) {
    if !overlaps(a, b) {
        return;
    }

    let reach = combined_half_extents(a, b);
    let dx = a.position.x - b.position.x;
    let dz = a.position.z - b.position.z;
    let overlap_x = reach.x - dx.abs();
    let overlap_z = reach.y - dz.abs();

    let (axis, delta, depth) = if overlap_x < overlap_z {
        (Vec3::X, dx, overlap_x)
    } else {
        (Vec3::Z, dz, overlap_z)
    };
    let sign = if delta >= 0.0 { 1.0 } else { -1.0 };
    let push = axis * sign * (depth + SEPARATION_EPSILON);

    match Mover::select(a, b) {
        Mover::First => a.position += push,
        Mover::Second => b.position -= push,
        Mover::Both => {
            a.position += push * 0.5;
            b.position -= push * 0.5;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mover {
    First,
    Second,
    Both,
}

impl Mover {
    fn select(a: &Body, b: &Body) -> Self {
        match (a.is_wall(), b.is_wall()) {
            (true, false) => Self::Second,
            (false, true) => Self::First,
            _ => match (a.is_player(), b.is_player()) {
                (true, false) => Self::Second,
                (false, true) => Self::First,
                _ => Self::Both,
            },
        }
    }
}

fn combined_half_extents(a: &Body, b: &Body) -> Vec2 {
    let mut reach = a.half_extents() + b.half_extents();
    if a.is_wall() || b.is_wall() {
        reach += Vec2::splat(2.0 * WALL_PADDING);
    }
    reach
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(kind: EntityKind, x: f32, z: f32, size: f32) -> Body {
        Body::new(kind, Vec3::new(x, 0.0, z), Vec3::splat(size), true)
    }

    #[test]
    fn close_bodies_overlap_and_distant_ones_do_not() {
        let enemy = body(EntityKind::Rat, 0.0, 0.0, 1.0);
        let mut player = body(EntityKind::Player, 0.4, 0.0, 1.0);
        assert!(overlaps(&enemy, &player));

        player.position = Vec3::new(2.0, 0.0, 0.0);
        assert!(!overlaps(&enemy, &player));
    }

    #[test]
    fn overlap_is_symmetric() {
        let samples = [
            body(EntityKind::Rat, 0.0, 0.0, 1.2),
            body(EntityKind::Player, 0.9, -0.3, 1.0),
            body(EntityKind::SewerWall, 1.4, 0.0, 0.12),
            body(EntityKind::Car, -1.5, 2.0, 2.0),
            Body::new(EntityKind::Man, Vec3::ZERO, Vec3::ONE, false),
        ];
        for a in &samples {
            for b in &samples {
                assert_eq!(overlaps(a, b), overlaps(b, a));
            }
        }
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = body(EntityKind::Rat, 0.0, 0.0, 1.0);
        let b = body(EntityKind::Rat, 1.0, 0.0, 1.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn inactive_bodies_never_overlap() {
        let a = body(EntityKind::Rat, 0.0, 0.0, 1.0);
        let mut b = body(EntityKind::Rat, 0.0, 0.0, 1.0);
        b.active = false;
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn wall_padding_inflates_reach() {
        let wall = body(EntityKind::SewerWall, 0.0, 0.0, 0.12);
        let player = body(EntityKind::Player, 1.5, 0.0, 1.0);
        let rat = body(EntityKind::Rat, 1.5, 0.0, 1.0);
        assert!(overlaps(&wall, &player));
        assert!(!overlaps(&rat, &player));
    }

    #[test]
    fn resolution_separates_equal_bodies_symmetrically() {
        let mut a = body(EntityKind::Rat, 0.2, 0.0, 1.0);
        let mut b = body(EntityKind::Rat, 0.0, 0.1, 1.0);
        resolve_overlap(&mut a, &mut b);

        assert!(!overlaps(&a, &b));
        assert!(a.position.x > 0.2);
        assert!(b.position.x < 0.0);
        assert!((a.position.z - 0.0).abs() < f32::EPSILON);
        assert!((b.position.z - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn walls_never_move() {
        let wall_start = Vec3::new(8.0, 0.0, -7.0);
        let mut wall = Body::new(EntityKind::SewerWall, wall_start, Vec3::splat(0.12), true);
        let mut rat = body(EntityKind::Rat, 7.5, -7.2, 1.2);
        resolve_overlap(&mut rat, &mut wall);
        assert_eq!(wall.position, wall_start);
        assert!(!overlaps(&rat, &wall));

        let mut player = body(EntityKind::Player, 8.3, -6.9, 1.0);
        resolve_overlap(&mut wall, &mut player);
        assert_eq!(wall.position, wall_start);
        assert!(!overlaps(&wall, &player));
    }

    #[test]
    fn player_is_never_pushed_by_non_walls() {
        let player_start = Vec3::new(0.0, 0.5, 0.0);
        let mut player = Body::new(EntityKind::Player, player_start, Vec3::ONE, true);
        let mut boss = body(EntityKind::Boss, 0.5, 1.0, 3.0);
        resolve_overlap(&mut player, &mut boss);

        assert_eq!(player.position, player_start);
        assert!(!overlaps(&player, &boss));
    }

    #[test]
    fn coincident_centres_push_toward_positive_axis() {
        let mut a = body(EntityKind::Rat, 0.0, 0.0, 1.0);
        let mut b = body(EntityKind::Rat, 0.0, 0.0, 1.0);
        resolve_overlap(&mut a, &mut b);

        assert!(a.position.z > 0.0);
        assert!(b.position.z < 0.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn planar_distance_ignores_height() {
        let distance = planar_distance(Vec3::new(3.0, 10.0, 0.0), Vec3::new(0.0, -4.0, 4.0));
        assert!((distance - 5.0).abs() < 1e-6);
    }
}
