use std::time::Duration;

use glam::Vec3;
use maw_core::{Category, Command, EntityId, EntityKind, Event, Placement};
use maw_system_enemy_ai::EnemyAi;
use maw_world::{apply, query, World};

fn tick(seconds: f32) -> Vec<Event> {
    vec![Event::TimeAdvanced {
        dt: Duration::from_secs_f32(seconds),
    }]
}

fn spawn(world: &mut World, command: Command) -> EntityId {
    let mut events = Vec::new();
    apply(world, command, &mut events);
    events
        .iter()
        .find_map(|event| match event {
            Event::EntitySpawned { entity, .. } => Some(*entity),
            _ => None,
        })
        .expect("spawn succeeded")
}

fn spawn_enemy(world: &mut World, kind: EntityKind, at: Vec3) -> EntityId {
    spawn(
        world,
        Command::SpawnEnemy {
            kind,
            at,
            placement: Placement::Exact,
        },
    )
}

fn run(world: &mut World, ai: &EnemyAi, seconds: f32) -> Vec<Command> {
    let mut commands = Vec::new();
    ai.handle(
        &tick(seconds),
        &query::player(world),
        &query::entities(world, Category::Enemies),
        &query::entities(world, Category::Obstacles),
        &mut commands,
    );
    let mut events = Vec::new();
    for command in commands.iter().cloned() {
        apply(world, command, &mut events);
    }
    commands
}

#[test]
fn distant_rats_close_in_and_near_rats_back_off() {
    let mut world = World::new();
    let far = spawn_enemy(&mut world, EntityKind::Rat, Vec3::new(0.0, 1.0, -10.0));
    let near = spawn_enemy(&mut world, EntityKind::Rat, Vec3::new(0.0, 1.0, -1.0));

    let commands = run(&mut world, &EnemyAi::default(), 0.5);

    assert!(commands.contains(&Command::MoveEntity {
        entity: far,
        translation: Vec3::new(0.0, 0.0, 1.0),
    }));
    assert!(commands.contains(&Command::MoveEntity {
        entity: near,
        translation: Vec3::new(0.0, 0.0, -1.0),
    }));
    assert!(!commands
        .iter()
        .any(|command| matches!(command, Command::SpawnProjectile { .. })));
}

#[test]
fn rats_in_band_spit_once_the_cooldown_elapses() {
    let mut world = World::new();
    let rat = spawn_enemy(&mut world, EntityKind::Rat, Vec3::new(0.0, 1.0, -3.5));
    let ai = EnemyAi::default();

    let first = run(&mut world, &ai, 1.0);
    assert_eq!(
        first,
        vec![
            Command::SetAttacking {
                entity: rat,
                attacking: true,
            },
            Command::SetCooldown {
                entity: rat,
                remaining: 1.0,
            },
        ]
    );

    let second = run(&mut world, &ai, 1.0);
    let spit = second
        .iter()
        .find_map(|command| match command {
            Command::SpawnProjectile { origin, velocity } => Some((*origin, *velocity)),
            _ => None,
        })
        .expect("rat spits");
    assert!((spit.0 - Vec3::new(0.0, 1.7, -3.5)).length() < 1e-5);
    assert!((spit.1.length() - 6.5).abs() < 1e-4);
    assert!(spit.1.z > 0.0);
    assert!(spit.1.y < 0.0);
    assert!(second.contains(&Command::SetCooldown {
        entity: rat,
        remaining: 2.0,
    }));
    assert_eq!(query::entities(&world, Category::Projectiles).len(), 1);
}

#[test]
fn boss_walks_towards_the_player() {
    let mut world = World::new();
    let boss = spawn_enemy(&mut world, EntityKind::Boss, Vec3::new(0.0, 0.5, -20.0));

    let commands = run(&mut world, &EnemyAi::default(), 0.5);

    assert_eq!(
        commands,
        vec![Command::MoveEntity {
            entity: boss,
            translation: Vec3::new(0.0, 0.0, 1.0),
        }]
    );
}

#[test]
fn boss_contact_burns_player_health() {
    let mut world = World::new();
    let _ = spawn_enemy(&mut world, EntityKind::Boss, Vec3::new(0.0, 1.5, -1.0));

    let commands = run(&mut world, &EnemyAi::default(), 0.5);

    assert!(commands.contains(&Command::Damage {
        entity: EntityId::PLAYER,
        amount: 10.0,
    }));
    assert!((query::player(&world).health - 90.0).abs() < 1e-4);
}

#[test]
fn cars_wrap_around_and_hit_the_player() {
    let mut world = World::new();
    let wrapping = spawn(
        &mut world,
        Command::SpawnObstacle {
            at: Vec3::new(49.9, 0.5, -10.0),
        },
    );
    let _ = spawn(
        &mut world,
        Command::SpawnObstacle {
            at: Vec3::new(-0.5, 0.5, 0.0),
        },
    );

    let commands = run(&mut world, &EnemyAi::default(), 0.1);

    assert!(commands.contains(&Command::PlaceEntity {
        entity: wrapping,
        position: Vec3::new(-50.0, 0.5, -10.0),
    }));
    let damage: f32 = commands
        .iter()
        .filter_map(|command| match command {
            Command::Damage { amount, .. } => Some(*amount),
            _ => None,
        })
        .sum();
    assert!((damage - 1.0).abs() < 1e-5);
}

#[test]
fn inactive_player_freezes_every_enemy() {
    let mut world = World::new();
    let _ = spawn_enemy(&mut world, EntityKind::Rat, Vec3::new(0.0, 1.0, -10.0));
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::Damage {
            entity: EntityId::PLAYER,
            amount: 100.0,
        },
        &mut events,
    );

    assert!(run(&mut world, &EnemyAi::default(), 0.5).is_empty());
}
