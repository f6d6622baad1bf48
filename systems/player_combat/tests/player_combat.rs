use std::time::Duration;

use glam::Vec3;
use maw_core::{
    AttackStyle, Category, Command, ControlState, EntityKind, Event, MeleeTuning, Placement,
};
use maw_system_player_combat::PlayerCombat;
use maw_world::{apply, query, World};

const PRESSED: ControlState = ControlState {
    move_forward: false,
    move_back: false,
    strafe_left: false,
    strafe_right: false,
    rotate_left: false,
    rotate_right: false,
    attack: true,
    exit: false,
};

fn claw() -> MeleeTuning {
    MeleeTuning {
        style: AttackStyle::Claw,
        ..MeleeTuning::default()
    }
}

fn facing_positive_z() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    let yaw = query::player(&world).yaw;
    apply(&mut world, Command::RotatePlayer { degrees: -yaw }, &mut events);
    world
}

fn step(world: &mut World, combat: &mut PlayerCombat, controls: ControlState) -> Vec<Command> {
    let mut commands = Vec::new();
    combat.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_millis(250),
        }],
        &controls,
        &query::player(world),
        &query::entities(world, Category::Enemies),
        &query::entities(world, Category::AttackVolumes),
        &mut commands,
    );
    let mut events = Vec::new();
    for command in commands.iter().cloned() {
        apply(world, command, &mut events);
    }
    commands
}

fn spawn(world: &mut World, command: Command) {
    let mut events = Vec::new();
    apply(world, command, &mut events);
}

fn damage_total(commands: &[Command]) -> usize {
    commands
        .iter()
        .filter(|command| matches!(command, Command::Damage { .. }))
        .count()
}

#[test]
fn rising_edge_throws_a_fan_of_three_fur_balls() {
    let mut world = facing_positive_z();
    let mut combat = PlayerCombat::default();

    let commands = step(&mut world, &mut combat, PRESSED);

    let volumes: Vec<(Vec3, Vec3)> = commands
        .iter()
        .filter_map(|command| match command {
            Command::SpawnAttackVolume { origin, velocity } => Some((*origin, *velocity)),
            _ => None,
        })
        .collect();
    assert_eq!(volumes.len(), 3);
    assert!((volumes[0].0 - Vec3::new(0.0, 1.0, 0.8)).length() < 1e-5);
    assert!((volumes[0].1 - Vec3::new(0.0, 0.0, 9.0)).length() < 1e-4);
    for (_, velocity) in &volumes {
        assert!((velocity.length() - 9.0).abs() < 1e-4);
        assert!(velocity.z > 0.0);
    }
    assert!((volumes[1].1.x + volumes[2].1.x).abs() < 1e-4);
    assert!(volumes[1].1.x.abs() > 1.0);
    assert!(combat.is_attacking());
    assert_eq!(query::entities(&world, Category::AttackVolumes).len(), 3);
}

#[test]
fn holding_the_trigger_does_not_restart_the_attack() {
    let mut world = facing_positive_z();
    let mut combat = PlayerCombat::default();

    let _ = step(&mut world, &mut combat, PRESSED);
    for _ in 0..8 {
        let commands = step(&mut world, &mut combat, PRESSED);
        assert!(!commands
            .iter()
            .any(|command| matches!(command, Command::SpawnAttackVolume { .. })));
    }
    assert!(!combat.is_attacking());

    let _ = step(&mut world, &mut combat, ControlState::default());
    let restarted = step(&mut world, &mut combat, PRESSED);
    assert_eq!(
        restarted
            .iter()
            .filter(|command| matches!(command, Command::SpawnAttackVolume { .. }))
            .count(),
        3
    );
}

#[test]
fn claw_lands_once_part_way_through_the_window() {
    let mut world = facing_positive_z();
    spawn(
        &mut world,
        Command::SpawnEnemy {
            kind: EntityKind::Rat,
            at: Vec3::new(0.0, 1.0, -1.5),
            placement: Placement::Exact,
        },
    );
    spawn(
        &mut world,
        Command::SpawnEnemy {
            kind: EntityKind::Rat,
            at: Vec3::new(0.0, 1.0, -6.0),
            placement: Placement::Exact,
        },
    );
    let mut combat = PlayerCombat::new(claw());

    let opening = step(&mut world, &mut combat, PRESSED);
    assert!(opening.is_empty());

    let per_tick: Vec<usize> = (0..8)
        .map(|_| damage_total(&step(&mut world, &mut combat, ControlState::default())))
        .collect();
    assert_eq!(per_tick, vec![0, 0, 1, 0, 0, 0, 0, 0]);

    let enemies = query::entities(&world, Category::Enemies);
    let health: Vec<f32> = enemies.iter().map(|rat| rat.health).collect();
    assert_eq!(health, vec![20.0, 40.0]);
}

#[test]
fn each_fur_ball_is_spent_on_a_living_enemy() {
    let mut world = facing_positive_z();
    let rat_at = Vec3::new(0.0, 1.0, -6.0);
    spawn(
        &mut world,
        Command::SpawnEnemy {
            kind: EntityKind::Rat,
            at: rat_at,
            placement: Placement::Exact,
        },
    );
    for _ in 0..2 {
        spawn(
            &mut world,
            Command::SpawnAttackVolume {
                origin: rat_at,
                velocity: Vec3::ZERO,
            },
        );
    }
    let mut combat = PlayerCombat::new(claw());

    let mut commands = step(&mut world, &mut combat, PRESSED);
    for _ in 0..3 {
        commands.extend(step(&mut world, &mut combat, ControlState::default()));
    }

    assert_eq!(damage_total(&commands), 1);
    let deactivated = commands
        .iter()
        .filter(|command| matches!(command, Command::Deactivate { .. }))
        .count();
    assert_eq!(deactivated, 1);

    let rat = query::entities(&world, Category::Enemies)
        .into_vec()
        .remove(0);
    assert!(!rat.is_active());
    assert_eq!(
        query::entities(&world, Category::AttackVolumes)
            .active()
            .count(),
        1
    );
}

#[test]
fn defeated_player_cannot_attack() {
    let mut world = facing_positive_z();
    spawn(
        &mut world,
        Command::Damage {
            entity: maw_core::EntityId::PLAYER,
            amount: 100.0,
        },
    );
    let mut combat = PlayerCombat::default();

    assert!(step(&mut world, &mut combat, PRESSED).is_empty());
    assert!(!combat.is_attacking());
}
