use glam::Vec3;
use maw_core::{
    Category, Command, EntityId, EntityKind, GameOutcome, LevelState, Placement,
};
use maw_system_level::{LevelDirector, LevelInputs};
use maw_world::{apply, query, World};

fn evaluate(world: &mut World) -> Vec<Command> {
    let director = LevelDirector::default();
    let player = query::player(world);
    let enemies = query::entities(world, Category::Enemies);
    let items = query::entities(world, Category::Items);
    let mut commands = Vec::new();
    director.handle(
        LevelInputs {
            level: query::level(world),
            player: &player,
            enemies: &enemies,
            items: &items,
        },
        &mut commands,
    );
    execute(world, commands.clone());
    commands
}

fn execute(world: &mut World, commands: Vec<Command>) {
    let mut events = Vec::new();
    for command in commands {
        apply(world, command, &mut events);
    }
}

fn place_player(world: &mut World, position: Vec3) {
    execute(
        world,
        vec![Command::PlaceEntity {
            entity: EntityId::PLAYER,
            position,
        }],
    );
}

fn defeat_all(world: &mut World, kind: EntityKind, limit: usize) {
    let targets: Vec<EntityId> = query::entities(world, Category::Enemies)
        .active_of(kind)
        .take(limit)
        .map(|enemy| enemy.id)
        .collect();
    execute(
        world,
        targets
            .into_iter()
            .map(|entity| Command::Damage {
                entity,
                amount: 1_000.0,
            })
            .collect(),
    );
}

fn sewer_world_with_rats(count: usize) -> World {
    let mut world = World::new();
    execute(
        &mut world,
        (0..count)
            .map(|index| Command::SpawnEnemy {
                kind: EntityKind::Rat,
                at: Vec3::new(index as f32 * 2.0 - 9.0, 1.0, -10.0),
                placement: Placement::Exact,
            })
            .collect(),
    );
    world
}

fn street_world() -> World {
    let mut world = sewer_world_with_rats(10);
    defeat_all(&mut world, EntityKind::Rat, 5);
    let _ = evaluate(&mut world);
    world
}

fn guards_world() -> World {
    let mut world = street_world();
    place_player(&mut world, Vec3::new(0.0, 0.5, -31.0));
    let _ = evaluate(&mut world);
    world
}

#[test]
fn four_fallen_rats_keep_the_sewer_open() {
    let mut world = sewer_world_with_rats(10);
    defeat_all(&mut world, EntityKind::Rat, 4);

    assert!(evaluate(&mut world).is_empty());
    assert_eq!(query::level(&world), LevelState::Sewers);
}

#[test]
fn five_fallen_rats_open_the_street() {
    let world = street_world();

    assert_eq!(query::level(&world), LevelState::Street);
    assert!(query::entities(&world, Category::Enemies).is_empty());
    assert!(query::entities(&world, Category::Walls).is_empty());

    let cars: Vec<Vec3> = query::entities(&world, Category::Obstacles)
        .iter()
        .map(|car| car.position())
        .collect();
    let expected: Vec<Vec3> = (0..5)
        .map(|index| Vec3::new(-50.0, 0.5, -10.0 - 5.0 * index as f32))
        .collect();
    assert_eq!(cars, expected);
}

#[test]
fn crossing_the_street_posts_the_guards() {
    let mut world = street_world();
    place_player(&mut world, Vec3::new(0.0, 0.5, -29.0));
    assert!(evaluate(&mut world).is_empty());

    let world = guards_world();
    assert_eq!(query::level(&world), LevelState::MenLasagna);
    assert!(query::entities(&world, Category::Obstacles).is_empty());
    assert_eq!(
        query::entities(&world, Category::Enemies)
            .active_of(EntityKind::Man)
            .count(),
        2
    );
    assert_eq!(
        query::entities(&world, Category::Items)
            .active_of(EntityKind::Lasagna)
            .count(),
        1
    );
}

#[test]
fn lasagna_heals_but_waits_for_the_guards() {
    let mut world = guards_world();
    execute(
        &mut world,
        vec![Command::Damage {
            entity: EntityId::PLAYER,
            amount: 60.0,
        }],
    );
    place_player(&mut world, Vec3::new(0.0, 0.5, -45.0));

    let commands = evaluate(&mut world);

    assert_eq!(
        commands,
        vec![Command::RestoreHealth {
            entity: EntityId::PLAYER,
        }]
    );
    assert!((query::player(&world).health - 100.0).abs() < f32::EPSILON);
    assert_eq!(query::level(&world), LevelState::MenLasagna);
    assert_eq!(
        query::entities(&world, Category::Items)
            .active_of(EntityKind::Lasagna)
            .count(),
        1
    );
    assert!(evaluate(&mut world).is_empty());
}

#[test]
fn full_run_ends_in_victory() {
    let mut world = guards_world();
    defeat_all(&mut world, EntityKind::Man, 2);
    place_player(&mut world, Vec3::new(0.0, 0.5, -45.0));
    let _ = evaluate(&mut world);

    assert_eq!(query::level(&world), LevelState::KeyPuzzle);
    let items = query::entities(&world, Category::Items);
    assert_eq!(items.len(), 1);
    assert_eq!(items.active_of(EntityKind::Key).count(), 1);

    place_player(&mut world, Vec3::new(0.0, 0.5, -50.0));
    let _ = evaluate(&mut world);
    assert_eq!(query::level(&world), LevelState::BossRescue);
    assert_eq!(
        query::entities(&world, Category::Enemies)
            .active_of(EntityKind::Boss)
            .count(),
        1
    );

    place_player(&mut world, Vec3::new(0.0, 0.5, -70.0));
    assert!(evaluate(&mut world).is_empty());

    defeat_all(&mut world, EntityKind::Boss, 1);
    let _ = evaluate(&mut world);
    assert_eq!(query::level(&world), LevelState::GameOver);
    assert_eq!(query::outcome(&world), Some(GameOutcome::Victory));
    assert!(evaluate(&mut world).is_empty());
}

#[test]
fn fallen_player_loses_from_any_level() {
    let mut world = street_world();
    execute(
        &mut world,
        vec![Command::Damage {
            entity: EntityId::PLAYER,
            amount: 150.0,
        }],
    );

    assert_eq!(
        evaluate(&mut world),
        vec![Command::EndGame {
            outcome: GameOutcome::Defeat,
        }]
    );
    assert_eq!(query::level(&world), LevelState::GameOver);
    assert_eq!(query::outcome(&world), Some(GameOutcome::Defeat));
}
