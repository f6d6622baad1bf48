use std::time::Duration;

use maw_core::{
    Command, ControlState, EntityKind, Event, LevelState, Placement, WaveTuning,
};
use maw_system_spawning::Spawning;
use maw_world::{query, World};

fn one_second() -> Vec<Event> {
    vec![Event::TimeAdvanced {
        dt: Duration::from_secs(1),
    }]
}

fn moving() -> ControlState {
    ControlState {
        move_forward: true,
        ..ControlState::default()
    }
}

fn run_ticks(
    spawning: &mut Spawning,
    world: &World,
    level: LevelState,
    first_controls: ControlState,
    ticks: usize,
) -> Vec<Vec<Command>> {
    let player = query::player(world);
    (0..ticks)
        .map(|index| {
            let controls = if index == 0 {
                first_controls
            } else {
                ControlState::default()
            };
            let mut out = Vec::new();
            spawning.handle(&one_second(), level, &controls, &player, &mut out);
            out
        })
        .collect()
}

#[test]
fn schedule_stays_dormant_until_the_player_moves() {
    let world = World::new();
    let mut spawning = Spawning::new(WaveTuning::default(), 3);

    let batches = run_ticks(
        &mut spawning,
        &world,
        LevelState::Sewers,
        ControlState::default(),
        60,
    );

    assert!(batches.iter().all(Vec::is_empty));
    assert!(!spawning.waves_started());
}

#[test]
fn waves_follow_the_configured_sizes_after_the_delay() {
    let world = World::new();
    let mut spawning = Spawning::new(WaveTuning::default(), 3);

    let batches = run_ticks(&mut spawning, &world, LevelState::Sewers, moving(), 40);

    let sizes: Vec<(usize, usize)> = batches
        .iter()
        .enumerate()
        .filter(|(_, batch)| !batch.is_empty())
        .map(|(tick, batch)| (tick + 1, batch.len()))
        .collect();
    assert_eq!(sizes, vec![(9, 2), (14, 2), (19, 3), (24, 1), (29, 2)]);
    assert_eq!(spawning.spawned(), 10);
    assert!(spawning.waves_started());

    for command in batches.iter().flatten() {
        match command {
            Command::SpawnEnemy {
                kind,
                at,
                placement,
            } => {
                assert_eq!(*kind, EntityKind::Rat);
                assert_eq!(*placement, Placement::Scatter);
                assert!((-5.0..=4.0).contains(&at.x));
                assert!((-5.0..=4.0).contains(&at.z));
                assert!((at.y - 0.5).abs() < f32::EPSILON);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}

#[test]
fn total_cap_truncates_the_last_wave() {
    let world = World::new();
    let waves = WaveTuning {
        total: 5,
        ..WaveTuning::default()
    };
    let mut spawning = Spawning::new(waves, 3);

    let batches = run_ticks(&mut spawning, &world, LevelState::Sewers, moving(), 40);

    let sizes: Vec<usize> = batches
        .iter()
        .map(Vec::len)
        .filter(|len| *len > 0)
        .collect();
    assert_eq!(sizes, vec![2, 2, 1]);
    assert_eq!(spawning.spawned(), 5);
}

#[test]
fn other_levels_never_spawn_rats() {
    let world = World::new();
    let mut spawning = Spawning::new(WaveTuning::default(), 3);

    let batches = run_ticks(&mut spawning, &world, LevelState::Street, moving(), 40);

    assert!(batches.iter().all(Vec::is_empty));
    assert_eq!(spawning.spawned(), 0);
}

#[test]
fn identical_seeds_produce_identical_anchors() {
    let world = World::new();
    let collect = |seed: u64| {
        let mut spawning = Spawning::new(WaveTuning::default(), seed);
        run_ticks(&mut spawning, &world, LevelState::Sewers, moving(), 30)
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
    };

    assert_eq!(collect(17), collect(17));
}
