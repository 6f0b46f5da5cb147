use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use maze_chase_core::{
    CellCoord, ClickRejection, Direction, Event, GameConfig, Maze, Speed,
    COMMAND_QUEUE_CAPACITY, DIFFICULTIES, LAB_SIZES, PATH_CAPACITY, SPEEDS,
};
use maze_chase_engine::{Engine, EngineOptions};
use maze_chase_world::query;

fn small_empty_game() -> GameConfig {
    GameConfig::new(
        DIFFICULTIES.find("Baby").expect("baby difficulty"),
        LAB_SIZES.find("XS").expect("extra small size"),
        Speed::new("Test", Duration::from_millis(10)).expect("valid speed"),
    )
}

fn seeded_engine(seed: u64, config: GameConfig) -> Engine {
    Engine::start_with(
        EngineOptions {
            seed: Some(seed),
            config,
        },
        || {},
    )
}

fn shortest_route(maze: &Maze, from: CellCoord, to: CellCoord) -> Vec<CellCoord> {
    let mut previous: HashMap<CellCoord, CellCoord> = HashMap::new();
    let mut frontier = VecDeque::from([from]);
    while let Some(cell) = frontier.pop_front() {
        for direction in Direction::ALL {
            if let Some(next) = cell.offset(direction, 1) {
                if maze.is_open(next) && next != from && !previous.contains_key(&next) {
                    let _ = previous.insert(next, cell);
                    frontier.push_back(next);
                }
            }
        }
    }

    let mut route = vec![to];
    while let Some(before) = route.last().and_then(|cell| previous.get(cell)) {
        route.push(*before);
    }
    route.reverse();
    route
}

#[test]
fn default_engine_runs_the_default_game() {
    let engine = Engine::start(|| {});
    let handle = engine.handle();
    let snapshot = handle.snapshot();

    assert_eq!(query::generation(&snapshot), 1);
    assert_eq!(query::config(&snapshot), Some(GameConfig::default()));
    assert_eq!(query::maze(&snapshot).rows(), 33);
    assert_eq!(query::pursuers(&snapshot).len(), 10);
    drop(snapshot);

    assert_eq!(engine.tick_interval(), Duration::from_millis(50));
}

#[test]
fn player_following_queued_clicks_reaches_the_exit() {
    let mut engine = seeded_engine(12, small_empty_game());
    let handle = engine.handle();
    assert_eq!(engine.tick_interval(), Duration::from_millis(10));

    let (route, exit) = handle.with_snapshot(|world| {
        assert!(query::pursuers(world).is_empty());
        let exit = query::exit(world).cell().expect("exit inside maze");
        (
            shortest_route(query::maze(world), CellCoord::new(1, 1), exit),
            exit,
        )
    });
    assert_eq!(route.first(), Some(&CellCoord::new(1, 1)));
    assert_eq!(route.last(), Some(&exit));

    let mut waypoints = route.iter().skip(1);
    let expected_ticks = (route.len() - 1) * 10;
    let mut events = Vec::new();
    let mut ticks = 0;

    while !handle.with_snapshot(query::is_won) {
        let room = handle.with_snapshot(|world| query::path(world).len() < PATH_CAPACITY);
        if room {
            if let Some(cell) = waypoints.next() {
                let center = cell.center();
                handle
                    .submit_click(center.x(), center.y(), true, false)
                    .expect("engine running");
            }
        }
        engine.tick(&mut events);
        ticks += 1;
        assert!(ticks <= expected_ticks + 1, "exit not reached in time");
    }

    assert!(ticks + 1 >= expected_ticks, "reached exit after {ticks} ticks");
    assert!(events.contains(&Event::PlayerWon { generation: 1 }));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::ClickIgnored { .. })));
}

#[test]
fn misaligned_click_leaves_path_unchanged() {
    let mut engine = seeded_engine(3, small_empty_game());
    let handle = engine.handle();

    let diagonal = CellCoord::new(3, 3).center();
    handle
        .submit_click(diagonal.x(), diagonal.y(), true, false)
        .expect("engine running");
    let mut events = Vec::new();
    engine.tick(&mut events);

    assert_eq!(
        events,
        vec![Event::ClickIgnored {
            reason: ClickRejection::NotAligned
        }]
    );
    assert!(handle.with_snapshot(|world| query::path(world).is_empty()));
}

#[test]
fn new_game_request_replaces_the_running_game() {
    let mut engine = seeded_engine(8, GameConfig::default());
    let handle = engine.handle();
    let config = GameConfig::new(
        DIFFICULTIES.find("Hard").expect("hard difficulty"),
        LAB_SIZES.find("S").expect("small size"),
        SPEEDS.find("Fast").expect("fast speed"),
    );

    handle.submit_new_game(config).expect("engine running");
    let mut events = Vec::new();
    engine.tick(&mut events);

    assert_eq!(
        events.first(),
        Some(&Event::GameStarted {
            generation: 2,
            rows: 15,
            columns: 15,
            pursuers: 4,
        })
    );
    let snapshot = handle.snapshot();
    assert_eq!(query::generation(&snapshot), 2);
    assert_eq!(query::config(&snapshot), Some(config));
    drop(snapshot);
    assert_eq!(engine.tick_interval(), Duration::from_millis(37));
}

#[test]
fn commands_keep_submission_order_per_producer() {
    const PER_PRODUCER: usize = 40;

    let mut engine = seeded_engine(21, small_empty_game());
    let horizontal = engine.handle();
    let vertical = engine.handle();

    let producers = [
        thread::spawn(move || {
            for index in 0..PER_PRODUCER {
                let direction = if index % 2 == 0 {
                    Direction::Right
                } else {
                    Direction::Left
                };
                horizontal.submit_key(direction).expect("engine running");
            }
        }),
        thread::spawn(move || {
            for index in 0..PER_PRODUCER {
                let direction = if index % 2 == 0 {
                    Direction::Down
                } else {
                    Direction::Up
                };
                vertical.submit_key(direction).expect("engine running");
            }
        }),
    ];

    let mut events = Vec::new();
    let mut received = Vec::new();
    for _ in 0..100_000 {
        engine.tick(&mut events);
        received.extend(events.drain(..).filter_map(|event| match event {
            Event::MoveQueued { direction, .. } | Event::KeyIgnored { direction } => {
                Some(direction)
            }
            _ => None,
        }));
        if received.len() == 2 * PER_PRODUCER {
            break;
        }
        thread::sleep(Duration::from_micros(50));
    }
    for producer in producers {
        producer.join().expect("producer finished");
    }

    let of_axis = |directions: [Direction; 2]| -> Vec<Direction> {
        received
            .iter()
            .copied()
            .filter(|direction| directions.contains(direction))
            .collect()
    };
    let expected = |first: Direction, second: Direction| -> Vec<Direction> {
        (0..PER_PRODUCER)
            .map(|index| if index % 2 == 0 { first } else { second })
            .collect()
    };

    assert_eq!(received.len(), 2 * PER_PRODUCER);
    assert_eq!(
        of_axis([Direction::Right, Direction::Left]),
        expected(Direction::Right, Direction::Left)
    );
    assert_eq!(
        of_axis([Direction::Down, Direction::Up]),
        expected(Direction::Down, Direction::Up)
    );
}

#[test]
fn snapshots_and_redraws_work_across_threads() {
    let redraws = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&redraws);
    let mut engine = Engine::start_with(
        EngineOptions {
            seed: Some(99),
            config: GameConfig::default(),
        },
        move || {
            let _ = counter.fetch_add(1, Ordering::SeqCst);
        },
    );

    let observer = engine.handle();
    let reader = thread::spawn(move || {
        (0..50)
            .map(|_| observer.with_snapshot(|world| query::pursuers(world).len()))
            .collect::<Vec<_>>()
    });

    let mut events = Vec::new();
    for _ in 0..25 {
        engine.tick(&mut events);
    }
    let counts = reader.join().expect("reader finished");

    assert_eq!(redraws.load(Ordering::SeqCst), 25);
    assert!(counts.iter().all(|count| *count == 10));
}

#[test]
fn blocked_producer_resumes_once_snapshots_are_released() {
    let mut engine = seeded_engine(9, small_empty_game());
    let handle = engine.handle();
    for _ in 0..COMMAND_QUEUE_CAPACITY {
        handle.submit_key(Direction::Down).expect("engine running");
    }

    let producer = {
        let handle = engine.handle();
        thread::spawn(move || handle.submit_key(Direction::Up))
    };
    let generation = handle.with_snapshot(query::generation);
    assert_eq!(generation, 1);

    let mut events = Vec::new();
    while !producer.is_finished() {
        engine.tick(&mut events);
        thread::sleep(Duration::from_millis(1));
    }
    producer
        .join()
        .expect("producer thread")
        .expect("engine running");
    engine.tick(&mut events);

    let key_events = events
        .iter()
        .filter(|event| matches!(event, Event::MoveQueued { .. } | Event::KeyIgnored { .. }))
        .count();
    assert_eq!(key_events, COMMAND_QUEUE_CAPACITY + 1);
}
