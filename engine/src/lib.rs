#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-tick engine that drives a Maze Chase world.
//!
//! The engine owns the world behind a [`SharedState`] lock and a bounded
//! command queue. Producers on any thread hold an [`EngineHandle`], submit
//! commands through it, and take read-locked [`Snapshot`]s for drawing. Every
//! tick drains the queue, advances the simulation under a single write lock,
//! and then invokes the redraw callback.

mod state;

use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, Sender};
use maze_chase_core::{
    Command, Direction, Event, GameConfig, COMMAND_QUEUE_CAPACITY, SPEEDS,
};
use maze_chase_system_movement::Kinematics;
use maze_chase_world::{self as world, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

pub use state::{SharedState, Snapshot};

/// Options controlling how an engine is constructed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EngineOptions {
    /// Seed for the engine's random source; `None` draws one from the operating system.
    pub seed: Option<u64>,
    /// Configuration of the game started during construction.
    pub config: GameConfig,
}

/// Error returned when a command is submitted after the engine was dropped.
#[derive(Debug, Error)]
#[error("engine stopped before the command could be delivered")]
pub struct EngineStopped(Command);

impl EngineStopped {
    /// Returns the command that could not be delivered.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.0
    }
}

/// Thread-safe access point used by presentation layers and other producers.
#[derive(Clone, Debug)]
pub struct EngineHandle {
    state: Arc<SharedState>,
    commands: Sender<Command>,
}

impl EngineHandle {
    /// Requests a new game; blocks while the command queue is full.
    pub fn submit_new_game(&self, config: GameConfig) -> Result<(), EngineStopped> {
        self.submit(Command::NewGame { config })
    }

    /// Submits a pointer press in pixel coordinates; blocks while the command queue is full.
    pub fn submit_click(&self, x: i32, y: i32, left: bool, right: bool) -> Result<(), EngineStopped> {
        self.submit(Command::Click { x, y, left, right })
    }

    /// Submits a directional key press; blocks while the command queue is full.
    pub fn submit_key(&self, direction: Direction) -> Result<(), EngineStopped> {
        self.submit(Command::Key { direction })
    }

    /// Takes a read-locked view of the world.
    ///
    /// The engine cannot tick while the snapshot is alive, so callers should
    /// copy what they need and drop it promptly. A thread holding a snapshot
    /// must not call any `submit_*` method: with a full queue the send waits
    /// for a tick that waits for the snapshot, and both block forever. Prefer
    /// [`EngineHandle::with_snapshot`], which releases the lock before returning.
    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.read()
    }

    /// Runs `f` against a read-locked view of the world.
    pub fn with_snapshot<T>(&self, f: impl FnOnce(&World) -> T) -> T {
        self.state.with_read(f)
    }

    fn submit(&self, command: Command) -> Result<(), EngineStopped> {
        self.commands
            .send(command)
            .map_err(|error| EngineStopped(error.into_inner()))
    }
}

/// Owner of the world and the command queue that runs the simulation loop.
pub struct Engine {
    handle: EngineHandle,
    commands: Receiver<Command>,
    rng: ChaCha8Rng,
    kinematics: Kinematics,
    invalidate: Box<dyn Fn() + Send>,
}

impl Engine {
    /// Creates an engine running the default game with an entropy-seeded random source.
    pub fn start<F>(invalidate: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        Self::start_with(EngineOptions::default(), invalidate)
    }

    /// Creates an engine from explicit options.
    ///
    /// The configured game is started before this returns, so the first
    /// snapshot already shows generation one. `invalidate` runs after every tick.
    pub fn start_with<F>(options: EngineOptions, invalidate: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let seed = options.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        info!(seed, "engine starting");

        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::NewGame {
                config: options.config,
            },
            &mut rng,
            &mut events,
        );
        events.iter().for_each(log_event);

        let (sender, receiver) = crossbeam_channel::bounded(COMMAND_QUEUE_CAPACITY);
        Self {
            handle: EngineHandle {
                state: Arc::new(SharedState::new(world)),
                commands: sender,
            },
            commands: receiver,
            rng,
            kinematics: Kinematics::default(),
            invalidate: Box::new(invalidate),
        }
    }

    /// Creates another handle for submitting commands and taking snapshots.
    #[must_use]
    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    /// Runs a single tick and appends everything that happened to `out_events`.
    ///
    /// Pending commands are applied in submission order before the world steps.
    /// The write lock covers both phases, so snapshots never observe a
    /// half-processed tick.
    pub fn tick(&mut self, out_events: &mut Vec<Event>) {
        let first = out_events.len();
        let Self {
            handle,
            commands,
            rng,
            kinematics,
            ..
        } = self;

        let generation = handle.state.with_write(|world| {
            for command in commands.try_iter() {
                world::apply(world, command, rng, out_events);
            }
            world::step(world, *kinematics, rng, out_events);
            query::generation(world)
        });

        out_events[first..].iter().for_each(log_event);
        trace!(generation, events = out_events.len() - first, "tick complete");
        (self.invalidate)();
    }

    /// Real-time delay between ticks for the running game's speed.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.handle.with_snapshot(|world| {
            query::config(world)
                .map_or_else(|| SPEEDS.default_entry(), |config| config.speed())
                .tick_interval()
        })
    }

    /// Ticks forever, pacing iterations by the running game's speed.
    pub fn run_loop(mut self) -> ! {
        let mut events = Vec::new();
        loop {
            let started = Instant::now();
            events.clear();
            self.tick(&mut events);

            if let Some(remaining) = self.tick_interval().checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("handle", &self.handle)
            .field("pending_commands", &self.commands.len())
            .field("kinematics", &self.kinematics)
            .finish_non_exhaustive()
    }
}

fn log_event(event: &Event) {
    match event {
        Event::GameStarted {
            generation,
            rows,
            columns,
            pursuers,
        } => info!(generation, rows, columns, pursuers, "game started"),
        Event::WaypointQueued { waypoint, queued } => {
            debug!(x = waypoint.x(), y = waypoint.y(), queued, "waypoint queued");
        }
        Event::PathCleared => debug!("path cleared"),
        Event::ClickIgnored { reason } => debug!(?reason, "click ignored"),
        Event::MoveQueued {
            direction,
            waypoint,
        } => debug!(?direction, x = waypoint.x(), y = waypoint.y(), "move queued"),
        Event::KeyIgnored { direction } => debug!(?direction, "key ignored"),
        Event::PlayerWon { generation } => info!(generation, "player reached the exit"),
        Event::PlayerCaught {
            generation,
            pursuer,
        } => info!(generation, pursuer, "player caught"),
        Event::PursuerStuck { pursuer, target } => {
            warn!(pursuer, x = target.x(), y = target.y(), "pursuer has no open neighbour");
        }
        Event::CommandIgnored { command } => warn!(?command, "command ignored"),
    }
}
