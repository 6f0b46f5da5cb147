#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Maze Chase.
//!
//! The world owns the maze, the player, the pursuers, and the player's queued
//! path. It is mutated exclusively through [`apply`] for commands and [`step`]
//! for the passage of one tick; everything else reads it through [`query`].

mod control;
mod path;

use maze_chase_core::{
    CellCoord, Command, Dimensions, Direction, Event, GameConfig, Maze, MovingObject, PixelPoint,
    Position, CAPTURE_RADIUS,
};
use maze_chase_system_maze_generation as maze_generation;
use maze_chase_system_movement::{self as movement, Kinematics};
use maze_chase_system_pursuit::{self as pursuit, Decision};
use rand::{seq::SliceRandom, Rng};

pub use path::PathQueue;

/// Pursuers never spawn within this many cells of the player on both axes.
const SPAWN_CLEARANCE: u32 = 4;

const PLAYER_START: CellCoord = CellCoord::new(1, 1);

/// Represents the authoritative Maze Chase game state.
#[derive(Clone, Debug)]
pub struct World {
    generation: u64,
    config: Option<GameConfig>,
    maze: Maze,
    exit: PixelPoint,
    player: MovingObject,
    pursuers: Vec<MovingObject>,
    dead: bool,
    won: bool,
    path: PathQueue,
}

impl World {
    /// Creates an empty world that holds no game until a [`Command::NewGame`] is applied.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: 0,
            config: None,
            maze: Maze::default(),
            exit: PixelPoint::default(),
            player: MovingObject::resting_at(PixelPoint::default(), Direction::Right),
            pursuers: Vec::new(),
            dead: false,
            won: false,
            path: PathQueue::new(),
        }
    }

    fn start_game<R>(&mut self, config: GameConfig, rng: &mut R, out_events: &mut Vec<Event>)
    where
        R: Rng + ?Sized,
    {
        let dimensions = config.lab_size().dimensions();

        self.generation += 1;
        self.config = Some(config);
        self.maze = maze_generation::generate(dimensions, rng);
        self.exit = CellCoord::new(dimensions.columns() - 2, dimensions.rows() - 2).center();
        self.player = MovingObject::resting_at(PLAYER_START.center(), Direction::Right);
        self.pursuers = spawn_pursuers(
            dimensions,
            config.difficulty().pursuer_count(dimensions),
            rng,
        );
        self.dead = false;
        self.won = false;
        self.path.clear();

        out_events.push(Event::GameStarted {
            generation: self.generation,
            rows: dimensions.rows(),
            columns: dimensions.columns(),
            pursuers: self.pursuers.len(),
        });
    }

    fn step_player(&mut self, kinematics: Kinematics, out_events: &mut Vec<Event>) {
        if self.dead {
            return;
        }

        if self.player.at_target() {
            if let Some(next) = self.path.pop() {
                self.player.set_target(next);
            }
        }

        movement::advance(&mut self.player, kinematics);

        if self.player.is_at(self.exit) {
            self.won = true;
            out_events.push(Event::PlayerWon {
                generation: self.generation,
            });
        }
    }

    fn step_pursuers<R>(&mut self, kinematics: Kinematics, rng: &mut R, out_events: &mut Vec<Event>)
    where
        R: Rng + ?Sized,
    {
        let player = self.player.position();

        for (index, pursuer) in self.pursuers.iter_mut().enumerate() {
            match pursuit::decide(&self.maze, pursuer, rng) {
                Decision::Continue => {}
                Decision::Retarget(target) => pursuer.set_target(target),
                Decision::Stuck(target) => out_events.push(Event::PursuerStuck {
                    pursuer: index,
                    target,
                }),
            }

            movement::advance(pursuer, kinematics);

            if !self.dead && !self.won && within_capture_radius(player, pursuer.position()) {
                self.dead = true;
                out_events.push(Event::PlayerCaught {
                    generation: self.generation,
                    pursuer: index,
                });
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world.
///
/// Commands that cannot be honoured, such as clicks after the game ended, are
/// reported through `out_events` and otherwise leave the world untouched.
pub fn apply<R>(world: &mut World, command: Command, rng: &mut R, out_events: &mut Vec<Event>)
where
    R: Rng + ?Sized,
{
    match command {
        Command::NewGame { config } => world.start_game(config, rng, out_events),
        Command::Click { x, y, right, .. } => {
            control::click(world, PixelPoint::new(x, y), right, out_events);
        }
        Command::Key { direction } => control::key(world, direction, out_events),
        command => out_events.push(Event::CommandIgnored { command }),
    }
}

/// Advances the simulation by one tick.
///
/// The player walks first and may win; pursuers then pick new targets, walk,
/// and may catch the player unless the game was won earlier in the same tick.
/// A won game no longer changes until the next new game.
pub fn step<R>(world: &mut World, kinematics: Kinematics, rng: &mut R, out_events: &mut Vec<Event>)
where
    R: Rng + ?Sized,
{
    if world.won || world.maze.is_empty() {
        return;
    }

    world.step_player(kinematics, out_events);
    world.step_pursuers(kinematics, rng, out_events);
}

fn within_capture_radius(player: Position, pursuer: Position) -> bool {
    (player.x() - pursuer.x()).abs() < CAPTURE_RADIUS
        && (player.y() - pursuer.y()).abs() < CAPTURE_RADIUS
}

fn spawn_pursuers<R>(dimensions: Dimensions, count: usize, rng: &mut R) -> Vec<MovingObject>
where
    R: Rng + ?Sized,
{
    let passages: Vec<CellCoord> = (1..dimensions.rows())
        .step_by(2)
        .flat_map(|row| {
            (1..dimensions.columns())
                .step_by(2)
                .map(move |column| CellCoord::new(column, row))
        })
        .collect();

    let distant: Vec<CellCoord> = passages
        .iter()
        .copied()
        .filter(|cell| {
            cell.row().abs_diff(PLAYER_START.row()) > SPAWN_CLEARANCE
                || cell.column().abs_diff(PLAYER_START.column()) > SPAWN_CLEARANCE
        })
        .collect();

    let candidates = if distant.is_empty() {
        passages
            .into_iter()
            .filter(|cell| *cell != PLAYER_START)
            .collect()
    } else {
        distant
    };

    (0..count)
        .filter_map(|_| candidates.choose(rng))
        .map(|cell| MovingObject::resting_at(cell.center(), Direction::Right))
        .collect()
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_chase_core::{GameConfig, Maze, MovingObject, PixelPoint};

    use super::{PathQueue, World};

    /// Counter identifying the current game; bumped by every new game.
    #[must_use]
    pub fn generation(world: &World) -> u64 {
        world.generation
    }

    /// Configuration of the running game, if one was started.
    #[must_use]
    pub fn config(world: &World) -> Option<GameConfig> {
        world.config
    }

    /// Provides read-only access to the maze grid.
    #[must_use]
    pub fn maze(world: &World) -> &Maze {
        &world.maze
    }

    /// Pixel the player must reach to win.
    #[must_use]
    pub fn exit(world: &World) -> PixelPoint {
        world.exit
    }

    /// Provides read-only access to the player.
    #[must_use]
    pub fn player(world: &World) -> &MovingObject {
        &world.player
    }

    /// Provides read-only access to the pursuers in spawn order.
    #[must_use]
    pub fn pursuers(world: &World) -> &[MovingObject] {
        &world.pursuers
    }

    /// Waypoints the player will walk through after its current target.
    #[must_use]
    pub fn path(world: &World) -> &PathQueue {
        &world.path
    }

    /// Reports whether a pursuer caught the player.
    #[must_use]
    pub fn is_dead(world: &World) -> bool {
        world.dead
    }

    /// Reports whether the player reached the exit.
    #[must_use]
    pub fn is_won(world: &World) -> bool {
        world.won
    }
}
