#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! through the engine's queue, the world executes them via its `apply` entry
//! point, and reports what happened as [`Event`] values. Geometry lives in two
//! spaces: discrete maze cells addressed by [`CellCoord`], and the pixel space
//! actors move through, where every cell spans [`CELL_SIZE`] pixels.

mod config;

use serde::{Deserialize, Serialize};

pub use config::{
    Catalog, ConfigError, Difficulty, Dimensions, GameConfig, LabSize, Named, Speed, DIFFICULTIES,
    LAB_SIZES, MIN_DIMENSION, SPEEDS,
};

/// Edge length of a single maze cell measured in pixels.
pub const CELL_SIZE: i32 = 40;

/// Maximum number of waypoints the player may have queued at once.
pub const PATH_CAPACITY: usize = 20;

/// Number of commands the engine queue buffers before producers block.
pub const COMMAND_QUEUE_CAPACITY: usize = 10;

/// Per-axis distance below which a pursuer catches the player.
pub const CAPTURE_RADIUS: f64 = 0.75 * CELL_SIZE as f64;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Command {
    /// Discards the running game and starts a fresh one with the provided configuration.
    NewGame {
        /// Configuration selected for the new game.
        config: GameConfig,
    },
    /// Pointer press inside the maze, expressed in pixel coordinates.
    Click {
        /// Horizontal pixel coordinate of the press.
        x: i32,
        /// Vertical pixel coordinate of the press.
        y: i32,
        /// Whether the primary button was held.
        left: bool,
        /// Whether the secondary button was held; cancels the queued path.
        right: bool,
    },
    /// Directional key press steering the player by a single cell.
    Key {
        /// Direction requested by the key.
        direction: Direction,
    },
}

/// Events reported by the world after processing commands or advancing a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A new game replaced the previous one.
    GameStarted {
        /// Generation counter assigned to the new game.
        generation: u64,
        /// Number of maze rows.
        rows: u32,
        /// Number of maze columns.
        columns: u32,
        /// Number of pursuers placed into the maze.
        pursuers: usize,
    },
    /// A click appended a waypoint to the player's path.
    WaypointQueued {
        /// Pixel center of the cell that was queued.
        waypoint: PixelPoint,
        /// Length of the path queue after the append.
        queued: usize,
    },
    /// The queued path was discarded by a cancel click.
    PathCleared,
    /// A click was dropped without affecting the game.
    ClickIgnored {
        /// Reason the click was dropped.
        reason: ClickRejection,
    },
    /// A key press replaced the queued path with a single-cell move.
    MoveQueued {
        /// Direction of the move.
        direction: Direction,
        /// Pixel center of the destination cell.
        waypoint: PixelPoint,
    },
    /// A key press could not be turned into a move.
    KeyIgnored {
        /// Direction of the rejected key press.
        direction: Direction,
    },
    /// The player reached the exit.
    PlayerWon {
        /// Generation of the game that was won.
        generation: u64,
    },
    /// A pursuer caught the player.
    PlayerCaught {
        /// Generation of the game that was lost.
        generation: u64,
        /// Index of the pursuer responsible for the capture.
        pursuer: usize,
    },
    /// A pursuer found no open neighbour and kept its target for another tick.
    PursuerStuck {
        /// Index of the pursuer that could not move.
        pursuer: usize,
        /// Target the pursuer keeps for another tick.
        target: PixelPoint,
    },
    /// The world does not know how to process the provided command.
    CommandIgnored {
        /// The command that was skipped.
        command: Command,
    },
}

/// Reasons a click may be dropped by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClickRejection {
    /// The game already ended in a win or a capture.
    GameOver,
    /// The path queue already holds [`PATH_CAPACITY`] waypoints.
    PathFull,
    /// The click landed outside the maze grid.
    OutOfBounds,
    /// The clicked cell shares neither row nor column with the last waypoint.
    NotAligned,
    /// A wall separates the last waypoint from the clicked cell.
    Blocked,
}

/// Cardinal directions an actor may face or travel in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
}

impl Direction {
    /// Every direction in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Column and row deltas of a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Cell reached by moving `steps` cells in `direction`, if it has non-negative indices.
    #[must_use]
    pub fn offset(self, direction: Direction, steps: u32) -> Option<CellCoord> {
        let (dcol, drow) = direction.offset();
        let steps = i64::from(steps);
        let column = i64::from(self.column) + i64::from(dcol) * steps;
        let row = i64::from(self.row) + i64::from(drow) * steps;
        Some(CellCoord::new(
            u32::try_from(column).ok()?,
            u32::try_from(row).ok()?,
        ))
    }

    /// Pixel coordinate of the cell's center.
    #[must_use]
    pub fn center(self) -> PixelPoint {
        let center = |index: u32| {
            i32::try_from(index)
                .unwrap_or(i32::MAX)
                .saturating_mul(CELL_SIZE)
                .saturating_add(CELL_SIZE / 2)
        };
        PixelPoint::new(center(self.column), center(self.row))
    }
}

/// Whole-pixel point used for targets, waypoints and the exit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    x: i32,
    y: i32,
}

impl PixelPoint {
    /// Creates a point from pixel coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal pixel coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical pixel coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Cell containing the point, or `None` for negative coordinates.
    #[must_use]
    pub fn cell(self) -> Option<CellCoord> {
        let column = u32::try_from(self.x.div_euclid(CELL_SIZE)).ok()?;
        let row = u32::try_from(self.y.div_euclid(CELL_SIZE)).ok()?;
        Some(CellCoord::new(column, row))
    }

    /// Point translated by `cells` whole cells in `direction`.
    #[must_use]
    pub const fn offset(self, direction: Direction, cells: i32) -> Self {
        let (dcol, drow) = direction.offset();
        Self::new(
            self.x + dcol * cells * CELL_SIZE,
            self.y + drow * cells * CELL_SIZE,
        )
    }
}

/// Continuous pixel position of an actor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Creates a position from pixel coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Horizontal pixel coordinate.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Vertical pixel coordinate.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Position truncated toward zero onto the pixel grid.
    #[must_use]
    pub fn truncated(self) -> PixelPoint {
        PixelPoint::new(self.x as i32, self.y as i32)
    }
}

impl From<PixelPoint> for Position {
    fn from(point: PixelPoint) -> Self {
        Self::new(f64::from(point.x()), f64::from(point.y()))
    }
}

/// Content of a single maze cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Walkable passage.
    #[default]
    Empty,
    /// Impassable wall.
    Wall,
}

/// Dense row-major grid of maze cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Maze {
    rows: u32,
    columns: u32,
    cells: Vec<CellKind>,
}

impl Maze {
    /// Creates a maze of the provided dimensions where every cell holds `kind`.
    #[must_use]
    pub fn filled(dimensions: Dimensions, kind: CellKind) -> Self {
        let rows = dimensions.rows();
        let columns = dimensions.columns();
        let capacity = usize::try_from(u64::from(rows) * u64::from(columns)).unwrap_or(0);
        Self {
            rows,
            columns,
            cells: vec![kind; capacity],
        }
    }

    /// Number of rows in the maze.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the maze.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the maze holds no cells, as before the first game starts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Content of the provided cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<CellKind> {
        self.index(cell).and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell lies inside the grid and is walkable.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        self.cell(cell) == Some(CellKind::Empty)
    }

    /// Overwrites the content of a cell. Cells outside the grid are ignored.
    pub fn set(&mut self, cell: CellCoord, kind: CellKind) {
        if let Some(slot) = self.index(cell).and_then(|index| self.cells.get_mut(index)) {
            *slot = kind;
        }
    }

    /// Cells of a single row, or `None` when the row lies outside the grid.
    #[must_use]
    pub fn row(&self, row: u32) -> Option<&[CellKind]> {
        if row >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let start = usize::try_from(row).ok()?.checked_mul(width)?;
        self.cells.get(start..start + width)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Actor travelling through the maze toward a target pixel.
///
/// Movement is strictly axis-aligned: the stepper only ever changes one axis
/// per tick, so at most one axis differs between position and target once an
/// actor has lined up with its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovingObject {
    position: Position,
    facing: Direction,
    target: PixelPoint,
}

impl MovingObject {
    /// Creates an actor resting at `point`, facing `facing`, with no pending movement.
    #[must_use]
    pub fn resting_at(point: PixelPoint, facing: Direction) -> Self {
        Self {
            position: Position::from(point),
            facing,
            target: point,
        }
    }

    /// Continuous position of the actor.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Direction the actor faces.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Pixel the actor is walking toward.
    #[must_use]
    pub const fn target(&self) -> PixelPoint {
        self.target
    }

    /// Replaces the actor's position.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Turns the actor to face `direction`.
    pub fn face(&mut self, direction: Direction) {
        self.facing = direction;
    }

    /// Replaces the pixel the actor walks toward.
    pub fn set_target(&mut self, target: PixelPoint) {
        self.target = target;
    }

    /// Reports whether the truncated position matches the target exactly.
    #[must_use]
    pub fn at_target(&self) -> bool {
        self.position.truncated() == self.target
    }

    /// Reports whether the truncated position matches `point` exactly.
    #[must_use]
    pub fn is_at(&self, point: PixelPoint) -> bool {
        self.position.truncated() == point
    }

    /// Center of the cell containing the actor's truncated position.
    #[must_use]
    pub fn current_cell_center(&self) -> PixelPoint {
        let point = self.position.truncated();
        PixelPoint::new(
            point.x().div_euclid(CELL_SIZE) * CELL_SIZE + CELL_SIZE / 2,
            point.y().div_euclid(CELL_SIZE) * CELL_SIZE + CELL_SIZE / 2,
        )
    }
}
