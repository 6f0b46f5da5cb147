#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Maze generator built on recursive binary space partitioning.
//!
//! The maze is framed by a ring of walls and then split recursively. Every
//! split draws a wall line on an even index with a single passage on an odd
//! index, which keeps all odd/odd cells walkable and joins the two halves
//! through exactly one opening. The result is a perfect maze: every open cell
//! is reachable and the open cells contain no cycles.

use std::cmp::Ordering;

use maze_chase_core::{CellCoord, CellKind, Dimensions, Maze};
use rand::Rng;

/// Spans wider than this split through their midpoint instead of a random line.
const RANDOM_SPLIT_SPAN: u32 = 6;

/// Generates a new maze of the provided dimensions.
#[must_use]
pub fn generate<R>(dimensions: Dimensions, rng: &mut R) -> Maze
where
    R: Rng + ?Sized,
{
    let mut maze = Maze::filled(dimensions, CellKind::Empty);
    let last_row = dimensions.rows() - 1;
    let last_column = dimensions.columns() - 1;

    for row in 0..=last_row {
        maze.set(CellCoord::new(0, row), CellKind::Wall);
        maze.set(CellCoord::new(last_column, row), CellKind::Wall);
    }
    for column in 0..=last_column {
        maze.set(CellCoord::new(column, 0), CellKind::Wall);
        maze.set(CellCoord::new(column, last_row), CellKind::Wall);
    }

    partition(
        &mut maze,
        Area {
            left: 0,
            top: 0,
            right: last_column,
            bottom: last_row,
        },
        rng,
    );
    maze
}

/// Rectangle whose bounding lines are already walls, inclusive on every side.
#[derive(Clone, Copy, Debug)]
struct Area {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

fn partition<R>(maze: &mut Maze, area: Area, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let width = area.right - area.left;
    let height = area.bottom - area.top;

    if width <= 2 || height <= 2 {
        return;
    }

    let vertical = match width.cmp(&height) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => rng.gen_bool(0.5),
    };

    if vertical {
        let wall = wall_line(area.left, area.right, rng);
        let passage = passage_position(area.top, area.bottom, rng);
        for row in (area.top..=area.bottom).filter(|row| *row != passage) {
            maze.set(CellCoord::new(wall, row), CellKind::Wall);
        }

        partition(maze, Area { right: wall, ..area }, rng);
        partition(maze, Area { left: wall, ..area }, rng);
    } else {
        let wall = wall_line(area.top, area.bottom, rng);
        let passage = passage_position(area.left, area.right, rng);
        for column in (area.left..=area.right).filter(|column| *column != passage) {
            maze.set(CellCoord::new(column, wall), CellKind::Wall);
        }

        partition(maze, Area { bottom: wall, ..area }, rng);
        partition(maze, Area { top: wall, ..area }, rng);
    }
}

/// Even index strictly between `min` and `max` for a new wall line.
fn wall_line<R>(min: u32, max: u32, rng: &mut R) -> u32
where
    R: Rng + ?Sized,
{
    if max - min > RANDOM_SPLIT_SPAN {
        midpoint(min, max)
    } else {
        random_even(min, max, rng)
    }
}

fn random_even<R>(min: u32, max: u32, rng: &mut R) -> u32
where
    R: Rng + ?Sized,
{
    min + rng.gen_range(1..(max - min) / 2) * 2
}

fn midpoint(min: u32, max: u32) -> u32 {
    let middle = (min + max) / 2;
    middle - middle % 2
}

/// Odd index strictly between `min` and `max` for the single passage.
fn passage_position<R>(min: u32, max: u32, rng: &mut R) -> u32
where
    R: Rng + ?Sized,
{
    min + rng.gen_range(1..=(max - min) / 2) * 2 - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn midpoint_rounds_down_to_even() {
        assert_eq!(midpoint(0, 32), 16);
        assert_eq!(midpoint(0, 20), 10);
        assert_eq!(midpoint(4, 14), 8);
        assert_eq!(midpoint(0, 14), 6);
    }

    #[test]
    fn random_positions_keep_parity_and_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let wall = random_even(4, 10, &mut rng);
            assert!(wall > 4 && wall < 10 && wall % 2 == 0, "wall at {wall}");

            let passage = passage_position(4, 10, &mut rng);
            assert!(passage > 4 && passage < 10 && passage % 2 == 1, "passage at {passage}");
        }
    }

    #[test]
    fn smallest_maze_keeps_odd_cells_open() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let dimensions = Dimensions::new(5, 5).expect("valid dimensions");
        let maze = generate(dimensions, &mut rng);

        for (row, column) in [(1, 1), (1, 3), (3, 1), (3, 3)] {
            assert!(maze.is_open(CellCoord::new(column, row)));
        }
        assert_eq!(maze.cell(CellCoord::new(2, 2)), Some(CellKind::Wall));
    }
}
