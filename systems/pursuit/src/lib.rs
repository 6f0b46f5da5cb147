#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Random-walk behaviour for the pursuers roaming the maze.

use maze_chase_core::{Direction, Maze, MovingObject, PixelPoint};
use rand::{seq::SliceRandom, Rng};

/// Outcome of consulting the behaviour for a single pursuer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// The pursuer is still walking toward its current target.
    Continue,
    /// The pursuer reached its target and should walk toward the new one.
    Retarget(PixelPoint),
    /// The pursuer reached its target but no neighbouring cell is open.
    Stuck(PixelPoint),
}

/// Picks the next target for a pursuer that reached its current one.
///
/// Directions are tried in a freshly shuffled order and the first open
/// neighbour wins. When the cell beyond it is open as well the pursuer commits
/// to two cells, which favours longer straight runs.
pub fn decide<R>(maze: &Maze, pursuer: &MovingObject, rng: &mut R) -> Decision
where
    R: Rng + ?Sized,
{
    if !pursuer.at_target() {
        return Decision::Continue;
    }

    let target = pursuer.target();
    let Some(cell) = target.cell() else {
        return Decision::Stuck(target);
    };

    let mut directions = Direction::ALL;
    directions.shuffle(rng);

    for direction in directions {
        let Some(next) = cell.offset(direction, 1) else {
            continue;
        };
        if !maze.is_open(next) {
            continue;
        }

        let beyond_open = cell
            .offset(direction, 2)
            .is_some_and(|beyond| maze.is_open(beyond));
        let cells = if beyond_open { 2 } else { 1 };
        return Decision::Retarget(target.offset(direction, cells));
    }

    Decision::Stuck(target)
}
