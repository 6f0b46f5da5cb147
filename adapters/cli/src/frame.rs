//! Plain-text frames drawn from world snapshots.

use std::fmt::Write;

use maze_chase_core::{CellCoord, CellKind, Direction, MovingObject};
use maze_chase_world::{query, World};

const WALL: char = '#';
const OPEN: char = ' ';
const EXIT: char = 'E';
const WAYPOINT: char = '.';
const PURSUER: char = '&';
const CAUGHT: char = 'X';

/// Renders the world as a status line followed by one text row per maze row.
pub(crate) fn render(world: &World) -> String {
    let mut frame = String::new();
    let Some(config) = query::config(world) else {
        frame.push_str("no game running\n");
        return frame;
    };

    let status = if query::is_won(world) {
        "won"
    } else if query::is_dead(world) {
        "caught"
    } else {
        "running"
    };
    let _ = writeln!(
        frame,
        "game {} | {} | {} | {} | {} | path {}",
        query::generation(world),
        config.difficulty(),
        config.lab_size(),
        config.speed(),
        status,
        query::path(world).len()
    );

    let maze = query::maze(world);
    let mut rows: Vec<Vec<char>> = (0..maze.rows())
        .filter_map(|row| maze.row(row))
        .map(|cells| {
            cells
                .iter()
                .map(|cell| match cell {
                    CellKind::Wall => WALL,
                    CellKind::Empty => OPEN,
                })
                .collect()
        })
        .collect();

    let mut mark = |object_cell: Option<(usize, usize)>, glyph: char| {
        if let Some((column, row)) = object_cell {
            if let Some(slot) = rows.get_mut(row).and_then(|cells| cells.get_mut(column)) {
                *slot = glyph;
            }
        }
    };

    for waypoint in query::path(world).iter() {
        mark(grid_index(waypoint.cell()), WAYPOINT);
    }
    mark(grid_index(query::exit(world).cell()), EXIT);
    for pursuer in query::pursuers(world) {
        mark(actor_index(pursuer), PURSUER);
    }
    let player = query::player(world);
    let glyph = if query::is_dead(world) {
        CAUGHT
    } else {
        facing_glyph(player.facing())
    };
    mark(actor_index(player), glyph);

    for row in rows {
        frame.extend(row);
        frame.push('\n');
    }
    frame
}

fn facing_glyph(direction: Direction) -> char {
    match direction {
        Direction::Right => '>',
        Direction::Left => '<',
        Direction::Up => '^',
        Direction::Down => 'v',
    }
}

fn actor_index(actor: &MovingObject) -> Option<(usize, usize)> {
    grid_index(actor.position().truncated().cell())
}

fn grid_index(cell: Option<CellCoord>) -> Option<(usize, usize)> {
    let cell = cell?;
    Some((
        usize::try_from(cell.column()).ok()?,
        usize::try_from(cell.row()).ok()?,
    ))
}
