//! Player steering through clicks and directional keys.

use maze_chase_core::{CellCoord, ClickRejection, Direction, Event, PixelPoint, CELL_SIZE};

use crate::World;

/// Handles a pointer press at `point`; `cancel` is set for secondary-button presses.
pub(crate) fn click(world: &mut World, point: PixelPoint, cancel: bool, out_events: &mut Vec<Event>) {
    match queue_click(world, point, cancel) {
        Ok(event) => out_events.push(event),
        Err(reason) => out_events.push(Event::ClickIgnored { reason }),
    }
}

fn queue_click(
    world: &mut World,
    point: PixelPoint,
    cancel: bool,
) -> Result<Event, ClickRejection> {
    if world.dead || world.won {
        return Err(ClickRejection::GameOver);
    }

    if cancel {
        world.path.clear();
        let anchor = world.player.current_cell_center();
        world.player.set_target(anchor);
        return Ok(Event::PathCleared);
    }

    if world.path.is_full() {
        return Err(ClickRejection::PathFull);
    }

    let last = world.path.last().unwrap_or_else(|| world.player.target());
    let from = last.cell().ok_or(ClickRejection::OutOfBounds)?;
    let to = point
        .cell()
        .filter(|cell| world.maze.cell(*cell).is_some())
        .ok_or(ClickRejection::OutOfBounds)?;

    if from.column() != to.column() && from.row() != to.row() {
        return Err(ClickRejection::NotAligned);
    }
    if line_between(from, to).any(|cell| !world.maze.is_open(cell)) {
        return Err(ClickRejection::Blocked);
    }

    let waypoint = to.center();
    let queued = world.path.push(waypoint)?;
    Ok(Event::WaypointQueued { waypoint, queued })
}

/// Cells on the straight segment between two aligned cells, both ends included.
fn line_between(from: CellCoord, to: CellCoord) -> impl Iterator<Item = CellCoord> {
    let columns = from.column().min(to.column())..=from.column().max(to.column());
    let rows = from.row().min(to.row())..=from.row().max(to.row());
    rows.flat_map(move |row| {
        columns
            .clone()
            .map(move |column| CellCoord::new(column, row))
    })
}

/// Handles a directional key press by queueing a single-cell move.
///
/// Keys take priority over clicks: a target more than a cell away is dropped
/// together with the queued path, and the move is computed from the cell the
/// player currently stands in.
pub(crate) fn key(world: &mut World, direction: Direction, out_events: &mut Vec<Event>) {
    if world.dead || world.won {
        out_events.push(Event::KeyIgnored { direction });
        return;
    }

    let player = &mut world.player;
    player.face(direction);

    let position = player.position().truncated();
    let target = player.target();
    if (position.x() - target.x()).abs() >= CELL_SIZE
        || (position.y() - target.y()).abs() >= CELL_SIZE
    {
        world.path.clear();
        player.set_target(player.current_cell_center());
    }

    let next = player
        .target()
        .cell()
        .and_then(|cell| cell.offset(direction, 1))
        .filter(|cell| world.maze.is_open(*cell));

    match next {
        Some(cell) => {
            let waypoint = cell.center();
            world.path.replace_with(waypoint);
            out_events.push(Event::MoveQueued {
                direction,
                waypoint,
            });
        }
        None => out_events.push(Event::KeyIgnored { direction }),
    }
}
