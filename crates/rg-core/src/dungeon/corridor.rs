//! Corridor carving between parent and child rooms
//!
//! Every tree edge gets one corridor. Both ends are door cells on the
//! facing walls; the body is a random walk biased toward whichever axis
//! has more distance left, so corridors wander roughly diagonally.
//! A walk that runs into another room's floor stops there: the corridor
//! is left truncated rather than cut across the room.

use tracing::trace;

use crate::rng::LevelRng;

use super::{CellType, Coordinate, Grid, Room};

/// How a single corridor walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveOutcome {
    /// Reached a cell adjacent to the target door
    Complete,
    /// Stopped on a floor or door cell before reaching the target
    Truncated { at: Coordinate },
}

/// Totals over a whole tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorridorStats {
    pub connections: usize,
    pub truncated: usize,
}

/// Door endpoints for a pair of rooms
///
/// Rooms are ordered left to right first. If their row ranges overlap
/// enough the corridor runs from the left room's right wall to the right
/// room's left wall at mid height; otherwise it runs between the
/// horizontal walls that face each other, at mid width.
pub fn door_endpoints(a: &Room, b: &Room) -> (Coordinate, Coordinate) {
    let (first, second) = if a.x > b.x { (b, a) } else { (a, b) };
    let dy = first.y.abs_diff(second.y);

    if dy <= first.height && dy <= second.height {
        return (
            Coordinate::new(first.mid_row(), first.right_border()),
            Coordinate::new(second.mid_row(), second.x),
        );
    }
    if first.y < second.y {
        (
            Coordinate::new(first.bottom_border(), first.mid_col()),
            Coordinate::new(second.y, second.mid_col()),
        )
    } else {
        (
            Coordinate::new(first.y, first.mid_col()),
            Coordinate::new(second.bottom_border(), second.mid_col()),
        )
    }
}

/// Turn a wall endpoint into a door; floor is never overwritten
fn mark_door(grid: &mut Grid, at: Coordinate) {
    if grid.get(at) != Some(CellType::RoomSpace) {
        grid.set(at, CellType::Door);
    }
}

/// Carve a corridor from door `from` to door `to`
///
/// Each step moves one cell toward `to`, horizontally with probability
/// (remaining columns / remaining distance). Walls along the way become
/// doors and empty space becomes path. Stepping onto room floor or an
/// existing door ends the walk.
pub fn dig_corridor(
    grid: &mut Grid,
    from: Coordinate,
    to: Coordinate,
    rng: &mut LevelRng,
) -> CarveOutcome {
    mark_door(grid, from);
    mark_door(grid, to);

    let mut cur = from;
    while cur.manhattan(to) > 1 {
        let d_col = cur.col.abs_diff(to.col);
        if rng.rn2(cur.manhattan(to)) < d_col {
            cur.col = step_toward(cur.col, to.col);
        } else {
            cur.row = step_toward(cur.row, to.row);
        }

        match grid.get(cur) {
            Some(cell) if cell.is_wall() => grid.set(cur, CellType::Door),
            Some(CellType::EmptySpace | CellType::Path) => grid.set(cur, CellType::Path),
            _ => return CarveOutcome::Truncated { at: cur },
        }
    }
    CarveOutcome::Complete
}

fn step_toward(from: usize, to: usize) -> usize {
    if to > from { from + 1 } else { from - 1 }
}

/// Connect two rooms with a door-terminated corridor
pub fn join_rooms(grid: &mut Grid, a: &Room, b: &Room, rng: &mut LevelRng) -> CarveOutcome {
    let (from, to) = door_endpoints(a, b);
    dig_corridor(grid, from, to, rng)
}

/// Connect every room to each of its children, top down
///
/// Rooms must already be stamped so walks can detect room floor.
pub fn generate_corridors(grid: &mut Grid, root: &Room, rng: &mut LevelRng) -> CorridorStats {
    let mut stats = CorridorStats::default();
    carve_subtree(grid, root, rng, &mut stats);
    stats
}

fn carve_subtree(grid: &mut Grid, room: &Room, rng: &mut LevelRng, stats: &mut CorridorStats) {
    for child in room.children() {
        stats.connections += 1;
        if let CarveOutcome::Truncated { at } = join_rooms(grid, child, room, rng) {
            trace!(%at, parent = %room.center(), child = %child.center(), "corridor truncated");
            stats.truncated += 1;
        }
        carve_subtree(grid, child, rng, stats);
    }
}
