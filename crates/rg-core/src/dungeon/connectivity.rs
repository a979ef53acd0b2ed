//! Reachability check over a finished grid
//!
//! Corridor walks may stop early, so a generated level can contain rooms
//! the player cannot walk to. This module flood-fills passable cells and
//! groups rooms by the region their interiors fall in.

use std::collections::VecDeque;

use hashbrown::HashSet;

use super::{Coordinate, Grid, Room};

/// Label every passable cell with the id of its 4-connected region
///
/// Impassable cells get `None`. Labels are indexed row-major.
pub fn label_regions(grid: &Grid) -> Vec<Option<usize>> {
    let width = grid.width();
    let mut labels = vec![None; grid.height() * width];
    let mut next = 0;

    for row in 0..grid.height() {
        for col in 0..width {
            let start = Coordinate::new(row, col);
            if labels[row * width + col].is_some()
                || !grid.get(start).is_some_and(|c| c.is_passable())
            {
                continue;
            }

            labels[row * width + col] = Some(next);
            let mut queue = VecDeque::from([start]);
            while let Some(cur) = queue.pop_front() {
                for n in grid.neighbors(cur) {
                    let idx = n.row * width + n.col;
                    if labels[idx].is_none() && grid.get(n).is_some_and(|c| c.is_passable()) {
                        labels[idx] = Some(next);
                        queue.push_back(n);
                    }
                }
            }
            next += 1;
        }
    }
    labels
}

/// Check if `to` can be walked to from `from`
pub fn is_reachable(grid: &Grid, from: Coordinate, to: Coordinate) -> bool {
    if !grid.in_bounds(from) || !grid.in_bounds(to) {
        return false;
    }
    let labels = label_regions(grid);
    let label = |c: Coordinate| labels[c.row * grid.width() + c.col];
    label(from).is_some() && label(from) == label(to)
}

/// Which rooms can be walked to from the root room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityReport {
    pub total_rooms: usize,
    pub reachable_rooms: usize,
    /// Pre-order indices (root = 0) of rooms cut off from the root
    pub unreachable: Vec<usize>,
    /// Number of separate groups the rooms fall into
    pub room_groups: usize,
}

impl ConnectivityReport {
    /// Analyze a stamped and carved grid against its room tree
    pub fn analyze(grid: &Grid, root: &Room) -> Self {
        let labels = label_regions(grid);
        let room_labels: Vec<Option<usize>> = root
            .iter()
            .map(|room| {
                let c = room.center();
                grid.in_bounds(c)
                    .then(|| labels[c.row * grid.width() + c.col])
                    .flatten()
            })
            .collect();

        // A room whose centre is not passable forms a group of its own
        let root_label = room_labels.first().copied().flatten();
        let unreachable: Vec<usize> = room_labels
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, label)| label.is_none() || **label != root_label)
            .map(|(i, _)| i)
            .collect();

        let labelled: HashSet<usize> = room_labels.iter().flatten().copied().collect();
        let isolated = room_labels.iter().filter(|l| l.is_none()).count();

        Self {
            total_rooms: room_labels.len(),
            reachable_rooms: room_labels.len() - unreachable.len(),
            unreachable,
            room_groups: labelled.len() + isolated,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.unreachable.is_empty()
    }
}
