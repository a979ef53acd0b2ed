//! Room tree: recursive spatial partition of the level into rooms
//!
//! A room is placed at random inside its region, and the space around it
//! is cut into four disjoint sub-regions (left, right, up, down), each of
//! which may host a child room. Sibling regions never overlap each other
//! or the parent room, so rooms can be stamped later without collision
//! checks.

use serde::{Deserialize, Serialize};

use crate::config::GenConfig;
use crate::error::{GenError, Result};
use crate::rng::LevelRng;

use super::Coordinate;

/// Room size limits used by the partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomLimits {
    pub min_width: usize,
    pub min_height: usize,
    pub max_width: usize,
    pub max_height: usize,
}

impl From<&GenConfig> for RoomLimits {
    fn from(config: &GenConfig) -> Self {
        Self {
            min_width: config.min_room_width,
            min_height: config.min_room_height,
            max_width: config.max_room_width,
            max_height: config.max_room_height,
        }
    }
}

/// A room in the partition tree
///
/// `(x, y)` is the top-left wall corner; the walls run to `x + width` and
/// `y + height` inclusive, so the interior is `(width - 1) x (height - 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Left wall column
    pub x: usize,
    /// Top wall row
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub left: Option<Box<Room>>,
    pub right: Option<Box<Room>>,
    pub up: Option<Box<Room>>,
    pub down: Option<Box<Room>>,
}

impl Room {
    /// Create a childless room
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            left: None,
            right: None,
            up: None,
            down: None,
        }
    }

    /// Column of the right wall
    pub fn right_border(&self) -> usize {
        self.x + self.width
    }

    /// Row of the bottom wall
    pub fn bottom_border(&self) -> usize {
        self.y + self.height
    }

    pub fn mid_row(&self) -> usize {
        self.y + self.height / 2
    }

    pub fn mid_col(&self) -> usize {
        self.x + self.width / 2
    }

    /// Centre cell; always inside the interior for rooms at least 2x2
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.mid_row(), self.mid_col())
    }

    /// Check if `coord` is strictly inside the walls
    pub fn contains_interior(&self, coord: Coordinate) -> bool {
        coord.row > self.y
            && coord.row < self.bottom_border()
            && coord.col > self.x
            && coord.col < self.right_border()
    }

    /// Check if the walled rectangles of two rooms intersect
    pub fn overlaps(&self, other: &Room) -> bool {
        !(self.right_border() < other.x
            || other.right_border() < self.x
            || self.bottom_border() < other.y
            || other.bottom_border() < self.y)
    }

    /// Present children in left, right, up, down order
    pub fn children(&self) -> impl Iterator<Item = &Room> {
        [&self.left, &self.right, &self.up, &self.down]
            .into_iter()
            .filter_map(|child| child.as_deref())
    }

    /// Every room of the subtree, parents before children
    pub fn iter(&self) -> RoomIter<'_> {
        RoomIter { stack: vec![self] }
    }

    /// Number of rooms in the subtree
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Number of levels in the subtree (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + self.children().map(Room::depth).max().unwrap_or(0)
    }
}

/// Pre-order iterator over a room subtree
pub struct RoomIter<'a> {
    stack: Vec<&'a Room>,
}

impl<'a> Iterator for RoomIter<'a> {
    type Item = &'a Room;

    fn next(&mut self) -> Option<Self::Item> {
        let room = self.stack.pop()?;
        // Reverse so `left` comes out first
        let children: Vec<&Room> = room.children().collect();
        self.stack.extend(children.into_iter().rev());
        Some(room)
    }
}

/// Partition a `config.width` x `config.height` level into a room tree
///
/// The last row and column are reserved so every wall lands on the grid.
/// Fails with [`GenError::InsufficientSpace`] if not even the root room fits.
pub fn build_room_tree(config: &GenConfig, rng: &mut LevelRng) -> Result<Room> {
    let limits = RoomLimits::from(config);
    let root = generate_rooms(
        config.width.saturating_sub(1),
        config.height.saturating_sub(1),
        0,
        0,
        &limits,
        rng,
    );
    root.map(|room| *room).ok_or(GenError::InsufficientSpace {
        width: config.width,
        height: config.height,
        min_width: limits.min_width,
        min_height: limits.min_height,
    })
}

/// Place one room in a `width` x `height` region offset by `(add_x, add_y)`
/// and recurse into the four regions around it
///
/// Returns `None` when the region is too small; that ends the branch.
pub fn generate_rooms(
    width: usize,
    height: usize,
    add_x: usize,
    add_y: usize,
    limits: &RoomLimits,
    rng: &mut LevelRng,
) -> Option<Box<Room>> {
    if width <= limits.min_width || height <= limits.min_height {
        return None;
    }

    let room_width = rng.range_inclusive(limits.min_width, limits.max_width.min(width - 1));
    let room_height = rng.range_inclusive(limits.min_height, limits.max_height.min(height - 1));
    let room_x = rng.range_inclusive(0, width - room_width);
    let room_y = rng.range_inclusive(0, height - room_height);

    let mut room = Room::new(add_x + room_x, add_y + room_y, room_width, room_height);

    // Left of the room, as tall as the room reaches
    room.left = generate_rooms(
        room_x.saturating_sub(1),
        (room_y + room_height).saturating_sub(1),
        add_x,
        add_y,
        limits,
        rng,
    );
    // Right of the room, from just below its top wall to the region bottom
    room.right = generate_rooms(
        (width - room_width - room_x).saturating_sub(1),
        (height - room_y).saturating_sub(1),
        add_x + room_x + room_width + 1,
        add_y + room_y + 1,
        limits,
        rng,
    );
    // Above the room, from just right of its left wall to the region edge
    room.up = generate_rooms(
        (width - room_x).saturating_sub(1),
        room_y.saturating_sub(1),
        add_x + room_x + 1,
        add_y,
        limits,
        rng,
    );
    // Below the room, as wide as the room reaches
    room.down = generate_rooms(
        (room_x + room_width).saturating_sub(1),
        (height - room_y - room_height).saturating_sub(1),
        add_x,
        add_y + room_y + room_height + 1,
        limits,
        rng,
    );

    Some(Box::new(room))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> RoomLimits {
        RoomLimits::from(&GenConfig::new(0, 0))
    }

    #[test]
    fn test_region_too_small() {
        let mut rng = LevelRng::new(1);
        assert!(generate_rooms(4, 10, 0, 0, &limits(), &mut rng).is_none());
        assert!(generate_rooms(10, 4, 0, 0, &limits(), &mut rng).is_none());
        assert!(generate_rooms(5, 5, 0, 0, &limits(), &mut rng).is_some());
    }

    #[test]
    fn test_insufficient_space() {
        let mut rng = LevelRng::new(1);
        let config = GenConfig::new(5, 5);
        let err = build_room_tree(&config, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GenError::InsufficientSpace {
                width: 5,
                height: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_room_sizes_and_bounds() {
        let config = GenConfig::new(60, 40);
        for seed in 0..20 {
            let mut rng = LevelRng::new(seed);
            let root = build_room_tree(&config, &mut rng).unwrap();
            for room in root.iter() {
                assert!((4..=8).contains(&room.width), "width {}", room.width);
                assert!((4..=8).contains(&room.height), "height {}", room.height);
                assert!(room.right_border() < config.width);
                assert!(room.bottom_border() < config.height);
            }
        }
    }

    #[test]
    fn test_rooms_never_overlap() {
        let config = GenConfig::new(50, 30).with_max_room(6, 6);
        for seed in 0..50 {
            let mut rng = LevelRng::new(seed);
            let root = build_room_tree(&config, &mut rng).unwrap();
            let rooms: Vec<&Room> = root.iter().collect();
            for (i, a) in rooms.iter().enumerate() {
                for b in &rooms[i + 1..] {
                    assert!(!a.overlaps(b), "seed {}: {:?} overlaps {:?}", seed, a, b);
                }
            }
        }
    }

    #[test]
    fn test_overlap_includes_walls() {
        let a = Room::new(0, 0, 4, 4);
        assert!(a.overlaps(&Room::new(4, 0, 4, 4)), "shared wall column");
        assert!(!a.overlaps(&Room::new(5, 0, 4, 4)));
        assert!(a.overlaps(&Room::new(2, 2, 4, 4)));
    }

    #[test]
    fn test_iter_order_and_count() {
        let mut root = Room::new(10, 10, 4, 4);
        root.left = Some(Box::new(Room::new(0, 10, 4, 4)));
        let mut down = Room::new(10, 20, 4, 4);
        down.right = Some(Box::new(Room::new(20, 21, 4, 4)));
        root.down = Some(Box::new(down));

        let xs: Vec<(usize, usize)> = root.iter().map(|r| (r.x, r.y)).collect();
        assert_eq!(xs, vec![(10, 10), (0, 10), (10, 20), (20, 21)]);
        assert_eq!(root.count(), 4);
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn test_interior_and_center() {
        let room = Room::new(2, 3, 4, 5);
        assert_eq!(room.center(), Coordinate::new(5, 4));
        assert!(room.contains_interior(room.center()));
        assert!(!room.contains_interior(Coordinate::new(3, 4)), "top wall");
        assert!(!room.contains_interior(Coordinate::new(5, 6)), "right wall");
    }
}
