//! Stamp rooms onto the grid

use super::{CellType, Coordinate, Grid, Room};

/// Stamp one room: walls on the perimeter, floor strictly inside
///
/// Corners end up as horizontal wall.
pub fn draw_room(grid: &mut Grid, room: &Room) {
    for j in 0..=room.height {
        grid.set(Coordinate::new(room.y + j, room.x), CellType::VerticalWall);
        grid.set(
            Coordinate::new(room.y + j, room.right_border()),
            CellType::VerticalWall,
        );
    }
    for i in 0..=room.width {
        grid.set(Coordinate::new(room.y, room.x + i), CellType::HorizontalWall);
        grid.set(
            Coordinate::new(room.bottom_border(), room.x + i),
            CellType::HorizontalWall,
        );
    }
    for row in room.y + 1..room.bottom_border() {
        for col in room.x + 1..room.right_border() {
            grid.set(Coordinate::new(row, col), CellType::RoomSpace);
        }
    }
}

/// Stamp a room and, depth first, all of its descendants
///
/// Must run over the whole tree before any corridor is carved.
pub fn draw_room_tree(grid: &mut Grid, root: &Room) {
    draw_room(grid, root);
    for child in root.children() {
        draw_room_tree(grid, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_single_room() {
        let mut grid = Grid::new(6, 7);
        draw_room(&mut grid, &Room::new(1, 1, 4, 3));
        assert_eq!(
            grid.to_string(),
            concat!(
                "       \n",
                " ----- \n",
                " |...| \n",
                " |...| \n",
                " ----- \n",
                "       \n",
            )
        );
    }

    #[test]
    fn test_interior_cell_count() {
        let mut grid = Grid::new(20, 20);
        let room = Room::new(2, 3, 6, 5);
        draw_room(&mut grid, &room);
        assert_eq!(grid.count(CellType::RoomSpace), 5 * 4);
        // Perimeter of a 7x6 cell rectangle
        let walls = grid.count(CellType::VerticalWall) + grid.count(CellType::HorizontalWall);
        assert_eq!(walls, 2 * 7 + 2 * 6 - 4);
    }

    #[test]
    fn test_draw_tree_stamps_children() {
        let mut root = Room::new(0, 0, 4, 4);
        root.right = Some(Box::new(Room::new(6, 1, 4, 4)));
        let mut grid = Grid::new(8, 12);
        draw_room_tree(&mut grid, &root);
        assert_eq!(grid.count(CellType::RoomSpace), 18);
        assert_eq!(grid.get(Coordinate::new(2, 7)), Some(CellType::RoomSpace));
        assert_eq!(grid.get(Coordinate::new(3, 10)), Some(CellType::VerticalWall));
    }
}
