//! Map cell types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Cell/terrain type
///
/// Tags only become more specific during generation: walls turn into
/// doors, empty space turns into corridor, and room floor is never
/// touched once stamped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellType {
    #[default]
    EmptySpace = 0,
    RoomSpace = 1,
    VerticalWall = 2,
    HorizontalWall = 3,
    Door = 4,
    Path = 5,
}

impl CellType {
    /// Check if this is a wall type
    pub const fn is_wall(&self) -> bool {
        matches!(self, CellType::VerticalWall | CellType::HorizontalWall)
    }

    /// Check if this is passable (can walk through)
    pub const fn is_passable(&self) -> bool {
        matches!(self, CellType::RoomSpace | CellType::Path | CellType::Door)
    }

    /// Get the display character for this cell type
    pub const fn symbol(&self) -> char {
        match self {
            CellType::EmptySpace => ' ',
            CellType::RoomSpace => '.',
            CellType::VerticalWall => '|',
            CellType::HorizontalWall => '-',
            CellType::Door => '%',
            CellType::Path => '#',
        }
    }

    /// Inverse of [`CellType::symbol`]
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            ' ' => Some(CellType::EmptySpace),
            '.' => Some(CellType::RoomSpace),
            '|' => Some(CellType::VerticalWall),
            '-' => Some(CellType::HorizontalWall),
            '%' => Some(CellType::Door),
            '#' => Some(CellType::Path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_symbols_round_trip() {
        for cell in CellType::iter() {
            assert_eq!(CellType::from_symbol(cell.symbol()), Some(cell));
        }
        assert_eq!(CellType::from_symbol('@'), None);
    }

    #[test]
    fn test_classification() {
        assert!(CellType::VerticalWall.is_wall());
        assert!(CellType::HorizontalWall.is_wall());
        assert!(!CellType::Door.is_wall());
        assert!(CellType::Door.is_passable());
        assert!(CellType::Path.is_passable());
        assert!(!CellType::EmptySpace.is_passable());
        assert_eq!(CellType::default(), CellType::EmptySpace);
    }
}
