//! Row-major cell grid and grid coordinates

use core::fmt;

use serde::{Deserialize, Serialize};

use super::CellType;

/// A (row, column) position in grid space
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another coordinate
    pub fn manhattan(&self, other: Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Fixed-size level map, `height` rows of `width` cells
///
/// Deserialization rejects a cell list whose length is not
/// `height * width`, so indexing by coordinate cannot go out of range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<CellType>,
}

/// Unchecked wire form of [`Grid`]
#[derive(Deserialize)]
struct GridRepr {
    height: usize,
    width: usize,
    cells: Vec<CellType>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = String;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let expected = repr
            .height
            .checked_mul(repr.width)
            .ok_or_else(|| format!("grid size {}x{} overflows", repr.width, repr.height))?;
        if repr.cells.len() != expected {
            return Err(format!(
                "grid is {}x{} but holds {} cells",
                repr.width,
                repr.height,
                repr.cells.len()
            ));
        }
        Ok(Self {
            height: repr.height,
            width: repr.width,
            cells: repr.cells,
        })
    }
}

impl Grid {
    /// Create a grid filled with empty space
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![CellType::EmptySpace; height * width],
        }
    }

    /// Build a grid from symbol rows (see [`CellType::symbol`])
    ///
    /// Short rows are padded with empty space; unknown symbols read as
    /// empty space.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let height = rows.len();
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let mut grid = Self::new(height, width);
        for (row, line) in rows.iter().enumerate() {
            for (col, c) in line.as_ref().chars().enumerate() {
                let cell = CellType::from_symbol(c).unwrap_or_default();
                grid.set(Coordinate::new(row, col), cell);
            }
        }
        grid
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    /// Cell at `coord`, or `None` outside the grid
    pub fn get(&self, coord: Coordinate) -> Option<CellType> {
        if self.in_bounds(coord) {
            Some(self.cells[coord.row * self.width + coord.col])
        } else {
            None
        }
    }

    /// Overwrite the cell at `coord`; writes outside the grid are ignored
    pub fn set(&mut self, coord: Coordinate, cell: CellType) {
        if self.in_bounds(coord) {
            self.cells[coord.row * self.width + coord.col] = cell;
        }
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellType]> {
        // chunks(0) panics, and a zero-width grid has no rows anyway
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Number of cells of the given type
    pub fn count(&self, cell: CellType) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// All coordinates holding the given type, in row-major order
    pub fn coords_of(&self, cell: CellType) -> Vec<Coordinate> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == cell)
            .map(|(i, _)| Coordinate::new(i / self.width, i % self.width))
            .collect()
    }

    /// In-bounds 4-neighbours of `coord`
    pub fn neighbors(&self, coord: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        let Coordinate { row, col } = coord;
        [
            row.checked_sub(1).map(|r| Coordinate::new(r, col)),
            Some(Coordinate::new(row + 1, col)),
            col.checked_sub(1).map(|c| Coordinate::new(row, c)),
            Some(Coordinate::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(move |c| self.in_bounds(*c))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(CellType::symbol).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
