use std::fmt;

use crate::cells::{Cartesian2DCoordinate, MazeCell, SquareSide, WallSide};
use crate::grid_traits::{GridError, MazeGrid};
use crate::units::{CellIndex, ColumnLength, RowLength};

const MAX_SIDE_LENGTH: usize = u32::MAX as usize;

/// A rectangular `width * height` grid of four sided cells, stored in row-major order.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct SquareGrid {
    cells: Vec<MazeCell>,
    row_width: RowLength,
    column_height: ColumnLength,
}

impl SquareGrid {
    /// A grid with every wall closed. A zero width or height gives a grid with no cells.
    ///
    /// Each of width and height is limited to `u32::MAX` so that every cell has a `Cartesian2DCoordinate`, and the
    /// cell count must fit in a `usize`.
    pub fn new(row_width: RowLength, column_height: ColumnLength) -> Result<SquareGrid, GridError> {
        let too_large = GridError::DimensionsTooLarge {
            width: row_width.0,
            height: column_height.0,
        };
        if row_width.0 > MAX_SIDE_LENGTH || column_height.0 > MAX_SIDE_LENGTH {
            return Err(too_large);
        }
        let cells_count = row_width.0.checked_mul(column_height.0).ok_or(too_large)?;

        Ok(SquareGrid {
            cells: vec![MazeCell::new(SquareSide::COUNT); cells_count],
            row_width,
            column_height,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.row_width.0
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.column_height.0
    }

    /// Convert a one dimensional cell index into its column (x) and row (y).
    pub fn coordinate(&self, index: CellIndex) -> Result<Cartesian2DCoordinate, GridError> {
        if index.0 < self.cells.len() {
            // Lossless, width and height are bounded by u32::MAX in `new`
            let width = self.width();
            Ok(Cartesian2DCoordinate::new((index.0 % width) as u32, (index.0 / width) as u32))
        } else {
            Err(GridError::InvalidCellIndex {
                index,
                cells_count: self.cells.len(),
            })
        }
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...cells_count.
    /// Returns None if the grid coordinate is outside the grid.
    pub fn index_at(&self, coord: Cartesian2DCoordinate) -> Option<CellIndex> {
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x < self.width() && y < self.height() {
            Some(CellIndex(y * self.width() + x))
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = CellIndex> {
        (0..self.cells.len()).map(CellIndex)
    }

    pub fn iter_row(&self) -> RowIter {
        RowIter {
            current_row: 0,
            row_width: self.row_width,
            column_height: self.column_height,
        }
    }

    #[inline]
    fn is_side_open(&self, index: CellIndex, side: SquareSide) -> bool {
        self.cells[index.0].is_open(side.index())
    }
}

impl MazeGrid for SquareGrid {
    #[inline]
    fn cells(&self) -> &[MazeCell] {
        &self.cells
    }

    #[inline]
    fn cells_mut(&mut self) -> &mut [MazeCell] {
        &mut self.cells
    }

    fn navigate(&self, from: WallSide) -> Result<Option<WallSide>, GridError> {
        let coord = self.coordinate(from.cell)?;
        let side = SquareSide::from_index(from.side).ok_or(GridError::InvalidSideIndex {
            side: from.side,
            sides_count: SquareSide::COUNT,
        })?;

        let (x, y) = (coord.x as usize, coord.y as usize);
        let neighbour = match side {
            SquareSide::Left if x > 0 => Some((x - 1, y)),
            SquareSide::Up if y > 0 => Some((x, y - 1)),
            SquareSide::Right if x + 1 < self.width() => Some((x + 1, y)),
            SquareSide::Down if y + 1 < self.height() => Some((x, y + 1)),
            _ => None,
        };

        Ok(neighbour.map(|(nx, ny)| {
            WallSide {
                cell: CellIndex(ny * self.width() + nx),
                side: side.opposite().index(),
            }
        }))
    }
}

/// Text diagram of the maze: `*---` is a closed top wall, `|` a closed left wall, and each cell shows its index.
impl fmt::Display for SquareGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const WALL_TOP: &str = "*---";
        const OPEN_TOP: &str = "*   ";
        const CORNER: &str = "*";

        for row in self.iter_row() {
            for &index in &row {
                let top = if self.is_side_open(index, SquareSide::Up) {
                    OPEN_TOP
                } else {
                    WALL_TOP
                };
                f.write_str(top)?;
            }
            writeln!(f, "{}", CORNER)?;

            for &index in &row {
                let left = if self.is_side_open(index, SquareSide::Left) {
                    ' '
                } else {
                    '|'
                };
                write!(f, "{}{:2} ", left, index.0)?;
            }
            // The east boundary is never open
            writeln!(f, "|")?;
        }

        for _ in 0..self.width() {
            f.write_str(WALL_TOP)?;
        }
        writeln!(f, "{}", CORNER)
    }
}

/// Iterates the cell indices of a `SquareGrid` one row at a time, top row first.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_row: usize,
    row_width: RowLength,
    column_height: ColumnLength,
}

impl Iterator for RowIter {
    type Item = Vec<CellIndex>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.column_height.0 {
            let row_start = self.current_row * self.row_width.0;
            let row = (row_start..row_start + self.row_width.0).map(CellIndex).collect();
            self.current_row += 1;
            Some(row)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.column_height.0 - self.current_row;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for RowIter {} // default impl using size_hint()
