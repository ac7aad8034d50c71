use std::error::Error;
use std::fmt;

use crate::cells::{MazeCell, WallSide, WallState};
use crate::units::{CellIndex, SideIndex};

/// Contract violations when addressing cells or walls of a grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    InvalidCellIndex { index: CellIndex, cells_count: usize },
    InvalidSideIndex { side: SideIndex, sides_count: usize },
    CellWithoutSides(CellIndex),
    DimensionsTooLarge { width: usize, height: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridError::InvalidCellIndex { index, cells_count } => {
                write!(f, "cell index {} is outside the grid of {} cells", index.0, cells_count)
            }
            GridError::InvalidSideIndex { side, sides_count } => {
                write!(f, "side index {} is invalid for a cell with {} sides", side.0, sides_count)
            }
            GridError::CellWithoutSides(index) => write!(f, "cell {} has no sides", index.0),
            GridError::DimensionsTooLarge { width, height } => {
                write!(f, "a {} by {} grid is too large to address", width, height)
            }
        }
    }
}

impl Error for GridError {}

/// A cell and wall topology that maze generators can work over.
///
/// Implementors own the cell storage and know how cells sit next to each other. Nothing here knows about how a
/// maze is carved or drawn.
pub trait MazeGrid {
    fn cells(&self) -> &[MazeCell];
    fn cells_mut(&mut self) -> &mut [MazeCell];

    /// The side of the neighbouring cell across the wall at `from`, or `None` when `from` is on the grid boundary.
    ///
    /// Must be symmetric: `navigate(navigate(x)) == x` whenever a neighbour exists.
    fn navigate(&self, from: WallSide) -> Result<Option<WallSide>, GridError>;

    #[inline]
    fn cells_count(&self) -> usize {
        self.cells().len()
    }

    fn cell(&self, index: CellIndex) -> Result<&MazeCell, GridError> {
        let cells = self.cells();
        let cells_count = cells.len();
        cells.get(index.0).ok_or(GridError::InvalidCellIndex { index, cells_count })
    }

    fn cell_mut(&mut self, index: CellIndex) -> Result<&mut MazeCell, GridError> {
        let cells = self.cells_mut();
        let cells_count = cells.len();
        cells.get_mut(index.0).ok_or(GridError::InvalidCellIndex { index, cells_count })
    }

    fn wall(&self, at: WallSide) -> Result<WallState, GridError> {
        self.cell(at.cell)?.wall(at.side)
    }

    /// Set one side of a wall. The side belonging to the neighbouring cell is left alone.
    fn set_wall(&mut self, at: WallSide, state: WallState) -> Result<(), GridError> {
        self.cell_mut(at.cell)?.set_wall(at.side, state)
    }

    /// Set both sides of the wall at `at`, returning the neighbour's side if there is one.
    fn set_passage(&mut self, at: WallSide, state: WallState) -> Result<Option<WallSide>, GridError> {
        let neighbour = self.navigate(at)?;
        self.set_wall(at, state)?;
        if let Some(other_side) = neighbour {
            self.set_wall(other_side, state)?;
        }
        Ok(neighbour)
    }

    fn set_all_walls(&mut self, state: WallState) {
        for cell in self.cells_mut() {
            cell.set_all_walls(state);
        }
    }
}
