use smallvec::{smallvec, SmallVec};

use crate::grid_traits::GridError;
use crate::units::{CellIndex, SideIndex};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum WallState {
    Open,
    Closed,
}

/// One cell of a maze grid and the state of each of its walls.
///
/// The number of sides is decided by the grid topology when the cell is created and never changes.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct MazeCell {
    walls: SmallVec<[WallState; 4]>,
}

impl MazeCell {
    pub fn new(sides_count: usize) -> MazeCell {
        MazeCell { walls: smallvec![WallState::Closed; sides_count] }
    }

    #[inline]
    pub fn sides_count(&self) -> usize {
        self.walls.len()
    }

    /// Wall states ordered by side index.
    #[inline]
    pub fn walls(&self) -> &[WallState] {
        &self.walls
    }

    pub fn wall(&self, side: SideIndex) -> Result<WallState, GridError> {
        self.walls
            .get(side.0)
            .cloned()
            .ok_or(GridError::InvalidSideIndex {
                side,
                sides_count: self.walls.len(),
            })
    }

    pub fn set_wall(&mut self, side: SideIndex, state: WallState) -> Result<(), GridError> {
        let sides_count = self.walls.len();
        let wall = self.walls
            .get_mut(side.0)
            .ok_or(GridError::InvalidSideIndex { side, sides_count })?;
        *wall = state;
        Ok(())
    }

    pub fn set_all_walls(&mut self, state: WallState) {
        for wall in self.walls.iter_mut() {
            *wall = state;
        }
    }

    #[inline]
    pub fn is_open(&self, side: SideIndex) -> bool {
        self.wall(side).map_or(false, |state| state == WallState::Open)
    }

    pub fn open_walls_count(&self) -> usize {
        self.walls.iter().filter(|&&state| state == WallState::Open).count()
    }
}

/// One side of a wall: the wall `side` of the cell `cell`.
///
/// A wall between two cells has two sides, one belonging to each cell. Ordering is by cell then side.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct WallSide {
    pub cell: CellIndex,
    pub side: SideIndex,
}

impl WallSide {
    pub fn new(cell: usize, side: usize) -> WallSide {
        WallSide {
            cell: CellIndex(cell),
            side: SideIndex(side),
        }
    }
}

/// The sides of a cell on a square grid, numbered clockwise starting from the left.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum SquareSide {
    Left = 0,
    Up = 1,
    Right = 2,
    Down = 3,
}

impl SquareSide {
    pub const COUNT: usize = 4;
    pub const ALL: [SquareSide; SquareSide::COUNT] =
        [SquareSide::Left, SquareSide::Up, SquareSide::Right, SquareSide::Down];

    pub fn from_index(side: SideIndex) -> Option<SquareSide> {
        SquareSide::ALL.get(side.0).cloned()
    }

    #[inline]
    pub fn index(self) -> SideIndex {
        SideIndex(self as usize)
    }

    /// The side of the neighbouring cell that faces back across the same wall.
    #[inline]
    pub fn opposite(self) -> SquareSide {
        SquareSide::ALL[(self as usize + 2) % SquareSide::COUNT]
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn new_cell_is_fully_walled() {
        let cell = MazeCell::new(4);
        assert_eq!(cell.sides_count(), 4);
        assert!(cell.walls().iter().all(|&w| w == WallState::Closed));
        assert_eq!(cell.open_walls_count(), 0);
    }

    #[test]
    fn set_and_read_walls() {
        let mut cell = MazeCell::new(4);
        cell.set_wall(SideIndex(2), WallState::Open).expect("valid side");
        assert_eq!(cell.wall(SideIndex(2)), Ok(WallState::Open));
        assert_eq!(cell.wall(SideIndex(1)), Ok(WallState::Closed));
        assert!(cell.is_open(SideIndex(2)));
        assert_eq!(cell.open_walls_count(), 1);

        cell.set_all_walls(WallState::Closed);
        assert_eq!(cell.open_walls_count(), 0);
    }

    #[test]
    fn invalid_side_is_an_error() {
        let mut cell = MazeCell::new(4);
        let expected = Err(GridError::InvalidSideIndex {
            side: SideIndex(4),
            sides_count: 4,
        });
        assert_eq!(cell.wall(SideIndex(4)), expected);
        assert_eq!(cell.set_wall(SideIndex(4), WallState::Open), expected.map(|_| ()));
        assert!(!cell.is_open(SideIndex(4)));
    }

    #[test]
    fn square_side_opposites() {
        assert_eq!(SquareSide::Left.opposite(), SquareSide::Right);
        assert_eq!(SquareSide::Up.opposite(), SquareSide::Down);
        assert_eq!(SquareSide::Right.opposite(), SquareSide::Left);
        assert_eq!(SquareSide::Down.opposite(), SquareSide::Up);
        for side in SquareSide::ALL.iter() {
            assert_eq!(side.opposite().opposite(), *side);
        }
    }

    #[test]
    fn square_side_indices() {
        for (i, side) in SquareSide::ALL.iter().enumerate() {
            assert_eq!(side.index(), SideIndex(i));
            assert_eq!(SquareSide::from_index(SideIndex(i)), Some(*side));
        }
        assert_eq!(SquareSide::from_index(SideIndex(4)), None);
    }

    #[test]
    fn wall_side_ordering() {
        assert!(WallSide::new(0, 3) < WallSide::new(1, 0));
        assert!(WallSide::new(1, 0) < WallSide::new(1, 2));
    }
}
