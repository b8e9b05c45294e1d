use smallvec::SmallVec;
use std::fmt;

use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;
pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

/// Position of a cell in a wall grid. Row zero is the top (north) row.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: usize,
    pub column: usize,
}

impl GridCoordinate {
    pub fn new(row: usize, column: usize) -> GridCoordinate {
        GridCoordinate { row, column }
    }

    #[inline]
    pub fn from_row_column_indices(row_index: RowIndex, col_index: ColumnIndex) -> GridCoordinate {
        let (RowIndex(row), ColumnIndex(column)) = (row_index, col_index);
        GridCoordinate::new(row, column)
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> GridCoordinate {
        let ColumnsCount(width) = columns;
        GridCoordinate::new(index / width, index % width)
    }

    #[inline]
    pub fn row_major_index(&self, columns: ColumnsCount) -> usize {
        self.row * columns.0 + self.column
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate would leave the grid.
    pub fn offset(&self,
                  dir: CompassPrimary,
                  rows: RowsCount,
                  columns: ColumnsCount)
                  -> Option<GridCoordinate> {
        let (row, column) = (self.row, self.column);
        match dir {
            CompassPrimary::North => {
                if row > 0 {
                    Some(GridCoordinate::new(row - 1, column))
                } else {
                    None
                }
            }
            CompassPrimary::South => {
                if row + 1 < rows.0 {
                    Some(GridCoordinate::new(row + 1, column))
                } else {
                    None
                }
            }
            CompassPrimary::East => {
                if column + 1 < columns.0 {
                    Some(GridCoordinate::new(row, column + 1))
                } else {
                    None
                }
            }
            CompassPrimary::West => {
                if column > 0 {
                    Some(GridCoordinate::new(row, column - 1))
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(row {}, column {})", self.row, self.column)
    }
}

impl From<(usize, usize)> for GridCoordinate {
    fn from(row_column_pair: (usize, usize)) -> GridCoordinate {
        GridCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub const ALL_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                 CompassPrimary::South,
                                                 CompassPrimary::East,
                                                 CompassPrimary::West];

impl CompassPrimary {
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// The four walls around one maze cell. `true` means the wall is standing, `false` is a passage.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Cell {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell::walled()
    }
}

impl Cell {
    /// A cell with all four walls standing.
    pub fn walled() -> Cell {
        Cell {
            north: true,
            south: true,
            east: true,
            west: true,
        }
    }

    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        match dir {
            CompassPrimary::North => self.north,
            CompassPrimary::South => self.south,
            CompassPrimary::East => self.east,
            CompassPrimary::West => self.west,
        }
    }

    #[inline]
    pub fn set_wall(&mut self, dir: CompassPrimary, present: bool) {
        match dir {
            CompassPrimary::North => self.north = present,
            CompassPrimary::South => self.south = present,
            CompassPrimary::East => self.east = present,
            CompassPrimary::West => self.west = present,
        }
    }

    pub fn walls_count(&self) -> usize {
        ALL_DIRECTIONS.iter().filter(|&&dir| self.has_wall(dir)).count()
    }

    /// Directions with no wall.
    pub fn open_directions(&self) -> DirectionSmallVec {
        ALL_DIRECTIONS.iter().cloned().filter(|&dir| !self.has_wall(dir)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_stay_inside_the_grid() {
        let rows = RowsCount(3);
        let columns = ColumnsCount(2);
        let gc = |r, c| GridCoordinate::new(r, c);

        assert_eq!(gc(0, 0).offset(CompassPrimary::North, rows, columns), None);
        assert_eq!(gc(0, 0).offset(CompassPrimary::West, rows, columns), None);
        assert_eq!(gc(0, 0).offset(CompassPrimary::South, rows, columns), Some(gc(1, 0)));
        assert_eq!(gc(0, 0).offset(CompassPrimary::East, rows, columns), Some(gc(0, 1)));
        assert_eq!(gc(2, 1).offset(CompassPrimary::South, rows, columns), None);
        assert_eq!(gc(2, 1).offset(CompassPrimary::East, rows, columns), None);
    }

    #[test]
    fn row_major_round_trip() {
        let columns = ColumnsCount(7);
        for index in 0..35 {
            let coord = GridCoordinate::from_row_major_index(index, columns);
            assert_eq!(coord.row_major_index(columns), index);
        }
        assert_eq!(GridCoordinate::from_row_major_index(9, columns), GridCoordinate::new(1, 2));
    }

    #[test]
    fn opposite_directions() {
        for dir in ALL_DIRECTIONS.iter() {
            assert_eq!(dir.opposite().opposite(), *dir);
            assert_ne!(dir.opposite(), *dir);
        }
    }

    #[test]
    fn cell_walls() {
        let mut cell = Cell::walled();
        assert_eq!(cell.walls_count(), 4);
        assert!(cell.open_directions().is_empty());

        cell.set_wall(CompassPrimary::East, false);
        assert!(!cell.has_wall(CompassPrimary::East));
        assert!(!cell.east);
        assert_eq!(cell.walls_count(), 3);
        assert_eq!(&*cell.open_directions(), &[CompassPrimary::East]);
    }
}
