use bit_set::BitSet;
use error_chain::bail;
use std::fmt;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::errors::*;
use crate::grid::WallGrid;
use crate::units::{ColumnsCount, RowsCount};

/// A maze as squares that are either passage or wall, `2 * columns + 1` wide and `2 * rows + 1` high.
///
/// Cell (r, c) of a wall grid is the square at x = 2c + 1, y = 2r + 1. The squares between two cells
/// stand for the wall between them, and the border squares for the outer walls, so entrance and
/// exit openings are passage squares on the border. Grid corners are always wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    passages: BitSet,
    width: usize,
    height: usize,
}

impl OccupancyGrid {
    pub fn from_wall_grid(grid: &WallGrid) -> OccupancyGrid {
        let RowsCount(rows) = grid.rows();
        let ColumnsCount(columns) = grid.columns();
        let mut occupancy = OccupancyGrid {
            passages: BitSet::with_capacity((2 * rows + 1) * (2 * columns + 1)),
            width: 2 * columns + 1,
            height: 2 * rows + 1,
        };

        for coord in grid.iter() {
            let (x, y) = OccupancyGrid::cell_square(coord);
            occupancy.set_passage(x, y);

            if let Some(cell) = grid.cell(coord) {
                for dir in cell.open_directions() {
                    let (wx, wy) = OccupancyGrid::wall_square(coord, dir);
                    occupancy.set_passage(wx, wy);
                }
            }
        }
        occupancy
    }

    /// Rebuild the wall grid. Fails unless both dimensions are odd and at least 3.
    pub fn to_wall_grid(&self) -> Result<WallGrid> {
        if self.width < 3 || self.height < 3 || self.width % 2 == 0 || self.height % 2 == 0 {
            bail!(ErrorKind::InvalidDimensions(self.height / 2, self.width / 2));
        }
        let mut grid = WallGrid::new(RowsCount(self.height / 2), ColumnsCount(self.width / 2))?;

        for coord in grid.iter() {
            for &dir in [CompassPrimary::North, CompassPrimary::West].iter() {
                let (wx, wy) = OccupancyGrid::wall_square(coord, dir);
                if !self.is_passage(wx, wy) {
                    continue;
                }
                match grid.neighbour_at_direction(coord, dir) {
                    Some(neighbour) => grid.carve(coord, neighbour)?,
                    None => {
                        let _ = grid.open_boundary(coord, dir);
                    }
                }
            }
        }

        let RowsCount(rows) = grid.rows();
        let ColumnsCount(columns) = grid.columns();
        for row in 0..rows {
            let coord = GridCoordinate::new(row, columns - 1);
            let (wx, wy) = OccupancyGrid::wall_square(coord, CompassPrimary::East);
            if self.is_passage(wx, wy) {
                let _ = grid.open_boundary(coord, CompassPrimary::East);
            }
        }
        for column in 0..columns {
            let coord = GridCoordinate::new(rows - 1, column);
            let (wx, wy) = OccupancyGrid::wall_square(coord, CompassPrimary::South);
            if self.is_passage(wx, wy) {
                let _ = grid.open_boundary(coord, CompassPrimary::South);
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Squares outside of the grid count as wall.
    pub fn is_passage(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.passages.contains(y * self.width + x)
    }

    /// Number of passage squares.
    pub fn passages_count(&self) -> usize {
        self.passages.len()
    }

    /// The square of a wall grid cell.
    #[inline]
    pub fn cell_square(coord: GridCoordinate) -> (usize, usize) {
        (2 * coord.column + 1, 2 * coord.row + 1)
    }

    /// The square of the wall on one side of a wall grid cell.
    pub fn wall_square(coord: GridCoordinate, direction: CompassPrimary) -> (usize, usize) {
        let (x, y) = OccupancyGrid::cell_square(coord);
        match direction {
            CompassPrimary::North => (x, y - 1),
            CompassPrimary::South => (x, y + 1),
            CompassPrimary::East => (x + 1, y),
            CompassPrimary::West => (x - 1, y),
        }
    }

    fn set_passage(&mut self, x: usize, y: usize) {
        let _ = self.passages.insert(y * self.width + x);
    }

    fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }
}

/// Two characters per square: `##` wall, blank passage. Openings in the top border are marked
/// `S ` and in the bottom border `E `; openings in the side borders are left blank.
impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height {
            let mut line = String::with_capacity(self.width * 2);
            for x in 0..self.width {
                let square = if !self.is_passage(x, y) {
                    "##"
                } else if self.is_border(x, y) && y == 0 {
                    "S "
                } else if self.is_border(x, y) && y == self.height - 1 {
                    "E "
                } else {
                    "  "
                };
                line.push_str(square);
            }
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
