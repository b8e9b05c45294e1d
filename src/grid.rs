use error_chain::bail;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use std::fmt;

use crate::cells::{Cell, CompassPrimary, CoordinateSmallVec, GridCoordinate, ALL_DIRECTIONS};
use crate::errors::*;
use crate::grid_iterators::{BatchIter, CellIter};
use crate::units::{ColumnsCount, RowsCount};


/// A rectangular maze as a row-major array of wall flag cells.
///
/// Walls are stored on both sides of every shared edge. The only way to remove an interior wall is
/// `carve`, which clears both sides together so neighbouring cells always agree about the wall
/// between them.
#[derive(Clone, PartialEq, Eq)]
pub struct WallGrid {
    cells: Vec<Cell>,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl fmt::Debug for WallGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WallGrid :: rows: {:?}, columns: {:?}, passages: {:?}",
               self.rows, self.columns, self.passages_count())
    }
}

impl WallGrid {
    /// A fully walled grid. Fails if either dimension is zero.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<WallGrid> {
        let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
        if r == 0 || c == 0 {
            bail!(ErrorKind::InvalidDimensions(r, c));
        }
        let size = r.checked_mul(c).ok_or_else(|| ErrorKind::InvalidDimensions(r, c))?;

        Ok(WallGrid {
            cells: vec![Cell::walled(); size],
            rows,
            columns,
        })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        coord.row < self.rows.0 && coord.column < self.columns.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row_major_index(self.columns))
        } else {
            None
        }
    }

    #[inline]
    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// The cell entrance at the top edge. Integer division picks the right of the two middle
    /// columns on even width grids.
    #[inline]
    pub fn entrance(&self) -> GridCoordinate {
        GridCoordinate::new(0, self.columns.0 / 2)
    }

    #[inline]
    pub fn exit(&self) -> GridCoordinate {
        GridCoordinate::new(self.rows.0 - 1, self.columns.0 / 2)
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        if self.is_valid_coordinate(coord) {
            coord.offset(direction, self.rows, self.columns)
        } else {
            None
        }
    }

    /// Cells to the North, South, East or West of a particular cell, not necessarily joined by a
    /// passage.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        ALL_DIRECTIONS.iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    /// Cells reachable in one step through an open wall.
    pub fn links(&self, coord: GridCoordinate) -> Option<CoordinateSmallVec> {
        self.cell(coord).map(|cell| {
            cell.open_directions()
                .iter()
                .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
                .collect()
        })
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        match (self.cell(coord), self.neighbour_at_direction(coord, direction)) {
            (Some(cell), Some(_)) => !cell.has_wall(direction),
            _ => false,
        }
    }

    /// Remove the wall between two adjacent cells, clearing it on both sides.
    pub fn carve(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<()> {
        if !self.is_valid_coordinate(a) {
            bail!(ErrorKind::InvalidCoordinate(a));
        }
        if !self.is_valid_coordinate(b) {
            bail!(ErrorKind::InvalidCoordinate(b));
        }
        let direction = ALL_DIRECTIONS.iter()
            .cloned()
            .find(|&dir| self.neighbour_at_direction(a, dir) == Some(b))
            .ok_or_else(|| ErrorKind::NotAdjacent(a, b))?;

        self.carve_direction(a, direction, b);
        Ok(())
    }

    /// Restore the wall between two adjacent cells on both sides.
    /// Returns true if a passage was closed.
    pub fn build_wall(&mut self, a: GridCoordinate, b: GridCoordinate) -> bool {
        let direction = ALL_DIRECTIONS.iter()
            .cloned()
            .find(|&dir| self.neighbour_at_direction(a, dir) == Some(b));

        match direction {
            Some(dir) if self.is_neighbour_linked(a, dir) => {
                self.cell_mut(a).set_wall(dir, true);
                self.cell_mut(b).set_wall(dir.opposite(), true);
                true
            }
            _ => false,
        }
    }

    /// Open the outer wall of a boundary cell, e.g. the entrance and exit of the maze.
    /// Returns false if the wall is interior or the coordinate is invalid.
    pub fn open_boundary(&mut self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        if self.is_valid_coordinate(coord) && self.neighbour_at_direction(coord, direction).is_none() {
            self.cell_mut(coord).set_wall(direction, false);
            true
        } else {
            false
        }
    }

    /// Carve both the entrance in the north wall and the exit in the south wall.
    pub fn open_entrance_and_exit(&mut self) {
        let entrance = self.entrance();
        let exit = self.exit();
        self.open_boundary(entrance, CompassPrimary::North);
        self.open_boundary(exit, CompassPrimary::South);
    }

    /// Number of open walls between two cells of the grid. Boundary openings are not counted.
    pub fn passages_count(&self) -> usize {
        self.iter()
            .map(|coord| {
                [CompassPrimary::East, CompassPrimary::South]
                    .iter()
                    .filter(|&&dir| self.is_neighbour_linked(coord, dir))
                    .count()
            })
            .sum()
    }

    /// Every standing wall flag in the grid. Interior walls count once per side.
    pub fn wall_flags_count(&self) -> usize {
        self.cells.iter().map(Cell::walls_count).sum()
    }

    /// Count of distinct wall segments: shared walls count once, boundary walls once.
    pub fn wall_segments_count(&self) -> usize {
        let RowsCount(rows) = self.rows;
        let ColumnsCount(columns) = self.columns;
        let north_and_west: usize = self.cells.iter().map(|c| c.north as usize + c.west as usize).sum();
        let east_edge: usize = (0..rows)
            .map(|r| self.cells[r * columns + columns - 1].east as usize)
            .sum();
        let south_edge: usize = (0..columns)
            .map(|c| self.cells[(rows - 1) * columns + c].south as usize)
            .sum();
        north_and_west + east_edge + south_edge
    }

    /// Openings in the outer wall, in row-major cell order.
    pub fn boundary_openings(&self) -> Vec<(GridCoordinate, CompassPrimary)> {
        self.iter()
            .flat_map(|coord| {
                ALL_DIRECTIONS.iter()
                    .cloned()
                    .filter(move |&dir| coord.offset(dir, self.rows, self.columns).is_none())
                    .map(move |dir| (coord, dir))
            })
            .filter(|&(coord, dir)| !self.cells[coord.row_major_index(self.columns)].has_wall(dir))
            .collect()
    }

    /// Checks that every pair of adjacent cells agrees about the wall between them.
    pub fn has_symmetric_walls(&self) -> bool {
        self.iter().all(|coord| {
            let cell = self.cells[coord.row_major_index(self.columns)];
            [CompassPrimary::East, CompassPrimary::South].iter().all(|&dir| {
                match self.neighbour_at_direction(coord, dir) {
                    Some(neighbour) => {
                        let other = self.cells[neighbour.row_major_index(self.columns)];
                        cell.has_wall(dir) == other.has_wall(dir.opposite())
                    }
                    None => true,
                }
            })
        })
    }

    /// The cells as graph nodes (row-major index order), one undirected edge per open interior
    /// wall.
    pub fn passage_graph(&self) -> UnGraph<(), ()> {
        let mut graph = UnGraph::with_capacity(self.size(), self.size().saturating_sub(1));
        for _ in 0..self.size() {
            let _ = graph.add_node(());
        }
        for coord in self.iter() {
            let index = coord.row_major_index(self.columns);
            for &dir in [CompassPrimary::East, CompassPrimary::South].iter() {
                if self.is_neighbour_linked(coord, dir) {
                    if let Some(neighbour) = self.neighbour_at_direction(coord, dir) {
                        let neighbour_index = neighbour.row_major_index(self.columns);
                        let _ = graph.add_edge(NodeIndex::new(index), NodeIndex::new(neighbour_index), ());
                    }
                }
            }
        }
        graph
    }

    /// A perfect maze has exactly one simple path between any two cells: the passages form a
    /// spanning tree, so the graph is connected with one edge fewer than it has cells.
    pub fn is_perfect_maze(&self) -> bool {
        let graph = self.passage_graph();
        graph.edge_count() == self.size() - 1 && connected_components(&graph) == 1
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.rows, self.columns)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::rows(self.rows, self.columns)
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::columns(self.rows, self.columns)
    }

    /// Clear one side of a wall and its mirror on the neighbouring cell.
    pub(crate) fn carve_direction(&mut self,
                                  a: GridCoordinate,
                                  direction: CompassPrimary,
                                  b: GridCoordinate) {
        self.cell_mut(a).set_wall(direction, false);
        self.cell_mut(b).set_wall(direction.opposite(), false);
    }

    #[inline]
    fn cell_mut(&mut self, coord: GridCoordinate) -> &mut Cell {
        let index = coord.row_major_index(self.columns);
        &mut self.cells[index]
    }
}
