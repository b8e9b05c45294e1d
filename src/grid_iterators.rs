use std::fmt;

use crate::cells::GridCoordinate;
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};

/// Visits every cell coordinate of a rectangular grid in row-major order.
#[derive(Clone)]
pub struct CellIter {
    columns: ColumnsCount,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> CellIter {
        CellIter {
            columns,
            current_cell_number: 0,
            cells_count: rows.0 * columns.0,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::from_row_major_index(self.current_cell_number, self.columns);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

#[derive(Debug, Copy, Clone)]
enum BatchIterType {
    Row,
    Column,
}

/// Yields the grid one whole row, or one whole column, at a time.
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl BatchIter {
    pub fn rows(rows: RowsCount, columns: ColumnsCount) -> BatchIter {
        BatchIter {
            iter_type: BatchIterType::Row,
            current_index: 0,
            rows,
            columns,
        }
    }

    pub fn columns(rows: RowsCount, columns: ColumnsCount) -> BatchIter {
        BatchIter {
            iter_type: BatchIterType::Column,
            current_index: 0,
            rows,
            columns,
        }
    }

    fn batches_count(&self) -> usize {
        match self.iter_type {
            BatchIterType::Row => self.rows.0,
            BatchIterType::Column => self.columns.0,
        }
    }
}

impl ExactSizeIterator for BatchIter {} // default impl using size_hint()
impl Iterator for BatchIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {

        if self.current_index >= self.batches_count() {
            return None;
        }

        let index = self.current_index;
        let coords = match self.iter_type {
            BatchIterType::Row => {
                (0..self.columns.0)
                    .map(|i| GridCoordinate::from_row_column_indices(RowIndex(index), ColumnIndex(i)))
                    .collect()
            }
            BatchIterType::Column => {
                (0..self.rows.0)
                    .map(|i| GridCoordinate::from_row_column_indices(RowIndex(i), ColumnIndex(index)))
                    .collect()
            }
        };
        self.current_index += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.batches_count() - self.current_index;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
