use std::fmt;

use crate::cells::GridCoordinate;
use crate::grid::WallGrid;
use crate::units::{ColumnsCount, RowsCount};
use crate::utils::FnvHashSet;

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";
const DEFAULT_CELL_BODY: &str = "   ";

/// Is there a horizontal wall above row `row` (`row == rows` is the bottom edge) in `column`?
fn horizontal_wall(grid: &WallGrid, row: usize, column: usize) -> bool {
    let RowsCount(rows) = grid.rows();
    let cell = |r| grid.cell(GridCoordinate::new(r, column));
    if row < rows {
        cell(row).map_or(false, |c| c.north)
    } else {
        cell(rows - 1).map_or(false, |c| c.south)
    }
}

/// Is there a vertical wall left of column `column` (`column == columns` is the right edge) in `row`?
fn vertical_wall(grid: &WallGrid, row: usize, column: usize) -> bool {
    let ColumnsCount(columns) = grid.columns();
    let cell = |c| grid.cell(GridCoordinate::new(row, c));
    if column < columns {
        cell(column).map_or(false, |c| c.west)
    } else {
        cell(columns - 1).map_or(false, |c| c.east)
    }
}

/// The glyph where the grid lines meet at the top left corner of cell (`row`, `column`).
fn corner(grid: &WallGrid, row: usize, column: usize) -> &'static str {
    let RowsCount(rows) = grid.rows();
    let ColumnsCount(columns) = grid.columns();

    let show_left_section = column > 0 && horizontal_wall(grid, row, column - 1);
    let show_right_section = column < columns && horizontal_wall(grid, row, column);
    let show_up_section = row > 0 && vertical_wall(grid, row - 1, column);
    let show_down_section = row < rows && vertical_wall(grid, row, column);

    match (show_left_section, show_right_section, show_up_section, show_down_section) {
        (true, true, true, true) => WALL_LRUD,
        (true, true, true, false) => WALL_LRU,
        (true, true, false, true) => WALL_LRD,
        (true, false, true, true) => WALL_LUD,
        (false, true, true, true) => WALL_RUD,
        (true, true, false, false) => WALL_LR,
        (false, false, true, true) => WALL_UD,
        (false, true, true, false) => WALL_RU,
        (true, false, false, true) => WALL_LD,
        (true, false, true, false) => WALL_LU,
        (false, true, false, true) => WALL_RD,
        (true, false, false, false) => WALL_L,
        (false, true, false, false) => WALL_R,
        (false, false, true, false) => WALL_U,
        (false, false, false, true) => WALL_D,
        (false, false, false, false) => " ",
    }
}

/// Box drawing text for a maze, three characters per cell body from `render_cell_body`.
fn render_text<F>(grid: &WallGrid, render_cell_body: F) -> String
    where F: Fn(GridCoordinate) -> String
{
    let RowsCount(rows) = grid.rows();
    let ColumnsCount(columns) = grid.columns();
    let mut output = String::with_capacity((rows * 2 + 1) * (columns * 4 + 2) * 3);

    for row in 0..(rows + 1) {
        // The grid line above the row, or the bottom edge.
        for column in 0..columns {
            output.push_str(corner(grid, row, column));
            output.push_str(if horizontal_wall(grid, row, column) {
                WALL_LR_3
            } else {
                DEFAULT_CELL_BODY
            });
        }
        output.push_str(corner(grid, row, columns));
        output.push('\n');

        if row == rows {
            break;
        }
        for column in 0..(columns + 1) {
            output.push_str(if vertical_wall(grid, row, column) { WALL_UD } else { " " });
            if column < columns {
                output.push_str(&render_cell_body(GridCoordinate::new(row, column)));
            }
        }
        output.push('\n');
    }
    output
}

impl fmt::Display for WallGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&render_text(self, |_| String::from(DEFAULT_CELL_BODY)))
    }
}

/// Text view of a maze with the cells of a path marked, and the start and end of the path labelled.
#[derive(Debug)]
pub struct PathDisplay<'a> {
    grid: &'a WallGrid,
    on_path_coordinates: FnvHashSet<GridCoordinate>,
    start: Option<GridCoordinate>,
    end: Option<GridCoordinate>,
}

impl<'a> PathDisplay<'a> {
    pub fn new(grid: &'a WallGrid, path: &[GridCoordinate]) -> Self {
        PathDisplay {
            grid,
            on_path_coordinates: path.iter().cloned().collect(),
            start: path.first().cloned(),
            end: path.last().cloned(),
        }
    }

    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if Some(coord) == self.start {
            String::from(" S ")
        } else if Some(coord) == self.end {
            String::from(" E ")
        } else if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from(DEFAULT_CELL_BODY)
        }
    }
}

impl<'a> fmt::Display for PathDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&render_text(self.grid, |coord| self.render_cell_body(coord)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, columns: usize) -> WallGrid {
        WallGrid::new(RowsCount(rows), ColumnsCount(columns)).expect("valid grid dimensions")
    }

    #[test]
    fn closed_cells() {
        let g = grid(2, 2);
        let expected = ["┌───┬───┐",
                        "│   │   │",
                        "├───┼───┤",
                        "│   │   │",
                        "└───┴───┘",
                        ""]
            .join("\n");
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn passages_and_openings() {
        let mut g = grid(2, 3);
        let gc = |r, c| GridCoordinate::new(r, c);
        g.carve(gc(0, 0), gc(0, 1)).unwrap();
        g.carve(gc(0, 1), gc(0, 2)).unwrap();
        g.carve(gc(0, 1), gc(1, 1)).unwrap();
        g.carve(gc(1, 0), gc(1, 1)).unwrap();
        g.carve(gc(1, 1), gc(1, 2)).unwrap();
        g.open_entrance_and_exit();
        assert!(g.is_perfect_maze());

        let expected = ["┌───╴   ╶───┐",
                        "│           │",
                        "├───╴   ╶───┤",
                        "│           │",
                        "└───╴   ╶───┘",
                        ""]
            .join("\n");
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn path_markers() {
        let mut g = grid(1, 3);
        let gc = |r, c| GridCoordinate::new(r, c);
        g.carve(gc(0, 0), gc(0, 1)).unwrap();
        g.carve(gc(0, 1), gc(0, 2)).unwrap();

        let path = [gc(0, 0), gc(0, 1), gc(0, 2)];
        let text = PathDisplay::new(&g, &path).to_string();
        assert_eq!(text.lines().nth(1), Some("│ S   .   E │"));
    }
}
