use bit_set::BitSet;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use std::fmt;
use std::str::FromStr;

use crate::cells::{CompassPrimary, GridCoordinate, ALL_DIRECTIONS};
use crate::errors::*;
use crate::grid::WallGrid;
use crate::union_find::DisjointSets;
use crate::units::{ColumnsCount, RowsCount};

/// The interchangeable perfect maze generation algorithms.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Algorithm {
    /// Depth first search with an explicit stack. Long winding corridors, few branches.
    RecursiveBacktracker,
    /// Randomized Prim's. Grows outwards from the origin with many short dead ends.
    Prims,
    /// Randomized Kruskal's. Merges regions in random wall order for a uniform texture.
    Kruskals,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::RecursiveBacktracker,
                                     Algorithm::Prims,
                                     Algorithm::Kruskals];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::RecursiveBacktracker => "dfs",
            Algorithm::Prims => "prims",
            Algorithm::Kruskals => "kruskals",
        }
    }

    fn valid_names() -> String {
        Algorithm::ALL.iter().map(|a| a.name()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Algorithm> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" | "backtracker" | "recursive-backtracker" => Ok(Algorithm::RecursiveBacktracker),
            "prims" | "prim" => Ok(Algorithm::Prims),
            "kruskals" | "kruskal" => Ok(Algorithm::Kruskals),
            _ => Err(ErrorKind::UnknownAlgorithm(s.to_string(), Algorithm::valid_names()).into()),
        }
    }
}

/// Generate a perfect maze of `rows` x `columns` cells with an entrance in the middle of the top
/// edge and an exit in the middle of the bottom edge.
///
/// Fails fast on a zero dimension.
pub fn generate_maze<R>(rows: RowsCount,
                        columns: ColumnsCount,
                        algorithm: Algorithm,
                        rng: &mut R)
                        -> Result<WallGrid>
    where R: Rng + ?Sized
{
    let mut grid = WallGrid::new(rows, columns)?;

    match algorithm {
        Algorithm::RecursiveBacktracker => recursive_backtracker(&mut grid, rng),
        Algorithm::Prims => prims(&mut grid, rng),
        Algorithm::Kruskals => kruskals(&mut grid, rng),
    }
    grid.open_entrance_and_exit();

    debug!("generated {} maze {}x{} with {} passages",
           algorithm, rows.0, columns.0, grid.passages_count());
    Ok(grid)
}

/// As `generate_maze` with a private random number generator, seeded from `seed` when given.
/// The same seed always produces the same maze.
pub fn generate_maze_seeded(rows: RowsCount,
                            columns: ColumnsCount,
                            algorithm: Algorithm,
                            seed: Option<u64>)
                            -> Result<WallGrid> {
    let mut rng = seeded_rng(seed);
    generate_maze(rows, columns, algorithm, &mut rng)
}

/// A fast non-cryptographic generator. Without a seed a random one is chosen and logged so the
/// maze can be reproduced.
pub fn seeded_rng(seed: Option<u64>) -> XorShiftRng {
    let seed = seed.unwrap_or_else(|| {
        let s = rand::random();
        debug!("using random seed {}", s);
        s
    });
    XorShiftRng::seed_from_u64(seed)
}

/// Apply the recursive backtracker (randomized depth first search) algorithm to a grid.
///
/// Starting at the top left cell, keep walking to a random unvisited neighbour, carving as we go.
/// When there is no unvisited neighbour pop back along the stack until there is one. Every cell is
/// visited once, and each visit after the first carves exactly one passage.
pub fn recursive_backtracker<R: Rng + ?Sized>(grid: &mut WallGrid, rng: &mut R) {
    let columns = grid.columns();
    let mut visited = BitSet::with_capacity(grid.size());
    let start = GridCoordinate::new(0, 0);
    visited.insert(start.row_major_index(columns));

    let mut stack = vec![start];
    while let Some(&current) = stack.last() {

        let unvisited_neighbours = ALL_DIRECTIONS.iter()
            .filter_map(|&dir| grid.neighbour_at_direction(current, dir).map(|c| (dir, c)))
            .filter(|&(_, coord)| !visited.contains(coord.row_major_index(columns)))
            .collect::<Vec<(CompassPrimary, GridCoordinate)>>();

        if let Some(&(dir, next)) = unvisited_neighbours.choose(rng) {
            grid.carve_direction(current, dir, next);
            visited.insert(next.row_major_index(columns));
            stack.push(next);
        } else {
            let _ = stack.pop();
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct FrontierWall {
    from: GridCoordinate,
    direction: CompassPrimary,
    to: GridCoordinate,
}

/// Apply the randomized Prim's algorithm to a grid.
///
/// The frontier holds the walls between the region carved so far and its unvisited neighbours.
/// A uniformly random frontier wall is removed each step; if the cell beyond is still unvisited the
/// wall becomes a passage and that cell's own unvisited neighbours join the frontier. The same
/// cell may be listed by several frontier walls, only the first one picked gets carved.
pub fn prims<R: Rng + ?Sized>(grid: &mut WallGrid, rng: &mut R) {
    let columns = grid.columns();
    let mut visited = BitSet::with_capacity(grid.size());
    let mut frontier: Vec<FrontierWall> = Vec::new();

    let add_frontier = |frontier: &mut Vec<FrontierWall>,
                        visited: &BitSet,
                        grid: &WallGrid,
                        from: GridCoordinate| {
        for &dir in ALL_DIRECTIONS.iter() {
            if let Some(to) = grid.neighbour_at_direction(from, dir) {
                if !visited.contains(to.row_major_index(columns)) {
                    frontier.push(FrontierWall { from, direction: dir, to });
                }
            }
        }
    };

    let start = GridCoordinate::new(0, 0);
    visited.insert(start.row_major_index(columns));
    add_frontier(&mut frontier, &visited, grid, start);

    while !frontier.is_empty() {
        let pick = rng.gen_range(0..frontier.len());
        let wall = frontier.swap_remove(pick);

        if visited.insert(wall.to.row_major_index(columns)) {
            grid.carve_direction(wall.from, wall.direction, wall.to);
            add_frontier(&mut frontier, &visited, grid, wall.to);
        }
    }
    trace!("prims finished, {} cells visited", visited.len());
}

/// Apply the randomized Kruskal's algorithm to a grid.
///
/// Every interior wall is listed once (the east and south wall of each cell that has such a
/// neighbour) and the list is shuffled. Walking the list, a wall is carved only when the cells
/// either side are not yet connected, tracked with disjoint sets over the cell indices.
pub fn kruskals<R: Rng + ?Sized>(grid: &mut WallGrid, rng: &mut R) {
    let columns = grid.columns();

    let mut walls = grid.iter()
        .flat_map(|coord| {
            [CompassPrimary::East, CompassPrimary::South]
                .iter()
                .filter_map(|&dir| grid.neighbour_at_direction(coord, dir).map(|to| (coord, dir, to)))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<(GridCoordinate, CompassPrimary, GridCoordinate)>>();
    walls.shuffle(rng);

    let mut sets = DisjointSets::new(grid.size());
    for (from, dir, to) in walls {
        if sets.union(from.row_major_index(columns), to.row_major_index(columns)) {
            grid.carve_direction(from, dir, to);
        }
        if sets.sets_count() == 1 {
            break;
        }
    }
}
