use std::fmt::Debug;
use std::ops::Add;

use itertools::Itertools;
use log::trace;
use num::traits::{Bounded, One, Unsigned, Zero};
use smallvec::SmallVec;

use crate::cells::GridCoordinate;
use crate::grid::WallGrid;
use crate::utils;
use crate::utils::FnvHashMap;


// Trait (hack) used purely as a generic type parameter alias because it looks ugly to type this out each time
// Note generic parameter type aliases are not in the langauge.
// `type X = Y;` only works with concrete types.
pub trait MaxDistance: Zero + One + Bounded + Unsigned + Add<Output = Self> + Debug + Copy + Ord {}
impl<T: Zero + One + Bounded + Unsigned + Add<Output = T> + Debug + Copy + Ord> MaxDistance for T {}

/// Steps from a start cell to every cell reachable from it through open walls.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT: MaxDistance> Distances<MaxDistanceT> {
    /// Breadth first flood fill from `start_coordinate`. None if the start is not on the grid.
    pub fn new(grid: &WallGrid, start_coordinate: GridCoordinate) -> Option<Distances<MaxDistanceT>> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = Zero::zero();
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, Zero::zero());

        // Every step costs one, so the first distance recorded for a cell is already its shortest
        // and the map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell: MaxDistanceT = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in grid.links(*cell_coord).unwrap_or_default() {
                    if !distances.contains_key(&link_coordinate) {
                        distances.insert(link_coordinate, distance_to_cell + One::one());
                        new_frontier.push(link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        trace!("flood fill from {} reached {} cells, max distance {:?}",
               start_coordinate, distances.len(), max);
        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    /// Number of cells reachable from the start, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// The cells at the maximum distance, in row-major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to a linked
/// neighbour closer to the start. None if the end is unreachable.
pub fn shortest_path<MaxDistanceT>(grid: &WallGrid,
                                   distances_from_start: &Distances<MaxDistanceT>,
                                   end_point: GridCoordinate)
                                   -> Option<Vec<GridCoordinate>>
    where MaxDistanceT: MaxDistance
{
    distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let current_distance_to_start = distances_from_start.distance_from_start_to(current_coord)?;

        let closest_to_start = grid.links(current_coord)?
            .iter()
            .filter_map(|&coord| distances_from_start.distance_from_start_to(coord).map(|d| (coord, d)))
            .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            // Not getting any closer means the distances were computed for another grid.
            Some((closer_coord, closer_distance)) if closer_distance < current_distance_to_start => {
                current_coord = closer_coord;
                path.push(current_coord);
            }
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The route from the entrance cell to the exit cell.
pub fn solution_path(grid: &WallGrid) -> Option<Vec<GridCoordinate>> {
    let distances = Distances::<u32>::new(grid, grid.entrance())?;
    shortest_path(grid, &distances, grid.exit())
}

/// Works only as long as we are looking at a perfect maze, otherwise you get back some arbitrary path back.
pub fn longest_path(grid: &WallGrid) -> Option<Vec<GridCoordinate>> {
    // Distances to everywhere from an arbitrary start coordinate
    let first_distances = Distances::<u32>::new(grid, GridCoordinate::new(0, 0))?;

    // The start of the longest path is just the point furthest away from an arbitrary initial point
    let long_path_start_coordinate = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::<u32>::new(grid, long_path_start_coordinate)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}
