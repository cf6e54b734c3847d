use glam::Vec2;
use grid_util::point::Point;
use log::{debug, warn};
use smallvec::SmallVec;
use thiserror::Error;

use crate::astar::{astar_search, SearchOutcome};
use crate::occupancy::OccupancyGrid;

/// Why a path request produced no path. Every variant is a routine outcome
/// on a semi-obstructed map, not a fault; callers decide whether to retry
/// after the next rebuild.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// The grid has not completed its first rebuild. A precondition
    /// violation on the caller's side: poll [OccupancyGrid::is_ready] first.
    #[error("occupancy grid has not completed its first rebuild")]
    UninitializedGrid,
    /// Start or goal maps to a cell outside the grid extents.
    #[error("start or goal lies outside the grid")]
    OutOfBounds,
    /// The start cell is blocked; no search was attempted.
    #[error("start cell is blocked")]
    UnwalkableStart,
    /// The goal cell is blocked; no search was attempted.
    #[error("goal cell is blocked")]
    UnwalkableGoal,
    /// Start and goal lie in disconnected walkable regions.
    #[error("no walkable route between start and goal")]
    Unreachable,
    /// The expansion cap was hit before the goal was reached.
    #[error("search aborted after {0} node expansions")]
    Aborted(usize),
}

/// An ordered sequence of world-space waypoints (cell centers, start cell
/// through goal cell), or the reason there is none.
pub type PathResult = Result<Vec<Vec2>, PathError>;

const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

fn manhattan_distance(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Plans shortest routes over an [OccupancyGrid] snapshot.
///
/// Movement is 4-connected with unit edge cost and the Manhattan distance as
/// heuristic, which is admissible and consistent on such a grid, so returned
/// paths are optimal. Searches are stateless and read-only: nothing is cached
/// between calls and the grid is never mutated, so any number of searches may
/// share one snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridPathfinder {
    /// Upper bound on node expansions per search. `None` leaves the search
    /// unbounded, which on a connected grid terminates after at most
    /// rows * cols expansions anyway.
    pub max_expansions: Option<usize>,
}

impl GridPathfinder {
    pub fn new() -> GridPathfinder {
        GridPathfinder {
            max_expansions: None,
        }
    }

    /// A pathfinder that gives up with [PathError::Aborted] after `limit`
    /// node expansions. Useful to bound worst-case latency on huge grids.
    pub fn with_expansion_limit(limit: usize) -> GridPathfinder {
        GridPathfinder {
            max_expansions: Some(limit),
        }
    }

    /// Computes the shortest walkable route from `start` to `goal`, both in
    /// world space. The result runs from the start cell's center to the goal
    /// cell's center inclusive; if both endpoints share a cell it is a single
    /// waypoint.
    ///
    /// Endpoints are validated up front: a request with an out-of-bounds or
    /// blocked endpoint fails without expanding a single node, as does one
    /// whose endpoints lie in different connected components.
    pub fn find_path(&self, start: Vec2, goal: Vec2, grid: &OccupancyGrid) -> PathResult {
        if !grid.is_ready() {
            return Err(PathError::UninitializedGrid);
        }
        let start_cell = grid.world_to_cell(start);
        let goal_cell = grid.world_to_cell(goal);
        debug!(
            "Path request {} -> {}: cells {:?} -> {:?}",
            start, goal, start_cell, goal_cell
        );
        if !grid.in_bounds(start_cell) || !grid.in_bounds(goal_cell) {
            return Err(PathError::OutOfBounds);
        }
        if !grid.is_walkable(start_cell) {
            return Err(PathError::UnwalkableStart);
        }
        if !grid.is_walkable(goal_cell) {
            return Err(PathError::UnwalkableGoal);
        }
        if grid.unreachable(start_cell, goal_cell) {
            return Err(PathError::Unreachable);
        }
        let outcome = astar_search(
            &start_cell,
            |cell| self.neighbourhood(grid, *cell),
            |cell| manhattan_distance(*cell, goal_cell),
            |cell| *cell == goal_cell,
            self.max_expansions,
        );
        match outcome {
            SearchOutcome::Found(cells, cost) => {
                debug!("Found path of cost {} over {} cells", cost, cells.len());
                Ok(cells.into_iter().map(|c| grid.cell_to_world(c)).collect())
            }
            SearchOutcome::Exhausted => {
                // Components said the goal was reachable, so this indicates a
                // stale or inconsistent snapshot.
                warn!(
                    "Search exhausted although {:?} and {:?} share a component",
                    start_cell, goal_cell
                );
                Err(PathError::Unreachable)
            }
            SearchOutcome::Aborted(expanded) => Err(PathError::Aborted(expanded)),
        }
    }

    /// Walkable 4-neighbourhood of a cell with unit move costs. Neighbours
    /// are bounds-checked and walkability-checked here, at generation time,
    /// so the search never sees a blocked successor.
    fn neighbourhood(&self, grid: &OccupancyGrid, cell: Point) -> SmallVec<[(Point, i32); 4]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(cell.x + dx, cell.y + dy))
            .filter(|n| grid.is_walkable(*n))
            .map(|n| (n, 1))
            .collect()
    }
}
