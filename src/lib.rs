//! # grid_nav
//!
//! Grid-based path planning for agents in a partially obstructed world.
//! An [OccupancyGrid] discretizes a rectangular world region into binary
//! blocked/walkable cells and is refreshed by re-sampling the environment
//! through an injected probe function, so the crate has zero dependency on
//! any particular physics or rendering engine. A [GridPathfinder] runs
//! deterministic [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)
//! over a grid snapshot, 4-connected with unit edge costs and the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry)
//! heuristic, and returns routes as world-space waypoint sequences.
//! Walkable connected components are pre-computed at rebuild time to avoid
//! flood-filling behaviour if no path exists.
//!
//! ```
//! use glam::Vec2;
//! use grid_nav::{GridPathfinder, OccupancyGrid};
//!
//! let mut grid = OccupancyGrid::new(10.0, 10.0, 1.0, Vec2::ZERO);
//! // Stand-in for a geometry probe against the environment.
//! grid.rebuild(|p| p.x >= 4.0 && p.x <= 5.0 && p.y <= 8.0);
//! let finder = GridPathfinder::new();
//! let path = finder
//!     .find_path(Vec2::new(0.5, 0.5), Vec2::new(9.5, 0.5), &grid)
//!     .unwrap();
//! assert!(path.len() > 10);
//! ```

mod astar;
pub mod occupancy;
pub mod pathfinder;

pub use occupancy::OccupancyGrid;
pub use pathfinder::{GridPathfinder, PathError, PathResult};
