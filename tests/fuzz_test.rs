//! Fuzzes the planner by checking, for many random grids, that a path is
//! found exactly when a breadth-first search finds one, and that the found
//! path has the same edge count as the BFS shortest path. BFS is the oracle:
//! on a unit-cost 4-connected grid it is optimal by construction.

use std::collections::VecDeque;

use glam::Vec2;
use grid_nav::{GridPathfinder, OccupancyGrid, PathError};
use rand::prelude::*;

const N: usize = 10;
const N_GRIDS: usize = 1000;

fn random_cells(n: usize, rng: &mut StdRng) -> Vec<Vec<bool>> {
    (0..n)
        .map(|_| (0..n).map(|_| rng.gen_bool(0.4)).collect())
        .collect()
}

fn grid_from_cells(cells: &[Vec<bool>]) -> OccupancyGrid {
    let n = cells.len();
    let mut grid = OccupancyGrid::new(n as f32, n as f32, 1.0, Vec2::ZERO);
    grid.rebuild(|p| cells[p.y.floor() as usize][p.x.floor() as usize]);
    grid
}

fn center(col: usize, row: usize) -> Vec2 {
    Vec2::new(col as f32 + 0.5, row as f32 + 0.5)
}

/// Shortest-path edge count from (0, 0) to (n-1, n-1), or None if
/// disconnected.
fn bfs_distance(cells: &[Vec<bool>]) -> Option<usize> {
    let n = cells.len();
    let mut dist = vec![vec![usize::MAX; n]; n];
    let mut queue = VecDeque::new();
    dist[0][0] = 0;
    queue.push_back((0usize, 0usize));
    while let Some((col, row)) = queue.pop_front() {
        for (dx, dy) in [(0i32, -1i32), (1, 0), (0, 1), (-1, 0)] {
            let (nc, nr) = (col as i32 + dx, row as i32 + dy);
            if nc < 0 || nr < 0 || nc as usize >= n || nr as usize >= n {
                continue;
            }
            let (nc, nr) = (nc as usize, nr as usize);
            if cells[nr][nc] || dist[nr][nc] != usize::MAX {
                continue;
            }
            dist[nr][nc] = dist[row][col] + 1;
            queue.push_back((nc, nr));
        }
    }
    match dist[n - 1][n - 1] {
        usize::MAX => None,
        d => Some(d),
    }
}

fn visualize_grid(cells: &[Vec<bool>]) {
    for (row, row_cells) in cells.iter().enumerate() {
        for (col, blocked) in row_cells.iter().enumerate() {
            if row == 0 && col == 0 {
                print!("S");
            } else if row == cells.len() - 1 && col == row_cells.len() - 1 {
                print!("G");
            } else if *blocked {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

#[test]
fn fuzz_against_bfs() {
    let mut rng = StdRng::seed_from_u64(0);
    let finder = GridPathfinder::new();
    for _ in 0..N_GRIDS {
        let mut cells = random_cells(N, &mut rng);
        cells[0][0] = false;
        cells[N - 1][N - 1] = false;
        let grid = grid_from_cells(&cells);
        let expected = bfs_distance(&cells);
        let result = finder.find_path(center(0, 0), center(N - 1, N - 1), &grid);
        match (&result, expected) {
            (Ok(path), Some(d)) => {
                if path.len() != d + 1 {
                    visualize_grid(&cells);
                    panic!("path has {} waypoints, BFS distance is {}", path.len(), d);
                }
            }
            (Err(PathError::Unreachable), None) => {}
            _ => {
                visualize_grid(&cells);
                panic!(
                    "planner returned {:?}, BFS distance is {:?}",
                    result, expected
                );
            }
        }
    }
}

#[test]
fn fuzz_determinism() {
    let mut rng = StdRng::seed_from_u64(1);
    let finder = GridPathfinder::new();
    for _ in 0..100 {
        let mut cells = random_cells(N, &mut rng);
        cells[0][0] = false;
        cells[N - 1][N - 1] = false;
        let grid = grid_from_cells(&cells);
        let first = finder.find_path(center(0, 0), center(N - 1, N - 1), &grid);
        let second = finder.find_path(center(0, 0), center(N - 1, N - 1), &grid);
        assert_eq!(first, second);
    }
}
