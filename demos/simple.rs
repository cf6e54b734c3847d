use glam::Vec2;
use grid_nav::{GridPathfinder, OccupancyGrid};

// In this demo a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  G|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - G marks the goal
//
// Movement is 4-connected, so the path has to go around the center cell.

fn main() {
    let mut grid = OccupancyGrid::new(3.0, 3.0, 1.0, Vec2::ZERO);
    grid.rebuild(|p| p.floor() == Vec2::new(1.0, 1.0));
    println!("{}", grid);
    let finder = GridPathfinder::new();
    let path = finder
        .find_path(Vec2::new(0.5, 0.5), Vec2::new(2.5, 2.5), &grid)
        .unwrap();
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
}
