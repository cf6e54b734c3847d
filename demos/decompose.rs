use glam::Vec2;
use grid_nav::{GridPathfinder, OccupancyGrid};

// Decomposes a 100x100 world centered on the origin into 2-unit cells, the
// way an agent controller would sample terrain geometry, then plans a route
// across it. The sampler here marks two obstacle discs as blocked; in a real
// deployment it would be a downward probe against the environment.

fn main() {
    let discs = [(Vec2::new(-10.0, 0.0), 12.0), (Vec2::new(20.0, 15.0), 8.0)];
    let blocked_at = |p: Vec2| discs.iter().any(|(c, r)| p.distance(*c) < *r);

    let mut grid = OccupancyGrid::new(100.0, 100.0, 2.0, Vec2::new(-50.0, -50.0));
    grid.rebuild(blocked_at);
    println!(
        "Decomposed world into {}x{} cells",
        grid.rows(),
        grid.cols()
    );

    let finder = GridPathfinder::new();
    match finder.find_path(Vec2::new(-45.0, -5.0), Vec2::new(45.0, 10.0), &grid) {
        Ok(path) => {
            println!("Route with {} waypoints:", path.len());
            for p in &path {
                println!("  {:?}", p);
            }
        }
        Err(e) => println!("No route: {}", e),
    }
}
