use core::fmt;

use glam::Vec2;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

/// Discretized occupancy snapshot of a rectangular world region.
///
/// The grid covers `cols * cell_size` world units of width (x axis) and
/// `rows * cell_size` of length (y axis), anchored at `origin`, the world
/// position of cell (0, 0)'s corner. Cells are addressed with [Point] where
/// `x` is the column and `y` the row. Each cell holds a single blocked flag;
/// what counts as blocked is decided entirely by the sampler passed to
/// [rebuild](Self::rebuild).
///
/// In addition to the raw [BoolGrid] flags, the grid keeps 4-connected
/// components of the walkable cells in a [UnionFind], regenerated on every
/// rebuild. Path queries use them to reject disconnected endpoints without
/// flood-filling.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    grid: BoolGrid,
    cell_size: f32,
    origin: Vec2,
    components: UnionFind<usize>,
    ready: bool,
}

impl OccupancyGrid {
    /// Allocates an all-unblocked grid covering `world_width` x `world_length`
    /// world units in cells of `cell_size`. The shape is fixed for the grid's
    /// lifetime; only [rebuild](Self::rebuild) changes the contents.
    ///
    /// # Panics
    /// Panics if `cell_size` is not strictly positive or if the extents are
    /// too small to hold a single cell.
    pub fn new(world_width: f32, world_length: f32, cell_size: f32, origin: Vec2) -> OccupancyGrid {
        assert!(cell_size > 0.0, "cell size must be positive");
        let cols = (world_width / cell_size).floor() as usize;
        let rows = (world_length / cell_size).floor() as usize;
        assert!(
            rows > 0 && cols > 0,
            "world extents must cover at least one cell"
        );
        OccupancyGrid {
            grid: BoolGrid::new(cols, rows, false),
            cell_size,
            origin,
            components: UnionFind::new(cols * rows),
            ready: false,
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.height()
    }

    pub fn cols(&self) -> usize {
        self.grid.width()
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Whether the grid has completed its first [rebuild](Self::rebuild).
    /// Path requests against a grid that was never rebuilt are rejected.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Maps a world position to the cell containing it. The result may lie
    /// outside the grid; [is_walkable](Self::is_walkable) is the bounds
    /// authority.
    pub fn world_to_cell(&self, point: Vec2) -> Point {
        let local = (point - self.origin) / self.cell_size;
        Point::new(local.x.floor() as i32, local.y.floor() as i32)
    }

    /// Maps a cell to the world position of its center, the exact inverse of
    /// [world_to_cell](Self::world_to_cell) up to the half-cell convention.
    pub fn cell_to_world(&self, cell: Point) -> Vec2 {
        self.origin + (Vec2::new(cell.x as f32, cell.y as f32) + 0.5) * self.cell_size
    }

    pub fn in_bounds(&self, cell: Point) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.grid.width()
            && (cell.y as usize) < self.grid.height()
    }

    /// True iff the cell is inside the grid and not blocked.
    pub fn is_walkable(&self, cell: Point) -> bool {
        self.in_bounds(cell) && !self.grid.get(cell.x as usize, cell.y as usize)
    }

    /// Re-samples the whole grid. Every cell center is handed to `blocked_at`
    /// and the answer stored as the cell's blocked flag; a full O(rows*cols)
    /// scan with no incremental diffing. The new contents are built into a
    /// fresh array and swapped in whole, so a clone taken before the call
    /// never observes a partial rebuild. Components are regenerated and the
    /// grid is marked ready.
    ///
    /// The sampler owns every environment-specific detail: probe height,
    /// probe direction, layer filtering.
    pub fn rebuild<F>(&mut self, mut blocked_at: F)
    where
        F: FnMut(Vec2) -> bool,
    {
        let mut next = BoolGrid::new(self.cols(), self.rows(), false);
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let center = self.cell_to_world(Point::new(col as i32, row as i32));
                next.set(col, row, blocked_at(center));
            }
        }
        self.grid = next;
        self.generate_components();
        self.ready = true;
        info!(
            "Rebuilt {}x{} occupancy grid from sampler",
            self.rows(),
            self.cols()
        );
    }

    /// Checks whether start and goal lie in different walkable components.
    /// Out-of-bounds cells belong to no component.
    pub fn unreachable(&self, start: Point, goal: Point) -> bool {
        if self.in_bounds(start) && self.in_bounds(goal) {
            !self.components.equiv(self.cell_index(start), self.cell_index(goal))
        } else {
            true
        }
    }

    fn cell_index(&self, cell: Point) -> usize {
        self.grid.get_ix(cell.x as usize, cell.y as usize)
    }

    /// Generates a new [UnionFind] structure and unions each walkable cell
    /// with its walkable east and south neighbours, which covers all
    /// 4-connected adjacencies in one pass.
    fn generate_components(&mut self) {
        info!("Generating connected components");
        let w = self.cols();
        let h = self.rows();
        self.components = UnionFind::new(w * h);
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let cell = Point::new(x, y);
                if !self.is_walkable(cell) {
                    continue;
                }
                let cell_ix = self.cell_index(cell);
                for neighbour in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if self.is_walkable(neighbour) {
                        self.components.union(cell_ix, self.cell_index(neighbour));
                    }
                }
            }
        }
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for y in 0..self.rows() {
            let values = (0..self.cols())
                .map(|x| self.grid.get(x, y) as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}
