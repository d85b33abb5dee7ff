//! Toroidal grid - cell arena, neighbor topology and generation update.
//!
//! Cells live in a flat row-major arena indexed by `y * width + x`. Each
//! cell's Moore neighborhood is precomputed once as a list of coordinates
//! with wrap-around on both axes, so the grid has no edges.

use std::fmt;

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

use serde::{Deserialize, Serialize};

use super::{Cell, CellState, CellView, next_state};
use crate::schema::{ConfigError, Seed, SimulationConfig};

/// Position of a cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Coord {
    #[inline]
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Errors raised by grid construction and cell access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },
    #[error("Grid dimensions {width}x{height} must be non-zero with an addressable cell count")]
    InvalidDimensions { width: usize, height: usize },
}

/// Game of Life grid on a torus.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Cell arena [y * width + x].
    cells: Vec<Cell>,
    /// Wrapped Moore neighborhood per cell [y * width + x].
    neighbors: Vec<[Coord; 8]>,
    /// Number of committed generations since construction or the last reset.
    generation: u64,
}

impl Grid {
    /// Create an all-dead grid and precompute its neighbor table.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let size = match width.checked_mul(height) {
            Some(size) if size > 0 => size,
            _ => return Err(GridError::InvalidDimensions { width, height }),
        };

        let mut cells = Vec::with_capacity(size);
        let mut neighbors = Vec::with_capacity(size);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(x, y));
                neighbors.push(wrapped_neighbors(x, y, width, height));
            }
        }

        log::debug!("Created {}x{} toroidal grid", width, height);

        Ok(Self {
            width,
            height,
            cells,
            neighbors,
            generation: 0,
        })
    }

    /// Validate `config`, then create a grid sized by it.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.width, config.height)?)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a grid holds at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Convert a coordinate to its arena index.
    #[inline]
    fn idx(&self, coord: Coord) -> usize {
        coord.y * self.width + coord.x
    }

    /// Validate a possibly negative coordinate pair.
    pub fn checked_coord(&self, x: i64, y: i64) -> Result<Coord, GridError> {
        let out_of_bounds = || GridError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        };
        let cx = usize::try_from(x).map_err(|_| out_of_bounds())?;
        let cy = usize::try_from(y).map_err(|_| out_of_bounds())?;
        if cx >= self.width || cy >= self.height {
            return Err(out_of_bounds());
        }
        Ok(Coord::new(cx, cy))
    }

    fn check(&self, coord: Coord) -> Result<usize, GridError> {
        if coord.x >= self.width || coord.y >= self.height {
            return Err(GridError::OutOfBounds {
                x: i64::try_from(coord.x).unwrap_or(i64::MAX),
                y: i64::try_from(coord.y).unwrap_or(i64::MAX),
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.idx(coord))
    }

    /// Cell at `coord`.
    pub fn cell(&self, coord: Coord) -> Result<&Cell, GridError> {
        let i = self.check(coord)?;
        Ok(&self.cells[i])
    }

    /// Presentation view of the cell at `(x, y)`.
    pub fn get_cell(&self, x: i64, y: i64) -> Result<CellView, GridError> {
        let coord = self.checked_coord(x, y)?;
        Ok(self.cells[self.idx(coord)].view())
    }

    /// Paint the cell at `(x, y)` alive. Visible immediately, no tick needed.
    pub fn set_alive(&mut self, x: i64, y: i64) -> Result<(), GridError> {
        let coord = self.checked_coord(x, y)?;
        self.set_state(coord, CellState::Alive)
    }

    /// Overwrite the committed state of the cell at `coord`.
    pub fn set_state(&mut self, coord: Coord, state: CellState) -> Result<(), GridError> {
        let i = self.check(coord)?;
        self.cells[i].set_state(state);
        Ok(())
    }

    /// The eight wrapped neighbors of `coord`.
    ///
    /// Order: left, right, up, down, left-up, left-down, right-up, right-down.
    pub fn neighbors(&self, coord: Coord) -> Result<&[Coord; 8], GridError> {
        let i = self.check(coord)?;
        Ok(&self.neighbors[i])
    }

    /// Count of live cells among the neighbors of `coord`.
    pub fn alive_neighbors(&self, coord: Coord) -> Result<u8, GridError> {
        let i = self.check(coord)?;
        Ok(self.count_alive_neighbors(i))
    }

    /// Reads committed states only. Duplicate neighbors on tiny grids count once per entry.
    #[inline]
    fn count_alive_neighbors(&self, i: usize) -> u8 {
        self.neighbors[i]
            .iter()
            .filter(|&&n| self.cells[self.idx(n)].is_alive())
            .count() as u8
    }

    /// Advance one generation.
    ///
    /// Every pending state is computed from the pre-advance snapshot before
    /// any cell commits.
    pub fn advance(&mut self) {
        // 1. Compute
        for i in 0..self.cells.len() {
            let next = next_state(self.cells[i].state(), self.count_alive_neighbors(i));
            self.cells[i].set_pending_next(next);
        }

        // 2. Commit
        for cell in &mut self.cells {
            cell.commit();
        }

        self.generation += 1;
        log::trace!("Advanced to generation {}", self.generation);
    }

    /// Advance one generation with the compute and commit phases split across
    /// the rayon pool. Produces exactly the same grid as [`Grid::advance`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn advance_parallel(&mut self) {
        // 1. Compute against the untouched committed states
        let next: Vec<CellState> = {
            let grid = &*self;
            (0..grid.cells.len())
                .into_par_iter()
                .map(|i| next_state(grid.cells[i].state(), grid.count_alive_neighbors(i)))
                .collect()
        };

        // 2. Commit, only after every cell has been computed
        self.cells
            .par_iter_mut()
            .zip(next.into_par_iter())
            .for_each(|(cell, next)| {
                cell.set_pending_next(next);
                cell.commit();
            });

        self.generation += 1;
        log::trace!("Advanced to generation {} (parallel)", self.generation);
    }

    /// WASM has no thread pool; fall back to the sequential update.
    #[cfg(target_arch = "wasm32")]
    pub fn advance_parallel(&mut self) {
        self.advance();
    }

    /// Advance `generations` times.
    pub fn run(&mut self, generations: u64, parallel: bool) {
        for _ in 0..generations {
            if parallel {
                self.advance_parallel();
            } else {
                self.advance();
            }
        }
    }

    /// Kill every cell and discard pending computation. Idempotent.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.set_state(CellState::Dead);
        }
        self.generation = 0;
        log::debug!("Grid reset");
    }

    /// Paint the live cells of `seed` onto the grid. Returns the number painted.
    pub fn apply_seed(&mut self, seed: &Seed) -> Result<usize, ConfigError> {
        let cells = seed.generate(self.width, self.height)?;
        for &cell in &cells {
            let i = self.idx(Coord::from(cell));
            self.cells[i].set_state(CellState::Alive);
        }
        log::debug!("Applied seed {:?}: {} cells", seed.pattern, cells.len());
        Ok(cells.len())
    }

    /// Iterate over all coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coord::new(x, y)))
    }

    /// Coordinates of live cells in row-major order.
    pub fn alive_cells(&self) -> Vec<Coord> {
        self.coords()
            .zip(self.cells.iter())
            .filter(|(_, cell)| cell.is_alive())
            .map(|(coord, _)| coord)
            .collect()
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Row-major liveness mask [y * width + x].
    pub fn alive_mask(&self) -> Vec<bool> {
        self.cells.iter().map(Cell::is_alive).collect()
    }

    pub fn stats(&self) -> GridStats {
        GridStats::from_grid(self)
    }
}

/// Moore neighborhood of `(x, y)` with wrap-around on both axes.
fn wrapped_neighbors(x: usize, y: usize, width: usize, height: usize) -> [Coord; 8] {
    let left_x = (x + width - 1) % width;
    let right_x = (x + 1) % width;
    let up_y = (y + height - 1) % height;
    let down_y = (y + 1) % height;

    [
        Coord::new(left_x, y),
        Coord::new(right_x, y),
        Coord::new(x, up_y),
        Coord::new(x, down_y),
        Coord::new(left_x, up_y),
        Coord::new(left_x, down_y),
        Coord::new(right_x, up_y),
        Coord::new(right_x, down_y),
    ]
}

impl fmt::Display for Grid {
    /// One text row per `y`: `#` alive, `.` dead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                f.write_str(if cell.is_alive() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Grid statistics for monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridStats {
    pub generation: u64,
    pub alive: usize,
    pub total: usize,
    pub population_ratio: f32,
}

impl GridStats {
    pub fn from_grid(grid: &Grid) -> Self {
        let alive = grid.alive_count();
        let total = grid.len();
        Self {
            generation: grid.generation(),
            alive,
            total,
            population_ratio: alive as f32 / total as f32,
        }
    }
}
