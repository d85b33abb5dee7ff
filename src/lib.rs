//! Toroidal Game of Life - Conway's cellular automaton on a wrap-around grid.
//!
//! The grid's left edge touches its right edge and its top touches its
//! bottom, so every cell has exactly eight neighbors. Generations are
//! computed synchronously: every cell's next state is derived from the
//! previous generation before any cell changes.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration types and seeding for simulations
//! - `compute`: Cells, the transition rule, the grid and its tick driver
//!
//! # Example
//!
//! ```rust
//! use toroidal_life::{
//!     compute::{CellState, Grid},
//!     schema::{Pattern, Seed},
//! };
//!
//! let mut grid = Grid::new(16, 16)?;
//! grid.apply_seed(&Seed::at(Pattern::Blinker, (6, 7)))?;
//! grid.set_alive(0, 0)?;
//! assert_eq!(grid.get_cell(0, 0)?.state, CellState::Alive);
//!
//! grid.advance();
//! println!("{grid}");
//! println!("Alive after one generation: {}", grid.alive_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compute;
pub mod schema;

// WebAssembly bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use compute::{
    Cell, CellState, CellView, Coord, Grid, GridError, GridStats, Session, TickDriver,
};
pub use schema::{Pattern, Seed, SimulationConfig};
