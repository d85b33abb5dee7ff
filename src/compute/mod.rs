//! Compute module - Simulation core for the toroidal Game of Life.

mod cell;
mod driver;
mod grid;
mod rules;

pub use cell::*;
pub use driver::*;
pub use grid::*;
pub use rules::*;
