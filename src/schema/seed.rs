//! Seed types for initializing Game of Life simulations.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Complete seed specification for simulation initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
    /// Top-left placement of the pattern. Ignored by `Noise`.
    #[serde(default)]
    pub origin: (usize, usize),
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            pattern: Pattern::Glider,
            origin: (1, 1),
        }
    }
}

/// Predefined patterns for initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// No live cells.
    Empty,
    /// 2x2 still life.
    Block,
    /// Period-2 oscillator, horizontal phase.
    Blinker,
    /// Period-4 spaceship travelling towards +x, +y.
    Glider,
    /// Bernoulli noise over the whole grid.
    Noise {
        /// Probability that a cell starts alive.
        density: f64,
        /// Random seed.
        seed: u64,
    },
    /// Custom live cells as offsets from the origin.
    Custom { cells: Vec<(usize, usize)> },
}

const BLOCK: &[(usize, usize)] = &[(0, 0), (1, 0), (0, 1), (1, 1)];
const BLINKER: &[(usize, usize)] = &[(0, 0), (1, 0), (2, 0)];
const GLIDER: &[(usize, usize)] = &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

impl Seed {
    /// Seed placing `pattern` at `origin`.
    pub fn at(pattern: Pattern, origin: (usize, usize)) -> Self {
        Self { pattern, origin }
    }

    /// Check pattern parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Pattern::Noise { density, .. } = self.pattern {
            if !(0.0..=1.0).contains(&density) {
                return Err(ConfigError::InvalidDensity(density));
            }
        }
        Ok(())
    }

    /// Generate the live cell coordinates for a `width` x `height` torus.
    ///
    /// Offsets past the grid edge wrap around, so the result is always in range.
    pub fn generate(
        &self,
        width: usize,
        height: usize,
    ) -> Result<Vec<(usize, usize)>, ConfigError> {
        self.validate()?;
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }

        let cells = match &self.pattern {
            Pattern::Empty => Vec::new(),
            Pattern::Block => self.place(BLOCK, width, height),
            Pattern::Blinker => self.place(BLINKER, width, height),
            Pattern::Glider => self.place(GLIDER, width, height),
            Pattern::Custom { cells } => self.place(cells, width, height),
            Pattern::Noise { density, seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                let mut cells = Vec::new();
                for y in 0..height {
                    for x in 0..width {
                        if rng.gen_bool(*density) {
                            cells.push((x, y));
                        }
                    }
                }
                cells
            }
        };

        Ok(cells)
    }

    fn place(
        &self,
        offsets: &[(usize, usize)],
        width: usize,
        height: usize,
    ) -> Vec<(usize, usize)> {
        let (ox, oy) = self.origin;
        offsets
            .iter()
            .map(|&(dx, dy)| {
                (
                    (ox % width + dx % width) % width,
                    (oy % height + dy % height) % height,
                )
            })
            .collect()
    }
}
