//! WebAssembly bindings for Toroidal Life.
//!
//! Provides a thin wrapper around `Grid` for browser environments. The page
//! owns the timer: it calls `advance` from `setInterval` and pauses by
//! clearing the interval.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{
    compute::{Grid, GridStats},
    schema::{Seed, SimulationConfig},
};

/// Initialize WASM module with panic hook and logging.
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages in browser
    console_error_panic_hook::set_once();

    // Initialize WASM logger
    wasm_logger::init(wasm_logger::Config::default());
}

/// WebAssembly wrapper for a toroidal grid.
#[wasm_bindgen]
pub struct WasmGrid {
    grid: Grid,
    tick_interval_ms: u64,
}

#[derive(Serialize)]
struct CellSnapshot {
    alive: bool,
    parity: bool,
}

#[wasm_bindgen]
impl WasmGrid {
    /// Create new grid from JSON configuration and seed.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, seed_json: &str) -> Result<WasmGrid, JsValue> {
        let config = SimulationConfig::from_json_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?;

        let seed: Seed = serde_json::from_str(seed_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid seed JSON: {e}")))?;

        let mut grid = Grid::from_config(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        grid.apply_seed(&seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmGrid {
            grid,
            tick_interval_ms: config.tick_interval_ms,
        })
    }

    /// Advance one generation.
    #[wasm_bindgen]
    pub fn advance(&mut self) {
        self.grid.advance();
    }

    /// Get the cell at (x, y) as `{ alive, parity }`.
    #[wasm_bindgen(js_name = getCell)]
    pub fn get_cell(&self, x: i64, y: i64) -> Result<JsValue, JsValue> {
        let view = self
            .grid
            .get_cell(x, y)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let snapshot = CellSnapshot {
            alive: view.state.is_alive(),
            parity: view.parity,
        };
        serde_wasm_bindgen::to_value(&snapshot)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Paint the cell at (x, y) alive.
    #[wasm_bindgen(js_name = setAlive)]
    pub fn set_alive(&mut self, x: i64, y: i64) -> Result<(), JsValue> {
        self.grid
            .set_alive(x, y)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Kill every cell.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.grid.reset();
    }

    /// Row-major liveness mask [y * width + x].
    #[wasm_bindgen(js_name = aliveMask)]
    pub fn alive_mask(&self) -> Vec<u8> {
        self.grid.alive_mask().into_iter().map(u8::from).collect()
    }

    /// Get grid statistics as JSON.
    #[wasm_bindgen(js_name = getStats)]
    pub fn get_stats(&self) -> Result<JsValue, JsValue> {
        let stats = GridStats::from_grid(&self.grid);
        serde_wasm_bindgen::to_value(&stats)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Configured delay between generations.
    #[wasm_bindgen(js_name = getTickInterval)]
    pub fn get_tick_interval(&self) -> u64 {
        self.tick_interval_ms
    }

    #[wasm_bindgen(js_name = getGeneration)]
    pub fn get_generation(&self) -> u64 {
        self.grid.generation()
    }

    #[wasm_bindgen(js_name = getWidth)]
    pub fn get_width(&self) -> usize {
        self.grid.width()
    }

    #[wasm_bindgen(js_name = getHeight)]
    pub fn get_height(&self) -> usize {
        self.grid.height()
    }
}
