//! WebAssembly bindings for the truth-table simulator.
//!
//! This module provides JavaScript-friendly wrappers around [`Simulator`].

use wasm_bindgen::prelude::*;
use crate::{describe, format_row, parse_netlist, table_to_json, Simulator};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly simulator wrapper.
#[wasm_bindgen]
pub struct WasmSimulator {
    sim: Option<Simulator>,
}

#[wasm_bindgen]
impl WasmSimulator {
    /// Create an empty simulator. Call `load` before stepping.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { sim: None }
    }

    /// Load a netlist from source text. Returns the number of gates.
    #[wasm_bindgen]
    pub fn load(&mut self, source: &str) -> Result<usize, JsError> {
        let netlist = parse_netlist(source).map_err(|e| JsError::new(&format!("{}", e)))?;
        let gates = netlist.gates().len();
        self.sim = Some(Simulator::new(netlist));
        Ok(gates)
    }

    /// Settle the next row. Returns it as `0 1 | 1`.
    #[wasm_bindgen]
    pub fn step(&mut self) -> Result<String, JsError> {
        let sim = self.loaded()?;
        let row = sim.step().map_err(|e| JsError::new(&format!("{}", e)))?;
        Ok(format_row(&row))
    }

    /// Run the remaining rows. Returns the table as JSON.
    #[wasm_bindgen]
    pub fn run(&mut self) -> Result<String, JsError> {
        let sim = self.loaded()?;
        let table = sim.run().map_err(|e| JsError::new(&format!("{}", e)))?;
        table_to_json(&table).map_err(|e| JsError::new(&format!("{}", e)))
    }

    /// Rewind to the all-zero assignment.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        if let Some(sim) = self.sim.as_mut() {
            sim.reset();
        }
    }

    /// Check if more rows remain.
    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        self.sim.as_ref().is_some_and(Simulator::is_running)
    }

    /// Get rows emitted so far.
    #[wasm_bindgen]
    pub fn rows_emitted(&self) -> u64 {
        self.sim.as_ref().map_or(0, |sim| sim.rows_emitted)
    }

    /// Get state as string.
    #[wasm_bindgen]
    pub fn state(&self) -> String {
        match &self.sim {
            Some(sim) => format!("{:?}", sim.state()),
            None => "Empty".to_string(),
        }
    }

    /// Get the loaded netlist in canonical text form.
    #[wasm_bindgen]
    pub fn describe(&self) -> String {
        self.sim.as_ref().map_or_else(String::new, |sim| describe(sim.netlist()))
    }

    fn loaded(&mut self) -> Result<&mut Simulator, JsError> {
        self.sim.as_mut().ok_or_else(|| JsError::new("no netlist loaded"))
    }
}

impl Default for WasmSimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a netlist and return its whole truth table as JSON.
#[wasm_bindgen]
pub fn truth_table_json(source: &str) -> Result<String, JsError> {
    let mut sim = WasmSimulator::new();
    sim.load(source)?;
    sim.run()
}
