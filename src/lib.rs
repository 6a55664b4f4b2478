//! # truthtable
//!
//! A three-valued combinational logic simulator.
//!
//! Given a gate-level netlist, the simulator drives every combination of
//! its inputs, lets the gates settle to a fixed point using 0/1/undetermined
//! logic, and reports one truth-table row per combination.
//!
//! ```
//! use truthtable::{parse_netlist, Simulator, format_table};
//!
//! let net = parse_netlist("INPUT 2 a b OUTPUT 1 y NAND a b y").unwrap();
//! let table = Simulator::new(net).run().unwrap();
//! assert_eq!(format_table(&table), "0 0 | 1\n0 1 | 1\n1 0 | 1\n1 1 | 0\n");
//! ```

pub mod logic;
pub mod circuit;
pub mod netfile;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use logic::Logic;
pub use circuit::{
    Gate, GateKind, Netlist, NetlistBuilder, NetlistError, Row, SimConfig, SimError, SimState,
    Simulator, TruthTable, WireId, WireTable,
};
pub use netfile::{describe, format_row, format_table, load_netlist, parse_netlist, table_to_json, ParseError};
