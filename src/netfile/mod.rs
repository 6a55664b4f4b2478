//! Netlist text front end and truth-table output.
//!
//! This module provides:
//! - A parser for the netlist text format (text → [`Netlist`](crate::Netlist))
//! - Row, table, and JSON rendering
//! - A canonical netlist dump

pub mod parser;
pub mod format;

pub use parser::{parse_netlist, load_netlist, ParseError, Section};
pub use format::{describe, format_gate, format_row, format_table, table_to_json};
