//! Gate-level circuit model and simulation engine.
//!
//! This module implements:
//! - A wire table with three reserved wires (`0`, `1`, `_`)
//! - Nine gate kinds, including variable-width DECODER and MULTIPLEXER
//! - Netlist construction with layout validation
//! - Fixed-point settling and exhaustive input enumeration

pub mod wire;
pub mod gate;
pub mod netlist;
pub mod eval;
pub mod sim;

pub use wire::{Wire, WireId, WireTable};
pub use gate::{BinaryOp, Decoder, Gate, GateKind, Multiplexer, MAX_SELECT_WIDTH};
pub use netlist::{Netlist, NetlistBuilder, NetlistError};
pub use eval::fire;
pub use sim::{Row, Rows, SimConfig, SimError, SimState, Simulator, TruthTable, NonTermination};
