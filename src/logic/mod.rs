//! Three-valued logic primitives.
//!
//! This module provides:
//! - [`Logic`] - A single wire level (0, 1, or undetermined)
//! - [`bus_index`] / [`bus_levels`] - Reading and driving select-line groups

mod value;
pub mod bus;

pub use value::Logic;
pub use bus::{bus_index, bus_levels};
