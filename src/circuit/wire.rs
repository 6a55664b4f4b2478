//! Wire table: the symbol table of named signals.
//!
//! Wires live in an append-only arena and are addressed by [`WireId`].
//! Three reserved wires form a fixed preamble at the lowest indices:
//! the constants `0` and `1`, and the sink `_`.

use crate::circuit::NetlistError;
use crate::logic::Logic;
use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use std::fmt;

/// Stable index of a wire in its [`WireTable`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WireId(usize);

impl WireId {
    /// Constant low wire, named `0`.
    pub const ZERO: WireId = WireId(0);
    /// Constant high wire, named `1`.
    pub const ONE: WireId = WireId(1);
    /// Placeholder wire for unused outputs, named `_`.
    pub const SINK: WireId = WireId(2);

    /// Position in the table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }

    /// True for `0` and `1`, whose values never change.
    #[inline]
    pub const fn is_constant(self) -> bool {
        self.0 == Self::ZERO.0 || self.0 == Self::ONE.0
    }

    /// True for any of the three preamble wires.
    #[inline]
    pub const fn is_reserved(self) -> bool {
        self.0 < RESERVED.len()
    }
}

impl fmt::Debug for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// The reserved preamble, in index order.
const RESERVED: [(&str, Logic); 3] = [
    ("0", Logic::Zero),
    ("1", Logic::One),
    ("_", Logic::Unknown),
];

/// A named signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    /// Unique name.
    pub name: String,
    /// Current level.
    pub value: Logic,
    /// Set for wires that a gate drives or that the netlist reports.
    /// These are reset to undetermined before every row is settled.
    pub is_output: bool,
}

impl Wire {
    fn new(name: &str, value: Logic) -> Self {
        Self {
            name: name.to_string(),
            value,
            is_output: false,
        }
    }
}

/// Indexed, growable table of wires.
#[derive(Clone)]
pub struct WireTable {
    wires: Vec<Wire>,
    by_name: HashMap<String, WireId>,
}

impl WireTable {
    /// Create a table holding only the reserved preamble.
    pub fn new() -> Self {
        let mut table = Self {
            wires: Vec::with_capacity(RESERVED.len()),
            by_name: HashMap::new(),
        };
        for (name, value) in RESERVED {
            table.by_name.insert(name.to_string(), WireId(table.wires.len()));
            table.wires.push(Wire::new(name, value));
        }
        table
    }

    /// Return the wire named `name`, creating it (undetermined) if absent.
    ///
    /// Fails only if the table cannot grow.
    pub fn create(&mut self, name: &str) -> Result<WireId, NetlistError> {
        if let Some(id) = self.lookup(name) {
            return Ok(id);
        }

        self.wires
            .try_reserve(1)
            .map_err(|_| NetlistError::ResourceExhausted { table: "wire" })?;

        let id = WireId(self.wires.len());
        self.wires.push(Wire::new(name, Logic::Unknown));
        self.by_name.insert(name.to_string(), id);
        log::trace!("created wire {:?} = {}", id, name);
        Ok(id)
    }

    /// Find a wire by name.
    pub fn lookup(&self, name: &str) -> Option<WireId> {
        self.by_name.get(name).copied()
    }

    /// Check that `id` belongs to this table.
    pub fn contains(&self, id: WireId) -> bool {
        id.0 < self.wires.len()
    }

    /// Read a wire's level.
    ///
    /// # Panics
    /// Panics if `id` is not from this table.
    #[inline]
    pub fn get(&self, id: WireId) -> Logic {
        self.wires[id.0].value
    }

    /// Drive a wire. Returns true if its level changed.
    ///
    /// # Panics
    /// Panics if `id` is not from this table.
    #[inline]
    pub fn set(&mut self, id: WireId, value: Logic) -> bool {
        debug_assert!(!id.is_constant(), "constant wire {:?} must not be driven", id);
        let wire = &mut self.wires[id.0];
        let changed = wire.value != value;
        wire.value = value;
        changed
    }

    /// Access the full wire record.
    pub fn wire(&self, id: WireId) -> &Wire {
        &self.wires[id.0]
    }

    /// Name of a wire.
    pub fn name(&self, id: WireId) -> &str {
        &self.wires[id.0].name
    }

    /// Flag a wire as an output. The preamble is never flagged.
    pub fn mark_output(&mut self, id: WireId) {
        if !id.is_reserved() {
            self.wires[id.0].is_output = true;
        }
    }

    /// Reset every output-flagged wire to undetermined.
    pub fn reset_outputs(&mut self) {
        for wire in self.wires.iter_mut().filter(|w| w.is_output) {
            wire.value = Logic::Unknown;
        }
    }

    /// True once no output-flagged wire is undetermined.
    pub fn outputs_determined(&self) -> bool {
        self.wires.iter().all(|w| !w.is_output || w.value.is_known())
    }

    /// Names of the output-flagged wires that are still undetermined.
    pub fn undetermined_outputs(&self) -> Vec<String> {
        self.wires
            .iter()
            .filter(|w| w.is_output && !w.value.is_known())
            .map(|w| w.name.clone())
            .collect()
    }

    /// Iterate over all wires with their ids, preamble first.
    pub fn iter(&self) -> impl Iterator<Item = (WireId, &Wire)> {
        self.wires.iter().enumerate().map(|(i, w)| (WireId(i), w))
    }

    /// Number of wires, preamble included.
    pub fn len(&self) -> usize {
        self.wires.len()
    }

    /// Always false: the preamble is present from construction.
    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }
}

impl Default for WireTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WireTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outputs = self.wires.iter().filter(|w| w.is_output).count();

        f.debug_struct("WireTable")
            .field("wires", &self.wires.len())
            .field("output_flagged", &outputs)
            .finish()
    }
}
