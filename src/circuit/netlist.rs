//! Netlist construction.
//!
//! A [`Netlist`] is assembled through [`NetlistBuilder`], which exposes the
//! three construction operations a front end needs:
//! - [`NetlistBuilder::create_or_get_wire`] - resolve a wire name to an id
//! - [`NetlistBuilder::append_gate`] - validate and append a gate
//! - [`NetlistBuilder::finalize`] - designate inputs and outputs
//!
//! Once finalized the structure is frozen; simulation only changes wire
//! levels.

use crate::circuit::{Gate, GateKind, WireId, WireTable};
use std::collections::HashSet;
use thiserror::Error;

/// A finalized gate-level netlist.
#[derive(Debug, Clone)]
pub struct Netlist {
    pub(crate) gates: Vec<Gate>,
    pub(crate) wires: WireTable,
    pub(crate) inputs: Vec<WireId>,
    pub(crate) outputs: Vec<WireId>,
}

impl Netlist {
    /// Gates in declaration (evaluation) order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// The wire table.
    pub fn wires(&self) -> &WireTable {
        &self.wires
    }

    /// Input wires, in declaration order. The last one is the least
    /// significant bit of the enumeration counter.
    pub fn inputs(&self) -> &[WireId] {
        &self.inputs
    }

    /// Reported output wires, in declaration order.
    pub fn outputs(&self) -> &[WireId] {
        &self.outputs
    }

    /// Names of the input wires.
    pub fn input_names(&self) -> Vec<String> {
        self.inputs.iter().map(|&id| self.wires.name(id).to_string()).collect()
    }

    /// Names of the output wires.
    pub fn output_names(&self) -> Vec<String> {
        self.outputs.iter().map(|&id| self.wires.name(id).to_string()).collect()
    }
}

/// Incrementally builds a [`Netlist`].
#[derive(Debug, Default)]
pub struct NetlistBuilder {
    wires: WireTable,
    gates: Vec<Gate>,
}

impl NetlistBuilder {
    /// Start with only the reserved wires.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `name`, creating an undetermined wire on first sight.
    pub fn create_or_get_wire(&mut self, name: &str) -> Result<WireId, NetlistError> {
        self.wires.create(name)
    }

    /// Validate a gate and append it to the evaluation order.
    ///
    /// Every wire the gate drives is flagged as an output so that it is
    /// reset before each row is settled.
    pub fn append_gate(
        &mut self,
        kind: GateKind,
        operands: Vec<WireId>,
        width: u32,
    ) -> Result<(), NetlistError> {
        if let Some(&unknown) = operands.iter().find(|&&id| !self.wires.contains(id)) {
            return Err(NetlistError::UnknownWire(unknown.index()));
        }

        let gate = Gate::new(kind, operands, width)?;

        // The sink is never reset between rows, so reading it would leak
        // a level from the previous row.
        if gate.inputs().contains(&WireId::SINK) {
            return Err(NetlistError::SinkRead { kind });
        }

        if let Some(&driven) = gate.outputs().iter().find(|id| id.is_constant()) {
            return Err(NetlistError::ConstantDriven {
                kind,
                name: self.wires.name(driven).to_string(),
            });
        }

        self.push_gate(gate)
    }

    fn push_gate(&mut self, gate: Gate) -> Result<(), NetlistError> {
        self.gates
            .try_reserve(1)
            .map_err(|_| NetlistError::ResourceExhausted { table: "gate" })?;

        for &output in gate.outputs() {
            self.wires.mark_output(output);
        }

        log::debug!("gate #{}: {} {:?}", self.gates.len(), gate.kind(), gate.operands());
        self.gates.push(gate);
        Ok(())
    }

    /// Designate inputs and outputs and freeze the netlist.
    ///
    /// Inputs must be distinct, non-reserved, and not driven by any gate.
    /// Outputs must be non-reserved; they are flagged so the settler waits
    /// for them.
    pub fn finalize(
        mut self,
        inputs: Vec<WireId>,
        outputs: Vec<WireId>,
    ) -> Result<Netlist, NetlistError> {
        if let Some(&unknown) = inputs.iter().chain(&outputs).find(|&&id| !self.wires.contains(id)) {
            return Err(NetlistError::UnknownWire(unknown.index()));
        }

        let mut seen = HashSet::new();
        for &input in &inputs {
            let name = self.wires.name(input).to_string();
            if input.is_reserved() {
                return Err(NetlistError::ReservedInput { name });
            }
            if !seen.insert(input) {
                return Err(NetlistError::DuplicateInput { name });
            }
        }

        for gate in &self.gates {
            if let Some(&driven) = gate.outputs().iter().find(|&&id| seen.contains(&id)) {
                return Err(NetlistError::DrivenInput {
                    kind: gate.kind(),
                    name: self.wires.name(driven).to_string(),
                });
            }
        }

        if let Some(&reserved) = outputs.iter().find(|id| id.is_reserved()) {
            return Err(NetlistError::ReservedOutput {
                name: self.wires.name(reserved).to_string(),
            });
        }

        if let Some(&both) = outputs.iter().find(|&&id| seen.contains(&id)) {
            return Err(NetlistError::InputMarkedOutput {
                name: self.wires.name(both).to_string(),
            });
        }

        for &output in &outputs {
            self.wires.mark_output(output);
        }

        self.warn_undriven(&seen);

        log::debug!(
            "netlist finalized: {} wires, {} gates, {} inputs, {} outputs",
            self.wires.len(),
            self.gates.len(),
            inputs.len(),
            outputs.len()
        );

        Ok(Netlist {
            gates: self.gates,
            wires: self.wires,
            inputs,
            outputs,
        })
    }

    /// Output-flagged wires nobody drives can never settle.
    fn warn_undriven(&self, inputs: &HashSet<WireId>) {
        let driven: HashSet<WireId> = self
            .gates
            .iter()
            .flat_map(|g| g.outputs().iter().copied())
            .collect();

        for (id, wire) in self.wires.iter() {
            if !id.is_reserved() && !driven.contains(&id) && !inputs.contains(&id) {
                if wire.is_output {
                    log::warn!("output '{}' is not driven by any gate", wire.name);
                } else {
                    log::warn!("wire '{}' is never driven and will stay undetermined", wire.name);
                }
            }
        }
    }
}

/// Errors raised while building a netlist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetlistError {
    #[error("{kind} expects {expected} operands, found {found}")]
    ArityMismatch { kind: GateKind, expected: usize, found: usize },

    #[error("{kind} select width {width} exceeds the maximum of {max}")]
    WidthTooLarge { kind: GateKind, width: u32, max: u32 },

    #[error("wire index {0} does not exist")]
    UnknownWire(usize),

    #[error("{kind} gate drives constant wire '{name}'")]
    ConstantDriven { kind: GateKind, name: String },

    #[error("{kind} gate drives input wire '{name}'")]
    DrivenInput { kind: GateKind, name: String },

    #[error("reserved wire '{name}' cannot be an input")]
    ReservedInput { name: String },

    #[error("reserved wire '{name}' cannot be an output")]
    ReservedOutput { name: String },

    #[error("{kind} gate reads the sink wire '_'")]
    SinkRead { kind: GateKind },

    #[error("input '{name}' is declared more than once")]
    DuplicateInput { name: String },

    #[error("wire '{name}' is declared both as input and output")]
    InputMarkedOutput { name: String },

    #[error("out of memory while growing the {table} table")]
    ResourceExhausted { table: &'static str },
}
