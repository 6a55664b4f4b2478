//! Settle-then-enumerate simulation.
//!
//! For every input assignment, in ascending binary order with the last
//! declared input as the least significant bit:
//! 1. drive the input wires,
//! 2. reset every output-flagged wire to undetermined,
//! 3. fire all gates in declaration order, pass after pass, until every
//!    output-flagged wire is determined,
//! 4. read the declared outputs into a [`Row`].
//!
//! Step 3 has no dependency analysis. Repeated passes reach the fixed point
//! for any acyclic netlist within one pass per gate. A netlist that cannot
//! settle is reported as [`SimError::NonTerminating`].

use crate::circuit::{eval, Netlist, WireId, WireTable};
use crate::logic::{bus_index, Logic};
use serde::{Serialize, Deserialize};
use std::fmt;
use thiserror::Error;

/// Simulation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Most full passes allowed per row. `None` uses the gate count plus
    /// one, which is enough for any acyclic netlist.
    pub max_passes: Option<usize>,
}

/// Enumeration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimState {
    /// More rows remain.
    Running,
    /// Every assignment has been emitted.
    Finished,
    /// A row failed to settle.
    Failed,
}

/// Why a settle loop gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NonTermination {
    /// A full pass changed nothing while outputs were still undetermined.
    Stalled,
    /// The pass limit was reached while wires were still changing.
    PassLimit,
}

impl fmt::Display for NonTermination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonTermination::Stalled => write!(f, "no progress"),
            NonTermination::PassLimit => write!(f, "pass limit reached"),
        }
    }
}

/// One line of the truth table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Input levels, in declaration order.
    pub inputs: Vec<Logic>,
    /// Output levels, in declaration order.
    pub outputs: Vec<Logic>,
}

impl Row {
    /// The input assignment read as a binary number, last input as LSB.
    pub fn index(&self) -> Option<usize> {
        bus_index(self.inputs.iter().copied())
    }
}

/// A complete truth table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthTable {
    /// Input wire names.
    pub inputs: Vec<String>,
    /// Output wire names.
    pub outputs: Vec<String>,
    /// One row per input assignment, ascending.
    pub rows: Vec<Row>,
}

/// Drives a netlist through every input assignment.
pub struct Simulator {
    netlist: Netlist,
    config: SimConfig,
    state: SimState,
    /// Rows emitted so far.
    pub rows_emitted: u64,
    /// Settle passes run so far, over all rows.
    pub total_passes: u64,
}

impl Simulator {
    /// Take ownership of `netlist` and position at the all-zero assignment.
    pub fn new(netlist: Netlist) -> Self {
        Self::with_config(netlist, SimConfig::default())
    }

    /// Like [`Simulator::new`], with explicit options.
    pub fn with_config(netlist: Netlist, config: SimConfig) -> Self {
        let mut sim = Self {
            netlist,
            config,
            state: SimState::Running,
            rows_emitted: 0,
            total_passes: 0,
        };
        sim.reset();
        sim
    }

    /// Rewind to the all-zero assignment.
    pub fn reset(&mut self) {
        for &input in &self.netlist.inputs {
            self.netlist.wires.set(input, Logic::Zero);
        }
        self.netlist.wires.reset_outputs();
        self.state = SimState::Running;
        self.rows_emitted = 0;
        self.total_passes = 0;
    }

    /// The simulated netlist, with current wire levels.
    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    /// Give the netlist back.
    pub fn into_netlist(self) -> Netlist {
        self.netlist
    }

    /// Current state.
    pub fn state(&self) -> SimState {
        self.state
    }

    /// Check if more rows remain.
    pub fn is_running(&self) -> bool {
        self.state == SimState::Running
    }

    /// Total rows the enumeration produces (`2^inputs`), if it fits a u64.
    pub fn row_count(&self) -> Option<u64> {
        1u64.checked_shl(self.netlist.inputs.len() as u32)
    }

    /// Per-row pass limit in effect.
    pub fn pass_limit(&self) -> usize {
        self.config
            .max_passes
            .unwrap_or(self.netlist.gates.len() + 1)
            .max(1)
    }

    /// Fire every gate, pass after pass, until all output-flagged wires are
    /// determined.
    ///
    /// Returns the number of passes run.
    pub fn settle(&mut self) -> Result<usize, SimError> {
        let limit = self.pass_limit();
        let Netlist { gates, wires, .. } = &mut self.netlist;
        let mut passes = 0;

        while !wires.outputs_determined() {
            if passes == limit {
                return Err(non_terminating(NonTermination::PassLimit, passes, wires));
            }

            let mut changed = false;
            for gate in gates.iter() {
                changed |= eval::fire(gate, wires);
            }
            passes += 1;
            log::trace!("pass {}: changed={}", passes, changed);

            if !changed && !wires.outputs_determined() {
                return Err(non_terminating(NonTermination::Stalled, passes, wires));
            }
        }

        Ok(passes)
    }

    /// Settle the current assignment, emit its row, and advance the
    /// counter.
    pub fn step(&mut self) -> Result<Row, SimError> {
        if self.state != SimState::Running {
            return Err(SimError::NotRunning(self.state));
        }

        self.netlist.wires.reset_outputs();
        let passes = match self.settle() {
            Ok(passes) => passes,
            Err(e) => {
                self.state = SimState::Failed;
                return Err(e);
            }
        };

        let row = self.current_row();
        log::debug!("row {} settled in {} passes", self.rows_emitted, passes);
        self.rows_emitted += 1;
        self.total_passes += passes as u64;

        if !advance_inputs(&mut self.netlist.wires, &self.netlist.inputs) {
            self.state = SimState::Finished;
        }

        Ok(row)
    }

    /// Iterate over the remaining rows. Stops after the first error.
    pub fn rows(&mut self) -> Rows<'_> {
        Rows { sim: self }
    }

    /// Run the remaining enumeration and collect the table.
    pub fn run(&mut self) -> Result<TruthTable, SimError> {
        let rows = self.rows().collect::<Result<Vec<_>, _>>()?;
        Ok(TruthTable {
            inputs: self.netlist.input_names(),
            outputs: self.netlist.output_names(),
            rows,
        })
    }

    /// Settle a single explicit assignment without touching the
    /// enumeration counter's progress.
    ///
    /// `inputs` must have one determined level per input wire.
    pub fn evaluate(&mut self, inputs: &[Logic]) -> Result<Row, SimError> {
        if inputs.len() != self.netlist.inputs.len() {
            return Err(SimError::BadAssignment {
                expected: self.netlist.inputs.len(),
                found: inputs.len(),
            });
        }
        if let Some(i) = inputs.iter().position(|v| !v.is_known()) {
            return Err(SimError::UndeterminedInput {
                name: self.netlist.wires.name(self.netlist.inputs[i]).to_string(),
            });
        }

        let saved: Vec<Logic> = self.netlist.inputs.iter().map(|&id| self.netlist.wires.get(id)).collect();

        for (&id, &value) in self.netlist.inputs.iter().zip(inputs) {
            self.netlist.wires.set(id, value);
        }
        self.netlist.wires.reset_outputs();
        let result = self.settle().map(|_| self.current_row());

        for (&id, value) in self.netlist.inputs.iter().zip(saved) {
            self.netlist.wires.set(id, value);
        }
        result
    }

    fn current_row(&self) -> Row {
        let wires = &self.netlist.wires;
        Row {
            inputs: self.netlist.inputs.iter().map(|&id| wires.get(id)).collect(),
            outputs: self.netlist.outputs.iter().map(|&id| wires.get(id)).collect(),
        }
    }
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("state", &self.state)
            .field("rows_emitted", &self.rows_emitted)
            .field("total_passes", &self.total_passes)
            .field("gates", &self.netlist.gates.len())
            .finish()
    }
}

fn non_terminating(cause: NonTermination, passes: usize, wires: &WireTable) -> SimError {
    SimError::NonTerminating {
        cause,
        passes,
        undetermined: wires.undetermined_outputs(),
    }
}

/// Advance the input counter by one, last input as LSB.
///
/// Returns false once every input wraps back to 0, which ends the
/// enumeration.
pub fn advance_inputs(wires: &mut WireTable, inputs: &[WireId]) -> bool {
    for &input in inputs.iter().rev() {
        if wires.get(input) == Logic::Zero {
            wires.set(input, Logic::One);
            return true;
        }
        wires.set(input, Logic::Zero);
    }
    false
}

/// Iterator over the remaining rows of a [`Simulator`].
pub struct Rows<'a> {
    sim: &'a mut Simulator,
}

impl Iterator for Rows<'_> {
    type Item = Result<Row, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.sim.is_running() {
            Some(self.sim.step())
        } else {
            None
        }
    }
}

/// Errors that can occur during simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("netlist does not settle ({cause} after {passes} passes); undetermined: {}", .undetermined.join(", "))]
    NonTerminating {
        cause: NonTermination,
        passes: usize,
        undetermined: Vec<String>,
    },

    #[error("simulation not running: {0:?}")]
    NotRunning(SimState),

    #[error("assignment needs {expected} levels, got {found}")]
    BadAssignment { expected: usize, found: usize },

    #[error("input '{name}' must be assigned 0 or 1")]
    UndeterminedInput { name: String },
}
