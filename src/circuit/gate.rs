//! Gate kinds and their operand layouts.
//!
//! | Kind | Operands |
//! |---|---|
//! | PASS, NOT | `in out` |
//! | AND, OR, XOR, NAND, NOR | `a b out` |
//! | DECODER s | `s` select lines, then `2^s` outputs |
//! | MULTIPLEXER s | `2^s` data lines, then `s` select lines, then one output |
//!
//! A [`Gate`] can only be built through a constructor that checks the
//! operand count against the layout, so a decoder always has exactly
//! `2^s` outputs and a multiplexer exactly `2^s` data lines.

use crate::circuit::{NetlistError, WireId};
use crate::logic::Logic;
use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

/// Widest select bus accepted for DECODER and MULTIPLEXER.
pub const MAX_SELECT_WIDTH: u32 = 16;

/// The nine gate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    Pass,
    Not,
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Decoder,
    Multiplexer,
}

impl GateKind {
    /// Every kind, in keyword-table order.
    pub const ALL: [GateKind; 9] = [
        GateKind::Pass,
        GateKind::Not,
        GateKind::And,
        GateKind::Or,
        GateKind::Xor,
        GateKind::Nand,
        GateKind::Nor,
        GateKind::Decoder,
        GateKind::Multiplexer,
    ];

    /// The netlist keyword for this kind.
    pub const fn keyword(self) -> &'static str {
        match self {
            GateKind::Pass => "PASS",
            GateKind::Not => "NOT",
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Xor => "XOR",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
            GateKind::Decoder => "DECODER",
            GateKind::Multiplexer => "MULTIPLEXER",
        }
    }

    /// Look up a kind by its exact (upper-case) keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// True for kinds whose arity depends on a declared select width.
    pub const fn has_width(self) -> bool {
        matches!(self, GateKind::Decoder | GateKind::Multiplexer)
    }

    /// Number of operands a gate of this kind takes.
    ///
    /// `width` is ignored for fixed-arity kinds.
    pub fn arity(self, width: u32) -> Result<usize, NetlistError> {
        match self {
            GateKind::Pass | GateKind::Not => Ok(2),
            GateKind::And | GateKind::Or | GateKind::Xor | GateKind::Nand | GateKind::Nor => Ok(3),
            GateKind::Decoder => Ok(width as usize + lines(self, width)?),
            GateKind::Multiplexer => Ok(width as usize + lines(self, width)? + 1),
        }
    }
}

/// `2^width`, bounded by [`MAX_SELECT_WIDTH`].
fn lines(kind: GateKind, width: u32) -> Result<usize, NetlistError> {
    if width > MAX_SELECT_WIDTH {
        return Err(NetlistError::WidthTooLarge { kind, width, max: MAX_SELECT_WIDTH });
    }
    Ok(1usize << width)
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for GateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(s).ok_or_else(|| s.to_string())
    }
}

/// Two-input Boolean functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
    Nand,
    Nor,
}

impl BinaryOp {
    /// Evaluate on two levels. Unknown in, unknown out.
    #[inline]
    pub const fn apply(self, a: Logic, b: Logic) -> Logic {
        match self {
            BinaryOp::And => a.and(b),
            BinaryOp::Or => a.or(b),
            BinaryOp::Xor => a.xor(b),
            BinaryOp::Nand => a.nand(b),
            BinaryOp::Nor => a.nor(b),
        }
    }

    /// The gate kind this function implements.
    pub const fn kind(self) -> GateKind {
        match self {
            BinaryOp::And => GateKind::And,
            BinaryOp::Or => GateKind::Or,
            BinaryOp::Xor => GateKind::Xor,
            BinaryOp::Nand => GateKind::Nand,
            BinaryOp::Nor => GateKind::Nor,
        }
    }
}

/// A `s`-to-`2^s` line decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoder {
    select: Vec<WireId>,
    outputs: Vec<WireId>,
}

impl Decoder {
    /// Build from select lines (MSB first) and `2^select.len()` outputs.
    pub fn new(select: Vec<WireId>, outputs: Vec<WireId>) -> Result<Self, NetlistError> {
        let width = select_width(GateKind::Decoder, &select)?;
        let expected = lines(GateKind::Decoder, width)?;
        if outputs.len() != expected {
            return Err(NetlistError::ArityMismatch {
                kind: GateKind::Decoder,
                expected: width as usize + expected,
                found: select.len() + outputs.len(),
            });
        }
        Ok(Self { select, outputs })
    }

    /// Select lines, MSB first.
    pub fn select(&self) -> &[WireId] {
        &self.select
    }

    /// Output lines; `outputs()[i]` is high when the select bus reads `i`.
    pub fn outputs(&self) -> &[WireId] {
        &self.outputs
    }

    /// Number of select lines.
    pub fn width(&self) -> u32 {
        self.select.len() as u32
    }
}

/// A `2^s`-to-1 multiplexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multiplexer {
    data: Vec<WireId>,
    select: Vec<WireId>,
    output: WireId,
}

impl Multiplexer {
    /// Build from `2^select.len()` data lines, select lines (MSB first), and
    /// the output.
    pub fn new(data: Vec<WireId>, select: Vec<WireId>, output: WireId) -> Result<Self, NetlistError> {
        let width = select_width(GateKind::Multiplexer, &select)?;
        let expected = lines(GateKind::Multiplexer, width)?;
        if data.len() != expected {
            return Err(NetlistError::ArityMismatch {
                kind: GateKind::Multiplexer,
                expected: width as usize + expected + 1,
                found: data.len() + select.len() + 1,
            });
        }
        Ok(Self { data, select, output })
    }

    /// Data lines; `data()[i]` is routed when the select bus reads `i`.
    pub fn data(&self) -> &[WireId] {
        &self.data
    }

    /// Select lines, MSB first.
    pub fn select(&self) -> &[WireId] {
        &self.select
    }

    /// The routed output.
    pub fn output(&self) -> WireId {
        self.output
    }

    /// Number of select lines.
    pub fn width(&self) -> u32 {
        self.select.len() as u32
    }
}

fn binary(op: BinaryOp, operands: &[WireId]) -> Gate {
    Gate::Binary { op, a: operands[0], b: operands[1], output: operands[2] }
}

fn select_width(kind: GateKind, select: &[WireId]) -> Result<u32, NetlistError> {
    let width = u32::try_from(select.len()).unwrap_or(u32::MAX);
    lines(kind, width)?;
    Ok(width)
}

/// A gate with its operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Buffer: `output := input`.
    Pass { input: WireId, output: WireId },
    /// Inverter.
    Not { input: WireId, output: WireId },
    /// AND/OR/XOR/NAND/NOR.
    Binary { op: BinaryOp, a: WireId, b: WireId, output: WireId },
    Decoder(Decoder),
    Multiplexer(Multiplexer),
}

impl Gate {
    /// Build a gate from a flat operand list laid out as in the module
    /// table. `width` is only read for DECODER and MULTIPLEXER.
    pub fn new(kind: GateKind, mut operands: Vec<WireId>, width: u32) -> Result<Self, NetlistError> {
        let expected = kind.arity(width)?;
        if operands.len() != expected {
            return Err(NetlistError::ArityMismatch { kind, expected, found: operands.len() });
        }

        let gate = match kind {
            GateKind::Pass => Gate::Pass { input: operands[0], output: operands[1] },
            GateKind::Not => Gate::Not { input: operands[0], output: operands[1] },
            GateKind::And => binary(BinaryOp::And, &operands),
            GateKind::Or => binary(BinaryOp::Or, &operands),
            GateKind::Xor => binary(BinaryOp::Xor, &operands),
            GateKind::Nand => binary(BinaryOp::Nand, &operands),
            GateKind::Nor => binary(BinaryOp::Nor, &operands),
            GateKind::Decoder => {
                let outputs = operands.split_off(width as usize);
                Gate::Decoder(Decoder::new(operands, outputs)?)
            }
            GateKind::Multiplexer => {
                let mut select = operands.split_off(expected - width as usize - 1);
                let output = select.pop().ok_or(NetlistError::ArityMismatch {
                    kind,
                    expected,
                    found: 0,
                })?;
                Gate::Multiplexer(Multiplexer::new(operands, select, output)?)
            }
        };
        Ok(gate)
    }

    /// The gate's kind.
    pub fn kind(&self) -> GateKind {
        match self {
            Gate::Pass { .. } => GateKind::Pass,
            Gate::Not { .. } => GateKind::Not,
            Gate::Binary { op, .. } => op.kind(),
            Gate::Decoder(_) => GateKind::Decoder,
            Gate::Multiplexer(_) => GateKind::Multiplexer,
        }
    }

    /// Select width for DECODER/MULTIPLEXER.
    pub fn width(&self) -> Option<u32> {
        match self {
            Gate::Decoder(dec) => Some(dec.width()),
            Gate::Multiplexer(mux) => Some(mux.width()),
            _ => None,
        }
    }

    /// The wires this gate drives.
    pub fn outputs(&self) -> &[WireId] {
        match self {
            Gate::Pass { output, .. } | Gate::Not { output, .. } | Gate::Binary { output, .. } => {
                std::slice::from_ref(output)
            }
            Gate::Decoder(dec) => dec.outputs(),
            Gate::Multiplexer(mux) => std::slice::from_ref(&mux.output),
        }
    }

    /// The wires this gate reads.
    pub fn inputs(&self) -> Vec<WireId> {
        match self {
            Gate::Pass { input, .. } | Gate::Not { input, .. } => vec![*input],
            Gate::Binary { a, b, .. } => vec![*a, *b],
            Gate::Decoder(dec) => dec.select.clone(),
            Gate::Multiplexer(mux) => mux.data.iter().chain(&mux.select).copied().collect(),
        }
    }

    /// All operands in declaration layout, as accepted by [`Gate::new`].
    pub fn operands(&self) -> Vec<WireId> {
        match self {
            Gate::Pass { input, output } | Gate::Not { input, output } => vec![*input, *output],
            Gate::Binary { a, b, output, .. } => vec![*a, *b, *output],
            Gate::Decoder(dec) => dec.select.iter().chain(&dec.outputs).copied().collect(),
            Gate::Multiplexer(mux) => mux
                .data
                .iter()
                .chain(&mux.select)
                .chain(std::iter::once(&mux.output))
                .copied()
                .collect(),
        }
    }
}
