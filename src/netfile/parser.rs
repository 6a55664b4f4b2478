//! Netlist text parser.
//!
//! Syntax (whitespace-separated tokens; line breaks only matter for
//! error messages):
//! ```text
//! INPUT 2 a b
//! OUTPUT 2 sum carry
//! XOR a b sum
//! AND a b carry
//! DECODER 1 a d0 d1
//! MULTIPLEXER 1 d0 d1 b y
//! ```
//! The first two lines are headers: a tag, a wire count, then that many
//! wire names. The tags themselves are not checked. Each gate line is a
//! keyword, a select width for DECODER/MULTIPLEXER, then the operand names
//! in the layout described in [`crate::circuit::gate`].
//!
//! Any wire name seen for the first time is created undetermined; `0`,
//! `1` and `_` are the reserved constant and sink wires.

use crate::circuit::{GateKind, Netlist, NetlistBuilder, NetlistError, WireId};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Parse netlist source text.
pub fn parse_netlist(source: &str) -> Result<Netlist, ParseError> {
    Parser::new(source).parse()
}

/// Read and parse a netlist file.
pub fn load_netlist<P: AsRef<Path>>(path: P) -> Result<Netlist, ParseError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    log::info!("loaded {} ({} bytes)", path.display(), source.len());
    parse_netlist(&source)
}

/// Which header line is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Inputs,
    Outputs,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Inputs => write!(f, "input"),
            Section::Outputs => write!(f, "output"),
        }
    }
}

/// A token with its 1-based source line.
type Token<'a> = (usize, &'a str);

/// The parser state.
struct Parser<'a> {
    tokens: Box<dyn Iterator<Item = Token<'a>> + 'a>,
    /// Line of the most recently consumed token.
    line: usize,
    builder: NetlistBuilder,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        let tokens = source
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |tok| (i + 1, tok)));
        Self {
            tokens: Box::new(tokens),
            line: 1,
            builder: NetlistBuilder::new(),
        }
    }

    fn parse(mut self) -> Result<Netlist, ParseError> {
        let inputs = self.header(Section::Inputs)?;
        let outputs = self.header(Section::Outputs)?;

        while let Some((line, keyword)) = self.next() {
            self.gate(line, keyword)?;
        }

        let line = self.line;
        self.builder
            .finalize(inputs, outputs)
            .map_err(|source| ParseError::Netlist { line, source })
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.next()?;
        self.line = token.0;
        Some(token)
    }

    /// `<tag> <count> <name>...`
    fn header(&mut self, section: Section) -> Result<Vec<WireId>, ParseError> {
        let malformed = |line: usize, message: String| ParseError::MalformedHeader { section, line, message };

        if self.next().is_none() {
            return Err(malformed(self.line, "missing header line".into()));
        }

        let (line, count_tok) = self
            .next()
            .ok_or_else(|| malformed(self.line, "missing wire count".into()))?;
        let count: usize = count_tok
            .parse()
            .map_err(|_| malformed(line, format!("expected a wire count, found '{}'", count_tok)))?;

        let mut wires = Vec::with_capacity(count.min(1024));
        for found in 0..count {
            let (line, name) = self.next().ok_or_else(|| {
                malformed(self.line, format!("expected {} wire names, found {}", count, found))
            })?;
            let id = self
                .builder
                .create_or_get_wire(name)
                .map_err(|source| ParseError::Netlist { line, source })?;
            wires.push(id);
        }

        log::debug!("{} header: {} wires", section, count);
        Ok(wires)
    }

    /// `<KIND> [width] <name>...`
    fn gate(&mut self, line: usize, keyword: &str) -> Result<(), ParseError> {
        let kind = GateKind::from_keyword(keyword).ok_or_else(|| ParseError::UnknownGateKeyword {
            line,
            keyword: keyword.to_string(),
        })?;

        let width = if kind.has_width() {
            let (line, tok) = self.next().ok_or(ParseError::UnexpectedEof { line, kind, expected: 1, found: 0 })?;
            tok.parse::<u32>().map_err(|_| ParseError::InvalidWidth {
                line,
                kind,
                token: tok.to_string(),
            })?
        } else {
            0
        };

        let arity = kind
            .arity(width)
            .map_err(|source| ParseError::Netlist { line, source })?;

        let mut operands = Vec::with_capacity(arity);
        for found in 0..arity {
            let (_, name) = self.next().ok_or(ParseError::UnexpectedEof {
                line,
                kind,
                expected: arity,
                found,
            })?;
            let id = self
                .builder
                .create_or_get_wire(name)
                .map_err(|source| ParseError::Netlist { line: self.line, source })?;
            operands.push(id);
        }

        self.builder
            .append_gate(kind, operands, width)
            .map_err(|source| ParseError::Netlist { line, source })
    }
}

/// Errors that can occur while reading a netlist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("malformed {section} header on line {line}: {message}")]
    MalformedHeader { section: Section, line: usize, message: String },

    #[error("unknown gate keyword on line {line}: {keyword}")]
    UnknownGateKeyword { line: usize, keyword: String },

    #[error("invalid {kind} width on line {line}: {token}")]
    InvalidWidth { line: usize, kind: GateKind, token: String },

    #[error("{kind} on line {line} is truncated: expected {expected} operands, found {found}")]
    UnexpectedEof { line: usize, kind: GateKind, expected: usize, found: usize },

    #[error("line {line}: {source}")]
    Netlist {
        line: usize,
        #[source]
        source: NetlistError,
    },
}

impl ParseError {
    /// True for errors in the two header lines.
    pub fn is_header_error(&self) -> bool {
        matches!(self, ParseError::MalformedHeader { .. })
    }
}
