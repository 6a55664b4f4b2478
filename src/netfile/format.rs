//! Rendering truth tables and netlists as text.

use crate::circuit::{Gate, Netlist, Row, TruthTable};

/// Format one row: each input followed by a space, then `|`, then each
/// output preceded by a space.
///
/// ```text
/// 0 1 | 1 0
/// ```
pub fn format_row(row: &Row) -> String {
    let mut line = String::new();
    for value in &row.inputs {
        line.push_str(&format!("{} ", value));
    }
    line.push('|');
    for value in &row.outputs {
        line.push_str(&format!(" {}", value));
    }
    line
}

/// Format a whole table, one row per line.
pub fn format_table(table: &TruthTable) -> String {
    let mut output = String::new();
    for row in &table.rows {
        output.push_str(&format_row(row));
        output.push('\n');
    }
    output
}

/// Render a table as pretty-printed JSON.
pub fn table_to_json(table: &TruthTable) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(table)
}

/// Format a single gate as a netlist declaration.
pub fn format_gate(gate: &Gate, netlist: &Netlist) -> String {
    let mut line = gate.kind().keyword().to_string();
    if let Some(width) = gate.width() {
        line.push_str(&format!(" {}", width));
    }
    for id in gate.operands() {
        line.push(' ');
        line.push_str(netlist.wires().name(id));
    }
    line
}

/// Describe a netlist in canonical text form.
///
/// The result parses back into an equivalent netlist.
pub fn describe(netlist: &Netlist) -> String {
    let mut output = String::new();

    let inputs = netlist.input_names();
    output.push_str(&format!("INPUT {}", inputs.len()));
    for name in &inputs {
        output.push_str(&format!(" {}", name));
    }
    output.push('\n');

    let outputs = netlist.output_names();
    output.push_str(&format!("OUTPUT {}", outputs.len()));
    for name in &outputs {
        output.push_str(&format!(" {}", name));
    }
    output.push('\n');

    for gate in netlist.gates() {
        output.push_str(&format_gate(gate, netlist));
        output.push('\n');
    }

    output
}
