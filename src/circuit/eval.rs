//! Single-gate evaluation.
//!
//! Firing a gate reads its operand levels from the wire table and drives
//! its output wires. It never blocks and touches nothing but the gate's own
//! outputs, so firing twice with unchanged inputs is a no-op.

use crate::circuit::{Gate, WireTable};
use crate::logic::{bus_index, Logic};

/// Fire `gate` once against the current wire levels.
///
/// Returns true if any output wire changed level.
pub fn fire(gate: &Gate, wires: &mut WireTable) -> bool {
    match gate {
        Gate::Pass { input, output } => {
            let value = wires.get(*input);
            wires.set(*output, value)
        }

        Gate::Not { input, output } => {
            let value = wires.get(*input).not();
            wires.set(*output, value)
        }

        Gate::Binary { op, a, b, output } => {
            let value = op.apply(wires.get(*a), wires.get(*b));
            wires.set(*output, value)
        }

        Gate::Decoder(dec) => {
            let index = bus_index(dec.select().iter().map(|&s| wires.get(s)));
            let mut changed = false;
            for (line, &output) in dec.outputs().iter().enumerate() {
                let value = match index {
                    Some(selected) => Logic::from_bool(line == selected),
                    None => Logic::Unknown,
                };
                changed |= wires.set(output, value);
            }
            changed
        }

        Gate::Multiplexer(mux) => {
            let value = bus_index(mux.select().iter().map(|&s| wires.get(s)))
                .map_or(Logic::Unknown, |selected| wires.get(mux.data()[selected]));
            wires.set(mux.output(), value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{GateKind, WireId};
    use Logic::{One, Unknown, Zero};

    fn setup(n: usize) -> (WireTable, Vec<WireId>) {
        let mut wires = WireTable::new();
        let ids = (0..n).map(|i| wires.create(&format!("w{}", i)).unwrap()).collect();
        (wires, ids)
    }

    fn gate(kind: GateKind, ops: &[WireId], width: u32) -> Gate {
        Gate::new(kind, ops.to_vec(), width).unwrap()
    }

    #[test]
    fn test_pass_then_not() {
        let (mut wires, w) = setup(3);
        let (x, y, z) = (w[0], w[1], w[2]);
        let pass = gate(GateKind::Pass, &[x, y], 0);
        let not = gate(GateKind::Not, &[y, z], 0);

        wires.set(x, One);
        fire(&pass, &mut wires);
        fire(&not, &mut wires);

        assert_eq!(wires.get(y), One);
        assert_eq!(wires.get(z), Zero);
    }

    #[test]
    fn test_not_propagates_unknown() {
        let (mut wires, w) = setup(2);
        let not = gate(GateKind::Not, &[w[0], w[1]], 0);

        wires.set(w[1], One);
        assert!(fire(&not, &mut wires));
        assert_eq!(wires.get(w[1]), Unknown);
    }

    #[test]
    fn test_binary_gates() {
        let cases = [
            (GateKind::And, [Zero, Zero, Zero, One]),
            (GateKind::Or, [Zero, One, One, One]),
            (GateKind::Xor, [Zero, One, One, Zero]),
            (GateKind::Nand, [One, One, One, Zero]),
            (GateKind::Nor, [One, Zero, Zero, Zero]),
        ];

        for (kind, expected) in cases {
            let (mut wires, w) = setup(3);
            let g = gate(kind, &w, 0);

            for (row, want) in expected.iter().enumerate() {
                wires.set(w[0], Logic::from_bool(row & 2 != 0));
                wires.set(w[1], Logic::from_bool(row & 1 != 0));
                fire(&g, &mut wires);
                assert_eq!(wires.get(w[2]), *want, "{} row {}", kind, row);
            }

            for (a, b) in [(Unknown, Zero), (One, Unknown), (Unknown, Unknown)] {
                wires.set(w[0], a);
                wires.set(w[1], b);
                fire(&g, &mut wires);
                assert_eq!(wires.get(w[2]), Unknown, "{} {:?} {:?}", kind, a, b);
            }
        }
    }

    #[test]
    fn test_decoder_select_msb_first() {
        let (mut wires, w) = setup(6);
        let dec = gate(GateKind::Decoder, &w, 2);

        wires.set(w[0], One);
        wires.set(w[1], Zero);
        fire(&dec, &mut wires);

        let outputs: Vec<Logic> = w[2..].iter().map(|&id| wires.get(id)).collect();
        assert_eq!(outputs, vec![Zero, Zero, One, Zero]);
    }

    #[test]
    fn test_decoder_unknown_select() {
        let (mut wires, w) = setup(6);
        let dec = gate(GateKind::Decoder, &w, 2);

        wires.set(w[0], One);
        fire(&dec, &mut wires);

        assert!(w[2..].iter().all(|&id| wires.get(id) == Unknown));
    }

    #[test]
    fn test_multiplexer_routes_selected_line() {
        let (mut wires, w) = setup(4);
        let (a, b, s, y) = (w[0], w[1], w[2], w[3]);
        let mux = gate(GateKind::Multiplexer, &[a, b, s, y], 1);

        wires.set(a, Zero);
        wires.set(b, One);
        wires.set(s, One);
        fire(&mux, &mut wires);
        assert_eq!(wires.get(y), One);

        wires.set(s, Zero);
        fire(&mux, &mut wires);
        assert_eq!(wires.get(y), Zero);

        wires.set(s, Unknown);
        fire(&mux, &mut wires);
        assert_eq!(wires.get(y), Unknown);
    }

    #[test]
    fn test_multiplexer_passes_unknown_data() {
        let (mut wires, w) = setup(4);
        let mux = gate(GateKind::Multiplexer, &w, 1);

        wires.set(w[0], One);
        wires.set(w[2], One);
        fire(&mux, &mut wires);
        assert_eq!(wires.get(w[3]), Unknown);
    }

    #[test]
    fn test_firing_is_idempotent() {
        let (mut wires, w) = setup(7);
        let mux = gate(GateKind::Multiplexer, &w, 2);
        for (i, &id) in w[..6].iter().enumerate() {
            wires.set(id, Logic::from_bool(i % 2 == 0));
        }

        assert!(fire(&mux, &mut wires));
        let first = wires.get(w[6]);
        assert!(!fire(&mux, &mut wires));
        assert_eq!(wires.get(w[6]), first);
    }
}
