//! End-to-end runs over the sample circuits in `circuits/`.

use truthtable::circuit::NonTermination;
use truthtable::logic::bus_index;
use truthtable::{
    describe, format_table, load_netlist, parse_netlist, table_to_json, Logic, SimError, SimState,
    Simulator, TruthTable,
};

const HALF_ADDER: &str = include_str!("../circuits/half_adder.net");
const FULL_ADDER: &str = include_str!("../circuits/full_adder.net");
const MAJORITY: &str = include_str!("../circuits/majority.net");
const DECODER2: &str = include_str!("../circuits/decoder2.net");
const MUX4: &str = include_str!("../circuits/mux4.net");
const FEEDBACK: &str = include_str!("../circuits/feedback.net");

fn table(source: &str) -> TruthTable {
    Simulator::new(parse_netlist(source).unwrap()).run().unwrap()
}

fn ones(levels: &[Logic]) -> usize {
    levels.iter().filter(|&&v| v == Logic::One).count()
}

#[test]
fn test_half_adder_text() {
    assert_eq!(
        format_table(&table(HALF_ADDER)),
        "0 0 | 0 0\n0 1 | 1 0\n1 0 | 1 0\n1 1 | 0 1\n"
    );
}

#[test]
fn test_rows_ascend_in_binary() {
    let table = table(FULL_ADDER);
    assert_eq!(table.rows.len(), 8);
    for (i, row) in table.rows.iter().enumerate() {
        assert_eq!(row.index(), Some(i));
    }
}

#[test]
fn test_full_adder_adds() {
    for row in table(FULL_ADDER).rows {
        let total = ones(&row.inputs);
        // outputs are sum, cout; read cout as the high bit.
        let got = bus_index([row.outputs[1], row.outputs[0]]).unwrap();
        assert_eq!(got, total, "row {:?}", row);
    }
}

#[test]
fn test_gates_declared_out_of_order() {
    for row in table(MAJORITY).rows {
        let expected = Logic::from_bool(ones(&row.inputs) >= 2);
        assert_eq!(row.outputs, vec![expected], "row {:?}", row);
    }
}

#[test]
fn test_decoder_is_one_hot() {
    for row in table(DECODER2).rows {
        let selected = row.index().unwrap();
        for (i, &level) in row.outputs.iter().enumerate() {
            assert_eq!(level, Logic::from_bool(i == selected));
        }
    }
}

#[test]
fn test_multiplexer_selects_data() {
    let table = table(MUX4);
    assert_eq!(table.rows.len(), 64);
    for row in table.rows {
        let select = bus_index(row.inputs[..2].iter().copied()).unwrap();
        assert_eq!(row.outputs, vec![row.inputs[2 + select]]);
    }
}

#[test]
fn test_feedback_reports_non_termination() {
    let mut sim = Simulator::new(parse_netlist(FEEDBACK).unwrap());
    let err = sim.run().unwrap_err();

    match err {
        SimError::NonTerminating { cause, undetermined, .. } => {
            assert_eq!(cause, NonTermination::Stalled);
            assert_eq!(undetermined, vec!["q"]);
        }
        other => panic!("expected non-termination, got {:?}", other),
    }
    assert_eq!(sim.state(), SimState::Failed);
    assert_eq!(sim.rows_emitted, 0);
}

#[test]
fn test_streaming_matches_run() {
    let net = parse_netlist(FULL_ADDER).unwrap();
    let mut sim = Simulator::new(net);
    let streamed: Vec<_> = sim.rows().map(Result::unwrap).collect();
    assert_eq!(sim.state(), SimState::Finished);

    sim.reset();
    assert_eq!(sim.run().unwrap().rows, streamed);
}

#[test]
fn test_describe_round_trips_samples() {
    for source in [HALF_ADDER, FULL_ADDER, MAJORITY, DECODER2, MUX4] {
        let net = parse_netlist(source).unwrap();
        let again = parse_netlist(&describe(&net)).unwrap();
        assert_eq!(again.gates(), net.gates());
        assert_eq!(table(&describe(&net)), table(source));
    }
}

#[test]
fn test_json_document() {
    let json = table_to_json(&table(HALF_ADDER)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["inputs"], serde_json::json!(["a", "b"]));
    assert_eq!(value["outputs"], serde_json::json!(["sum", "carry"]));
    assert_eq!(value["rows"][3], serde_json::json!({"inputs": [1, 1], "outputs": [0, 1]}));
}

#[test]
fn test_load_from_disk() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/circuits/half_adder.net");
    let net = load_netlist(path).unwrap();
    assert_eq!(net.input_names(), vec!["a", "b"]);
}
