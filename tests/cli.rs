//! Runs the `truthtable` binary against the sample circuits.

use std::process::{Command, Output};

fn truthtable(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_truthtable"))
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_prints_rows() {
    let output = truthtable(&["circuits/half_adder.net"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "0 0 | 0 0\n0 1 | 1 0\n1 0 | 1 0\n1 1 | 0 1\n");
}

#[test]
fn test_json_format() {
    let output = truthtable(&["--format", "json", "circuits/half_adder.net"]);
    assert_eq!(output.status.code(), Some(0));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["rows"].as_array().map(Vec::len), Some(4));
}

#[test]
fn test_missing_argument_exits_1() {
    let output = truthtable(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_help_exits_0() {
    let output = truthtable(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("--max-passes"));
}

#[test]
fn test_unreadable_file_exits_1() {
    let output = truthtable(&["circuits/does_not_exist.net"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cannot read"));
}

#[test]
fn test_non_terminating_exits_1() {
    let output = truthtable(&["circuits/feedback.net"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("does not settle"));
}

#[test]
fn test_max_passes_overrides_limit() {
    // The majority circuit needs more than one pass per row.
    let output = truthtable(&["circuits/majority.net"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).lines().count(), 8);

    let output = truthtable(&["--max-passes", "1", "circuits/majority.net"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("pass limit reached after 1 passes"));
}

#[test]
fn test_dump_goes_to_stderr() {
    let output = truthtable(&["--dump", "circuits/half_adder.net"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stderr(&output),
        "INPUT 2 a b\nOUTPUT 2 sum carry\nXOR a b sum\nAND a b carry\n"
    );
    assert_eq!(stdout(&output).lines().count(), 4);
}
