//! Loader Tests.
//!
//! Reads trace and configuration documents from disk and checks the error
//! variants reported for missing, malformed and invalid inputs.

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;
use tinyrv_core::FuType;
use tinyrv_core::common::SimError;
use tinyrv_core::sim::loader::{TraceFile, load_config, load_trace_file, parse_trace};

use crate::common::builder::add;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_a_trace_file() {
    let file = write_temp(
        r#"{
            "exit_code": 5,
            "instructions": [
                { "pc": 256, "next_pc": 260, "rd": 1, "rs1": 2, "wb": true },
                { "pc": 260, "next_pc": 512, "rs1": 1, "fu": "ALU", "control_flow": true },
                { "pc": 512, "next_pc": 516, "rs1": 1, "fu": "Lsu" }
            ]
        }"#,
    );
    let trace = load_trace_file(file.path()).unwrap();
    assert_eq!(trace.exit_code, 5);
    assert_eq!(trace.instructions.len(), 3);
    assert_eq!(trace.instructions[0], add(256, 1, 2, 0));
    assert!(trace.instructions[1].taken());
    assert_eq!(trace.instructions[2].fu, FuType::Lsu);
}

#[test]
fn serialized_trace_loads_back() {
    let original = TraceFile {
        exit_code: 0,
        instructions: vec![add(0x100, 1, 0, 0), add(0x104, 2, 1, 1)],
    };
    let file = write_temp(&serde_json::to_string(&original).unwrap());
    assert_eq!(load_trace_file(file.path()).unwrap(), original);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    match load_trace_file(&path) {
        Err(SimError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn malformed_trace_is_a_json_error() {
    let file = write_temp(r#"{ "instructions": [ { "pc": "oops" } ] }"#);
    assert!(matches!(load_trace_file(file.path()), Err(SimError::Json(_))));
}

#[test]
fn out_of_range_destination_is_rejected() {
    let file = write_temp(
        r#"{
            "instructions": [
                { "pc": 256, "next_pc": 260, "rd": 1, "wb": true },
                { "pc": 260, "next_pc": 264, "rd": 40, "rs1": 1, "rs2": 2, "wb": true }
            ]
        }"#,
    );
    match load_trace_file(file.path()) {
        Err(SimError::InvalidRegister { index, reg }) => {
            assert_eq!(index, 1);
            assert_eq!(reg, 40);
        }
        other => panic!("expected InvalidRegister, got {other:?}"),
    }
}

#[test]
fn out_of_range_source_is_rejected() {
    let json = r#"{ "instructions": [ { "pc": 0, "next_pc": 4, "rs2": 32 } ] }"#;
    assert!(matches!(
        parse_trace(json),
        Err(SimError::InvalidRegister { index: 0, reg: 32 })
    ));
}

#[test]
fn highest_register_is_accepted() {
    let json = r#"{ "instructions": [ { "pc": 0, "next_pc": 4, "rd": 31, "rs1": 31, "rs2": 31, "wb": true } ] }"#;
    assert_eq!(parse_trace(json).unwrap().instructions[0].rd, 31);
}

#[test]
fn config_file_is_validated() {
    let good = write_temp(r#"{ "pipeline": { "rob_size": 4 } }"#);
    assert_eq!(load_config(good.path()).unwrap().pipeline.rob_size, 4);

    let bad = write_temp(r#"{ "pipeline": { "latency": { "alu": 0 } } }"#);
    assert!(matches!(load_config(bad.path()), Err(SimError::Config(_))));
}
