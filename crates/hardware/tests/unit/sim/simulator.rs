//! Simulator Loop Tests.
//!
//! End-to-end runs through `Simulator`: exit codes, cycle limits and the
//! per-cycle observer.

use tinyrv_core::Simulator;
use tinyrv_core::common::SimError;
use tinyrv_core::config::Config;
use tinyrv_core::sim::emulator::TraceEmulator;
use tinyrv_core::sim::loader::TraceFile;

use crate::common::builder::{add, config, independent_alu, uniform_latency};

#[test]
fn returns_the_exit_code_once_drained() {
    let file = TraceFile {
        exit_code: 3,
        instructions: vec![add(0x100, 1, 0, 0), add(0x104, 2, 1, 0)],
    };
    let mut sim = Simulator::new(
        &config(4, 4, uniform_latency(1)),
        Box::new(TraceEmulator::from(file)),
    )
    .unwrap();
    assert_eq!(sim.run(), Some(3));
    assert_eq!(sim.cpu.stats.instructions_retired, 2);
    assert_eq!(sim.cpu.stats.perf_line(), "PERF: instrs=2, cycles=5");
}

#[test]
fn cycle_limit_stops_an_unfinished_run() {
    let mut cfg = config(4, 4, uniform_latency(1));
    cfg.general.max_cycles = Some(5);
    let mut sim = Simulator::new(&cfg, Box::new(TraceEmulator::new(independent_alu(20), 0))).unwrap();

    assert_eq!(sim.run(), None);
    assert_eq!(sim.cpu.stats.cycles, 5);
    assert!(sim.finished());
}

#[test]
fn observer_sees_every_cycle() {
    let mut sim = Simulator::new(
        &config(2, 2, uniform_latency(1)),
        Box::new(TraceEmulator::new(independent_alu(4), 0)),
    )
    .unwrap();

    let mut seen = Vec::new();
    let exit = sim.run_with(|cpu| seen.push((cpu.stats.cycles, cpu.snapshot().rob.len())));
    assert_eq!(exit, Some(0));
    assert_eq!(seen.len() as u64, sim.cpu.stats.cycles);
    assert_eq!(seen[0], (1, 1));
    assert!(seen.iter().all(|&(_, rob)| rob <= 2));
}

#[test]
fn empty_trace_finishes_immediately() {
    let mut sim = Simulator::new(&Config::default(), Box::new(TraceEmulator::default())).unwrap();
    assert_eq!(sim.run(), Some(0));
    assert_eq!(sim.cpu.stats.cycles, 1);
}

#[test]
fn invalid_config_is_reported() {
    let mut cfg = Config::default();
    cfg.pipeline.rob_size = 0;
    let err = Simulator::new(&cfg, Box::new(TraceEmulator::default())).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}
