//! Statistics Accounting Tests.
//!
//! Verifies that the driver fills in the counters the summary reports.

use tinyrv_core::config::BranchPredictor;
use tinyrv_core::stats::SimStats;

use crate::common::builder::{TraceBuilder, config, uniform_latency};
use crate::common::harness::TestContext;

#[test]
fn instruction_mix_counts_committed_work() {
    let program = vec![
        TraceBuilder::alu(0x100).rd(1).build(),
        TraceBuilder::lsu(0x104).rd(2).build(),
        TraceBuilder::lsu(0x108).rs1(2).build(),
        TraceBuilder::csr(0x10c).rd(3).build(),
        TraceBuilder::branch(0x110, 0x114).build(),
    ];
    let mut tc = TestContext::new(&config(8, 8, uniform_latency(1)), program);
    let _ = tc.run_to_completion();

    let stats = tc.cpu().stats();
    assert_eq!(stats.inst_alu, 2);
    assert_eq!(stats.inst_lsu, 2);
    assert_eq!(stats.inst_csr, 1);
    assert_eq!(stats.inst_branch, 1);
    assert_eq!(stats.instructions_retired, 5);
}

#[test]
fn ipc_and_accuracy() {
    let mut cfg = config(8, 8, uniform_latency(1));
    cfg.pipeline.branch_predictor = BranchPredictor::Static;
    cfg.pipeline.mispredict_penalty = 1;
    let program = vec![
        TraceBuilder::branch(0x100, 0x104).build(),
        TraceBuilder::branch(0x104, 0x200).build(),
        TraceBuilder::branch(0x200, 0x204).build(),
        TraceBuilder::branch(0x204, 0x208).build(),
    ];
    let mut tc = TestContext::new(&cfg, program);
    let cycles = tc.run_to_completion();

    let stats = tc.cpu().stats();
    assert_eq!(stats.branch_predictions, 3);
    assert_eq!(stats.branch_mispredictions, 1);
    assert!((stats.branch_accuracy() - 75.0).abs() < f64::EPSILON);
    assert!((stats.ipc() - 4.0 / cycles as f64).abs() < f64::EPSILON);
}

#[test]
fn default_stats_are_zero() {
    let stats = SimStats::default();
    assert_eq!(stats.perf_line(), "PERF: instrs=0, cycles=0");
    assert_eq!(stats.stalls_control + stats.stalls_structural, 0);
}
