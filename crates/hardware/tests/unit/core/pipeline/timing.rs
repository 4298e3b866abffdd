//! Latency and Writeback Timing Tests.
//!
//! Whole-program cycle counts for parameterised unit latencies and
//! misprediction penalties, and the single writeback port's priority.

use rstest::rstest;
use tinyrv_core::config::{BranchPredictor, LatencyConfig};
use tinyrv_core::core::pipeline::Scoreboard;

use crate::common::builder::{TraceBuilder, add, config, uniform_latency};
use crate::common::harness::TestContext;

#[rstest]
#[case(1, 4)]
#[case(2, 5)]
#[case(3, 6)]
#[case(7, 10)]
fn lone_instruction_takes_latency_plus_three(#[case] latency: u32, #[case] cycles: u64) {
    let mut tc = TestContext::new(
        &config(4, 4, uniform_latency(latency)),
        vec![TraceBuilder::lsu(0x100).rd(1).build()],
    );
    assert_eq!(tc.run_to_completion(), cycles);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
fn dependent_pair_serializes_on_latency(#[case] latency: u32) {
    let mut tc = TestContext::new(
        &config(4, 4, uniform_latency(latency)),
        vec![add(0x100, 1, 0, 0), add(0x104, 2, 1, 0)],
    );
    assert_eq!(tc.run_to_completion(), 3 + 2 * u64::from(latency));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(5)]
fn misprediction_delays_issue_by_the_penalty(#[case] penalty: u32) {
    let mut cfg = config(4, 4, uniform_latency(1));
    cfg.pipeline.branch_predictor = BranchPredictor::Static;
    cfg.pipeline.mispredict_penalty = penalty;

    let mut tc = TestContext::new(&cfg, vec![TraceBuilder::branch(0x100, 0x180).build()]);
    // Fetch and mispredict in cycle 1, stall `penalty` cycles, then issue.
    assert_eq!(tc.run_to_completion(), 4 + 1 + u64::from(penalty));

    let stats = tc.cpu().stats();
    assert_eq!(stats.branch_mispredictions, 1);
    assert_eq!(stats.branch_predictions, 0);
    assert_eq!(stats.stalls_control, u64::from(penalty));
    assert_eq!(stats.inst_branch, 1);
}

#[test]
fn correctly_predicted_branch_costs_nothing() {
    let mut cfg = config(4, 4, uniform_latency(1));
    cfg.pipeline.branch_predictor = BranchPredictor::Static;
    let mut tc = TestContext::new(&cfg, vec![TraceBuilder::branch(0x100, 0x104).build()]);
    assert_eq!(tc.run_to_completion(), 4);
    assert_eq!(tc.cpu().stats.branch_predictions, 1);
}

#[test]
fn disabled_prediction_never_stalls() {
    let mut tc = TestContext::new(
        &config(4, 4, uniform_latency(1)),
        vec![TraceBuilder::branch(0x100, 0x180).build()],
    );
    assert_eq!(tc.run_to_completion(), 4);
    let stats = tc.cpu().stats();
    assert_eq!(stats.branch_mispredictions + stats.branch_predictions, 0);
}

#[test]
fn lowest_unit_wins_the_writeback_port() {
    let mut sb = Scoreboard::with_sizes(4, 4, uniform_latency(1));
    let _ = sb.issue(TraceBuilder::csr(0x100).rd(3).build()).unwrap();
    let _ = sb.issue(TraceBuilder::lsu(0x104).rd(2).build()).unwrap();
    let _ = sb.issue(add(0x108, 1, 0, 0)).unwrap();

    assert_eq!(sb.execute().len(), 3, "one dispatch per unit");
    sb.tick_units();

    let order: Vec<u64> = std::iter::from_fn(|| sb.writeback().map(|t| t.pc)).collect();
    assert_eq!(order, vec![0x108, 0x104, 0x100], "ALU, then LSU, then CSR");
}

#[test]
fn one_dispatch_per_unit_per_cycle() {
    let latency = LatencyConfig {
        alu: 2,
        ..LatencyConfig::default()
    };
    let mut sb = Scoreboard::with_sizes(4, 4, latency);
    let _ = sb.issue(add(0x100, 1, 0, 0)).unwrap();
    let _ = sb.issue(add(0x104, 2, 0, 0)).unwrap();

    assert_eq!(sb.execute().len(), 1);
    sb.tick_units();
    assert_eq!(sb.execute().len(), 1, "second ALU op goes the next cycle");
}
