//! Structural Hazard Tests.
//!
//! A full ROB or reservation-station pool must stall issue, hold the
//! rejected instruction unchanged and retry it, never dropping it.

use tinyrv_core::common::StructuralHazard;
use tinyrv_core::config::LatencyConfig;
use tinyrv_core::core::pipeline::Scoreboard;

use crate::common::builder::{add, config, independent_alu, uniform_latency};
use crate::common::harness::TestContext;

#[test]
fn full_rob_rejects_and_returns_the_trace() {
    let mut sb = Scoreboard::with_sizes(1, 4, LatencyConfig::default());
    let _ = sb.issue(add(0x100, 1, 0, 0)).unwrap();

    let second = add(0x104, 2, 0, 0);
    let stall = sb.issue(second.clone()).unwrap_err();
    assert_eq!(stall.hazard, StructuralHazard::RobFull);
    assert_eq!(stall.trace, second, "rejected trace comes back unchanged");
    assert_eq!(sb.rob().len(), 1);
    assert_eq!(sb.rs().len(), 1, "no station allocated on a ROB stall");
    assert_eq!(sb.rat().get(2), None, "no rename on a stall");
}

#[test]
fn full_rs_rejects_before_touching_the_rob() {
    let mut sb = Scoreboard::with_sizes(4, 1, LatencyConfig::default());
    let _ = sb.issue(add(0x100, 1, 0, 0)).unwrap();
    let stall = sb.issue(add(0x104, 2, 0, 0)).unwrap_err();
    assert_eq!(stall.hazard, StructuralHazard::RsFull);
    assert_eq!(sb.rob().len(), 1);
}

#[test]
fn rob_of_one_serializes_without_loss() {
    let mut tc = TestContext::new(
        &config(1, 4, uniform_latency(1)),
        vec![add(0x100, 1, 0, 0), add(0x104, 2, 0, 0)],
    );

    tc.run(2);
    let held = tc.cpu().stalled().expect("second instruction held");
    assert_eq!(held.pc, 0x104);
    assert_eq!(tc.cpu().stats.instructions_issued, 1);

    // Issues in cycle 4, once the first commits; then 3 more cycles to commit.
    assert_eq!(tc.run_to_completion(), 7);
    let stats = tc.cpu().stats();
    assert_eq!(stats.instructions_retired, 2);
    assert_eq!(stats.stalls_structural, 2);
}

#[test]
fn rs_slot_freed_at_writeback_is_reused_the_same_cycle() {
    let mut tc = TestContext::new(
        &config(4, 1, uniform_latency(1)),
        vec![add(0x100, 1, 0, 0), add(0x104, 2, 0, 0)],
    );
    assert_eq!(tc.run_to_completion(), 6);
    assert_eq!(tc.cpu().stats.stalls_structural, 1);
}

#[test]
fn no_false_stalls_with_free_capacity() {
    let mut tc = TestContext::new(&config(4, 4, uniform_latency(1)), independent_alu(10));
    // One issue per cycle, three cycles from issue to commit.
    assert_eq!(tc.run_to_completion(), 13);
    let stats = tc.cpu().stats();
    assert_eq!(stats.stalls_structural, 0);
    assert_eq!(stats.instructions_retired, 10);
}
