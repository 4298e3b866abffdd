//! Randomized Pipeline Properties.
//!
//! For arbitrary instruction mixes, buffer sizes and latencies:
//! - instructions commit exactly once, in program order;
//! - every RAT mapping names an occupied ROB slot that writes that register,
//!   and every RST entry names the station computing that slot;
//! - the pipeline drains with an empty RAT.

use proptest::prelude::*;
use tinyrv_core::config::LatencyConfig;
use tinyrv_core::core::pipeline::Scoreboard;
use tinyrv_core::{FuType, InstrTrace};

use crate::common::builder::{config, uniform_latency};
use crate::common::harness::TestContext;

fn arb_trace() -> impl Strategy<Value = (usize, usize, usize, usize, bool)> {
    (0usize..3, 0usize..8, 0usize..8, 0usize..8, any::<bool>())
}

fn program(shape: Vec<(usize, usize, usize, usize, bool)>) -> Vec<InstrTrace> {
    shape
        .into_iter()
        .enumerate()
        .map(|(i, (fu, rd, rs1, rs2, wb))| InstrTrace {
            pc: 0x1000 + 4 * i as u64,
            next_pc: 0x1004 + 4 * i as u64,
            rs1,
            rs2,
            rd,
            wb: wb && rd != 0,
            fu: FuType::ALL[fu],
            control_flow: false,
        })
        .collect()
}

/// Steps the scoreboard in driver order, returning committed PCs.
fn drive(sb: &mut Scoreboard, program: &[InstrTrace]) -> Result<Vec<u64>, TestCaseError> {
    let mut pending = program.iter().cloned();
    let mut held: Option<InstrTrace> = None;
    let mut committed = Vec::new();

    for _ in 0..10_000 {
        if let Some(t) = sb.commit() {
            committed.push(t.pc);
        }
        let _ = sb.writeback();
        let _ = sb.execute();
        if let Some(t) = held.take().or_else(|| pending.next()) {
            if let Err(stall) = sb.issue(t) {
                held = Some(stall.trace);
            }
        }
        sb.tick_units();

        if let Err(msg) = sb.check_consistency() {
            return Err(TestCaseError::fail(msg.to_string()));
        }
        if committed.len() == program.len() {
            break;
        }
    }
    Ok(committed)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn commits_in_program_order(
        shape in prop::collection::vec(arb_trace(), 0..40),
        rob in 1usize..6,
        rs in 1usize..6,
        alu in 1u32..4,
        lsu in 1u32..5,
        csr in 1u32..3,
    ) {
        let program = program(shape);
        let mut sb = Scoreboard::with_sizes(rob, rs, LatencyConfig { alu, lsu, csr });

        let committed = drive(&mut sb, &program)?;
        let expected: Vec<u64> = program.iter().map(|t| t.pc).collect();
        prop_assert_eq!(committed, expected);
        prop_assert!(sb.is_idle());
        prop_assert_eq!(sb.rat().iter_pending().count(), 0);
    }

    #[test]
    fn core_retires_every_instruction(
        shape in prop::collection::vec(arb_trace(), 0..30),
        rob in 1usize..5,
        rs in 1usize..5,
        latency in 1u32..4,
    ) {
        let program = program(shape);
        let len = program.len() as u64;
        let mut tc = TestContext::new(&config(rob, rs, uniform_latency(latency)), program);

        let cycles = tc.run_to_completion();
        let stats = tc.cpu().stats();
        prop_assert_eq!(stats.instructions_issued, len);
        prop_assert_eq!(stats.instructions_retired, len);
        prop_assert!(cycles >= len, "at most one commit per cycle");
    }
}
