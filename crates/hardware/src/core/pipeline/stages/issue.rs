//! Issue Stage.
//!
//! Fetches the next instruction from the emulator, consults the branch
//! predictor for control-flow instructions, and renames into the scoreboard.
//! It performs:
//! 1. **Misprediction stall:** After a wrong prediction no issue happens for
//!    `mispredict_penalty` cycles; the mispredicted instruction is held meanwhile.
//! 2. **Fetch:** A new instruction is fetched only when none is held.
//! 3. **Structural stall:** If the ROB or RS pool is full, the instruction is held
//!    and retried unchanged next cycle.

use crate::core::Cpu;
use crate::core::pipeline::trace::InstrTrace;
use crate::core::pipeline::traits::PipelineStage;
use crate::core::units::bru::BranchPredictor;

/// Issue stage.
#[derive(Debug)]
pub struct IssueStage;

impl PipelineStage for IssueStage {
    fn tick(cpu: &mut Cpu) {
        if cpu.issue_stalls != 0 {
            cpu.issue_stalls -= 1;
            cpu.stats.stalls_control += 1;
            if cpu.trace_instructions {
                tracing::trace!(cycle = cpu.stats.cycles, "pipeline-issue stalled: misprediction");
            }
            return;
        }

        if let Some(held) = cpu.stalled.take() {
            rename(cpu, held);
            return;
        }

        let Some(fetched) = cpu.emulator.step() else {
            cpu.fetch_exhausted = true;
            return;
        };

        let prediction = match cpu.predictor.as_mut() {
            Some(bp) if fetched.control_flow => Some(bp.predict(&fetched)),
            _ => None,
        };
        match prediction {
            None => rename(cpu, fetched),
            Some(true) => {
                cpu.stats.branch_predictions += 1;
                rename(cpu, fetched);
            }
            Some(false) => {
                cpu.stats.branch_mispredictions += 1;
                cpu.issue_stalls = cpu.mispredict_penalty;
                if cpu.trace_instructions {
                    tracing::trace!(cycle = cpu.stats.cycles, "pipeline-issue mispredicted: {fetched}");
                }
                cpu.stalled = Some(fetched);
            }
        }
    }
}

/// Renames `trace` into the scoreboard, holding it for retry on a structural hazard.
fn rename(cpu: &mut Cpu, trace: InstrTrace) {
    match cpu.scoreboard.issue(trace) {
        Ok(rob_index) => {
            cpu.stats.instructions_issued += 1;
            if cpu.trace_instructions {
                tracing::trace!(cycle = cpu.stats.cycles, rob = rob_index.0, "pipeline-issue");
            }
        }
        Err(stall) => {
            cpu.stats.stalls_structural += 1;
            if cpu.trace_instructions {
                tracing::trace!(cycle = cpu.stats.cycles, "pipeline-issue stalled: {stall}");
            }
            cpu.stalled = Some(stall.trace);
        }
    }
}
