//! Writeback Stage.
//!
//! Moves one completed functional-unit result per cycle onto the single
//! writeback port: dependents wake up and the ROB is notified.

use crate::core::Cpu;
use crate::core::pipeline::traits::PipelineStage;

/// Writeback stage.
#[derive(Debug)]
pub struct WritebackStage;

impl PipelineStage for WritebackStage {
    fn tick(cpu: &mut Cpu) {
        let Some(trace) = cpu.scoreboard.writeback() else {
            return;
        };
        if cpu.trace_instructions {
            tracing::trace!(cycle = cpu.stats.cycles, "pipeline-writeback: {trace}");
        }
    }
}
