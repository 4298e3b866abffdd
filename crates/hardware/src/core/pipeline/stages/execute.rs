//! Execute Stage.
//!
//! Sends every ready reservation station to its functional unit.

use crate::core::Cpu;
use crate::core::pipeline::traits::PipelineStage;

/// Execute stage.
#[derive(Debug)]
pub struct ExecuteStage;

impl PipelineStage for ExecuteStage {
    fn tick(cpu: &mut Cpu) {
        let traces = cpu.scoreboard.execute();
        if cpu.trace_instructions {
            for trace in &traces {
                tracing::trace!(cycle = cpu.stats.cycles, "pipeline-execute: {trace}");
            }
        }
    }
}
