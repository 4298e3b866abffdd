//! Commit Stage.
//!
//! Runs the ROB commit step and retires whatever it sends on the commit
//! channel: the committed-instruction counter advances and the trace is
//! released. At most one instruction commits per cycle, in program order.

use crate::core::Cpu;
use crate::core::pipeline::traits::PipelineStage;

/// Commit stage.
#[derive(Debug)]
pub struct CommitStage;

impl PipelineStage for CommitStage {
    fn tick(cpu: &mut Cpu) {
        let Some(trace) = cpu.scoreboard.commit() else {
            return;
        };

        assert!(
            cpu.stats.instructions_retired < cpu.stats.instructions_issued,
            "committed more instructions than were issued"
        );
        cpu.stats.instructions_retired += 1;
        cpu.stats.record_commit(&trace);

        if cpu.trace_instructions {
            tracing::trace!(cycle = cpu.stats.cycles, "pipeline-commit: {trace}");
        }
    }
}
