//! Pipeline Stage Interface.
//!
//! Every stage of the per-cycle driver implements [`PipelineStage`]. The CPU
//! calls the stages in a fixed order each cycle (commit, writeback, execute,
//! issue), so a resource freed by an earlier stage is visible to a later one
//! in the same cycle, but never the other way around.

/// Represents a stage in the instruction pipeline.
pub trait PipelineStage {
    /// Executes one cycle of the pipeline stage.
    ///
    /// # Arguments
    ///
    /// * `cpu` - Mutable reference to the CPU state.
    fn tick(cpu: &mut crate::core::Cpu);
}
