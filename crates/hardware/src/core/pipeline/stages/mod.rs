//! Per-cycle pipeline stages.
//!
//! Stages run in the order commit, writeback, execute, issue. Each one is a
//! unit struct implementing [`PipelineStage`](super::traits::PipelineStage).

/// Commit stage: receive retired traces from the ROB.
pub mod commit;

/// Execute stage: dispatch ready reservation stations.
pub mod execute;

/// Issue stage: fetch, predict and rename.
pub mod issue;

/// Writeback stage: broadcast one functional-unit result.
pub mod writeback;

pub use self::commit::CommitStage;
pub use self::execute::ExecuteStage;
pub use self::issue::IssueStage;
pub use self::writeback::WritebackStage;
