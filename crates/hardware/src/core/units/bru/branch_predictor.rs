//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that all branch prediction
//! implementations adhere to. A predictor proposes a direction and target for
//! a PC, is trained with the true outcome, and reports whether the proposed
//! next PC matched the architectural one.

use crate::common::constants::INSTRUCTION_WIDTH;
use crate::core::pipeline::trace::InstrTrace;

/// Trait for branch prediction algorithms.
pub trait BranchPredictor {
    /// Predicts whether a branch instruction will be taken and its target address.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction
    ///
    /// # Returns
    ///
    /// A tuple `(taken, target)`. When `taken` is true and `target` is `None`
    /// the target cache missed and the prediction cannot be used.
    fn predict_branch(&self, pc: u64) -> (bool, Option<u64>);

    /// Updates the branch predictor with the actual branch outcome.
    ///
    /// Called for every resolved control-flow instruction, regardless of
    /// whether it was predicted correctly.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction
    /// * `taken` - Whether the branch was actually taken
    /// * `target` - The actual target address if the branch was taken
    /// * `correct` - Whether the prediction made for this instance was right
    fn update_branch(&mut self, pc: u64, taken: bool, target: Option<u64>, correct: bool);

    /// Predicts the next PC of `trace`, trains on its real outcome, and returns
    /// whether the prediction was correct.
    fn predict(&mut self, trace: &InstrTrace) -> bool {
        let (taken, target) = self.predict_branch(trace.pc);
        let predicted = if taken {
            target
        } else {
            Some(trace.pc.wrapping_add(INSTRUCTION_WIDTH))
        };
        let correct = predicted == Some(trace.next_pc);

        let actual = trace.taken();
        self.update_branch(trace.pc, actual, actual.then_some(trace.next_pc), correct);

        tracing::trace!(taken, actual, correct, "branch-predict pc={:#x}", trace.pc);
        correct
    }
}
