//! Static Branch Predictor.
//!
//! Always predicts not-taken, so every taken control-flow instruction costs a
//! misprediction stall. Useful as a baseline against GShare.

use super::BranchPredictor;

/// Static Predictor structure (always not-taken).
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new Static Predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    fn predict_branch(&self, _pc: u64) -> (bool, Option<u64>) {
        (false, None)
    }

    fn update_branch(&mut self, _pc: u64, _taken: bool, _target: Option<u64>, _correct: bool) {}
}
