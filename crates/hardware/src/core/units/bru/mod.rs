//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the branch predictors consulted at issue: a static
//! always-not-taken baseline and GShare with its tagged target cache.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait and common functionality.
pub mod branch_predictor;

/// Branch Target Buffer for storing predicted branch targets.
pub mod btb;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Static branch predictor (always not-taken).
pub mod static_bp;

use self::{gshare::GSharePredictor, static_bp::StaticPredictor};
use crate::config::{BranchPredictor as BpType, Config};

/// Enum wrapper for static dispatch of Branch Predictors.
/// This avoids vtable lookups on the issue path.
#[derive(Clone, Debug)]
pub enum BranchPredictorWrapper {
    /// Always not-taken.
    Static(StaticPredictor),
    /// Global-history predictor.
    GShare(GSharePredictor),
}

impl BranchPredictorWrapper {
    /// Creates the configured branch predictor, or `None` if prediction is disabled.
    pub fn new(config: &Config) -> Option<Self> {
        match config.pipeline.branch_predictor {
            BpType::None => None,
            BpType::Static => Some(Self::Static(StaticPredictor::new())),
            BpType::GShare => Some(Self::GShare(GSharePredictor::new(
                &config.pipeline.gshare,
            ))),
        }
    }

    /// Restores the power-on state.
    pub fn reset(&mut self) {
        match self {
            Self::Static(_) => {}
            Self::GShare(bp) => bp.reset(),
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn predict_branch(&self, pc: u64) -> (bool, Option<u64>) {
        match self {
            Self::Static(bp) => bp.predict_branch(pc),
            Self::GShare(bp) => bp.predict_branch(pc),
        }
    }

    #[inline(always)]
    fn update_branch(&mut self, pc: u64, taken: bool, target: Option<u64>, correct: bool) {
        match self {
            Self::Static(bp) => bp.update_branch(pc, taken, target, correct),
            Self::GShare(bp) => bp.update_branch(pc, taken, target, correct),
        }
    }
}
