//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts.
//!
//! # Performance
//!
//! - **Time Complexity:** `predict_branch()` and `update_branch()` are O(1)
//! - **Space Complexity:** O(2^N) for N = `table_bits` (counters plus target cache)
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Taken branches aliasing in the target cache (tag misses force a misprediction)

use super::{BranchPredictor, btb::Btb};
use crate::common::constants::PC_ALIGN_SHIFT;
use crate::config::{BtbUpdatePolicy, GShareConfig};

/// Largest value of a 2-bit saturating counter.
const COUNTER_MAX: u8 = 3;
/// Counters at or above this value predict taken.
const TAKEN_THRESHOLD: u8 = 2;
/// Reset value of every counter (weakly not-taken).
const COUNTER_INIT: u8 = 1;

/// GShare Predictor structure.
#[derive(Clone, Debug)]
pub struct GSharePredictor {
    /// Global History Register storing recent branch outcomes, newest in bit 0.
    ghr: u64,
    /// Mask limiting the history to its configured width.
    history_mask: u64,
    /// Pattern History Table containing 2-bit saturating counters.
    pht: Vec<u8>,
    /// Tagged target cache.
    btb: Btb,
    /// When taken outcomes are written to the target cache.
    btb_update: BtbUpdatePolicy,
}

impl GSharePredictor {
    /// Creates a new GShare Predictor.
    pub fn new(config: &GShareConfig) -> Self {
        let history_mask = if config.history_bits >= 64 {
            u64::MAX
        } else {
            (1u64 << config.history_bits) - 1
        };
        Self {
            ghr: 0,
            history_mask,
            pht: vec![COUNTER_INIT; 1 << config.table_bits],
            btb: Btb::new(config.table_bits),
            btb_update: config.btb_update,
        }
    }

    /// Calculates the index into the Pattern History Table.
    ///
    /// Computes the XOR of the PC (shifted) and the Global History Register.
    pub fn index(&self, pc: u64) -> usize {
        let table_mask = (self.pht.len() as u64) - 1;
        (((pc >> PC_ALIGN_SHIFT) ^ self.ghr) & table_mask) as usize
    }

    /// Current global history.
    #[inline]
    pub const fn history(&self) -> u64 {
        self.ghr
    }

    /// Counter value at PHT slot `index`.
    #[inline]
    pub fn counter(&self, index: usize) -> u8 {
        self.pht[index]
    }

    /// The target cache.
    #[inline]
    pub const fn btb(&self) -> &Btb {
        &self.btb
    }

    /// Restores the power-on state.
    pub fn reset(&mut self) {
        self.ghr = 0;
        self.pht.fill(COUNTER_INIT);
        self.btb.reset();
    }
}

impl BranchPredictor for GSharePredictor {
    /// Predicts branch direction and target.
    ///
    /// Taken if the 2-bit counter at the hashed index is 2 or 3; the target
    /// then comes from the tagged target cache.
    fn predict_branch(&self, pc: u64) -> (bool, Option<u64>) {
        let taken = self.pht[self.index(pc)] >= TAKEN_THRESHOLD;
        if taken {
            (true, self.btb.lookup(pc))
        } else {
            (false, None)
        }
    }

    /// Updates the predictor with the actual branch outcome.
    ///
    /// The counter slot is the one the prediction used, so it is computed
    /// before the new outcome is shifted into the history.
    fn update_branch(&mut self, pc: u64, taken: bool, target: Option<u64>, correct: bool) {
        let idx = self.index(pc);
        let counter = &mut self.pht[idx];
        if taken {
            *counter = (*counter + 1).min(COUNTER_MAX);
        } else {
            *counter = counter.saturating_sub(1);
        }

        self.ghr = ((self.ghr << 1) | u64::from(taken)) & self.history_mask;

        let write_btb = match self.btb_update {
            BtbUpdatePolicy::OnTaken => true,
            BtbUpdatePolicy::OnCorrectPrediction => correct,
        };
        if let (true, Some(tgt)) = (write_btb, target) {
            self.btb.update(pc, tgt);
        }
    }
}
