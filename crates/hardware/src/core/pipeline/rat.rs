//! Register Alias Table.
//!
//! Maps each architectural register to the ROB index of its latest in-flight
//! producer, or `None` if the value is in the architectural register file.
//! The table performs no hazard checking itself: the scoreboard sets a mapping
//! when an instruction writing the register is renamed, and the ROB clears it
//! at commit only if it still points at the committing entry.

use crate::common::constants::{NUM_REGS, ZERO_REG};
use crate::core::pipeline::rob::RobIndex;

/// Register Alias Table: one producer slot per architectural register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterAliasTable {
    /// x0 is always `None` (hardwired zero).
    map: [Option<RobIndex>; NUM_REGS],
}

impl Default for RegisterAliasTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterAliasTable {
    /// Create a table with every register resident in the register file.
    pub const fn new() -> Self {
        Self {
            map: [None; NUM_REGS],
        }
    }

    /// ROB index of the latest pending writer of `reg`, or `None` if the value
    /// is in the register file.
    #[inline]
    pub const fn get(&self, reg: usize) -> Option<RobIndex> {
        self.map[reg]
    }

    /// Overwrite the mapping of `reg`. No-op for x0.
    #[inline]
    pub const fn set(&mut self, reg: usize, producer: Option<RobIndex>) {
        if reg != ZERO_REG {
            self.map[reg] = producer;
        }
    }

    /// Clear `reg`, but only if it still maps to `rob_index`.
    ///
    /// A younger instruction may have remapped the register since `rob_index`
    /// was renamed; that mapping must survive the older commit.
    pub fn clear_if_match(&mut self, reg: usize, rob_index: RobIndex) -> bool {
        let slot = &mut self.map[reg];
        if *slot == Some(rob_index) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Iterate over `(register, producer)` for every renamed register.
    pub fn iter_pending(&self) -> impl Iterator<Item = (usize, RobIndex)> + '_ {
        self.map
            .iter()
            .enumerate()
            .filter_map(|(reg, slot)| slot.map(|idx| (reg, idx)))
    }

    /// Clear every mapping.
    pub fn reset(&mut self) {
        self.map = [None; NUM_REGS];
    }
}
