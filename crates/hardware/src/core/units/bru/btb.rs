//! Branch Target Buffer (BTB).
//!
//! A direct-mapped target cache indexed by the low PC bits above the
//! instruction alignment. Each entry carries a partial tag (the PC bits above
//! the index) so that two branches aliasing to the same slot are told apart.

use crate::common::constants::PC_ALIGN_SHIFT;

/// An entry in the Branch Target Buffer.
#[derive(Clone, Copy, Debug, Default)]
struct BtbEntry {
    /// High PC bits of the branch that owns this entry.
    tag: u64,
    /// The predicted target address.
    target: u64,
    /// Indicates if this entry contains valid data.
    valid: bool,
}

/// Branch Target Buffer structure.
#[derive(Clone, Debug)]
pub struct Btb {
    table: Vec<BtbEntry>,
    index_bits: u32,
}

impl Btb {
    /// Creates a Branch Target Buffer with `2^index_bits` entries.
    pub fn new(index_bits: u32) -> Self {
        Self {
            table: vec![BtbEntry::default(); 1 << index_bits],
            index_bits,
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false; a BTB has at least one entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Slot for `pc`: `(pc >> 2) mod size`.
    #[inline]
    pub fn index(&self, pc: u64) -> usize {
        ((pc >> PC_ALIGN_SHIFT) as usize) & (self.table.len() - 1)
    }

    /// Partial tag for `pc`: the bits above the index.
    #[inline]
    pub const fn tag(&self, pc: u64) -> u64 {
        pc >> (PC_ALIGN_SHIFT + self.index_bits)
    }

    /// Looks up a target address for the given program counter.
    ///
    /// Returns `None` if the slot is empty or owned by an aliasing branch.
    pub fn lookup(&self, pc: u64) -> Option<u64> {
        let e = self.table[self.index(pc)];
        if e.valid && e.tag == self.tag(pc) {
            Some(e.target)
        } else {
            None
        }
    }

    /// Overwrites the slot of `pc` with `target`.
    pub fn update(&mut self, pc: u64, target: u64) {
        let idx = self.index(pc);
        self.table[idx] = BtbEntry {
            tag: self.tag(pc),
            target,
            valid: true,
        };
    }

    /// Invalidates every entry.
    pub fn reset(&mut self) {
        self.table.fill(BtbEntry::default());
    }
}
