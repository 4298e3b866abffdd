//! Reservation Stations.
//!
//! A fixed pool of scheduling slots holding issued, not-yet-completed
//! instructions together with the producers their operands wait on. An entry
//! is allocated at issue, woken by producer broadcasts, marked dispatched when
//! sent to its functional unit, and deallocated at writeback.

use std::fmt;

use crate::common::error::StructuralHazard;
use crate::core::pipeline::rob::RobIndex;
use crate::core::pipeline::trace::FuType;

/// Position of an entry in the reservation-station pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RsIndex(pub usize);

impl fmt::Display for RsIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RS{}", self.0)
    }
}

/// Source operand availability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Operand {
    /// Value readable from the ROB or register file.
    #[default]
    Ready,
    /// Waiting on the in-flight producer at this ROB index.
    Pending(RobIndex),
}

impl Operand {
    /// Returns true if no producer wait is needed.
    #[inline]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "-"),
            Self::Pending(idx) => write!(f, "{idx}"),
        }
    }
}

/// A single occupied reservation station.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsEntry {
    /// ROB slot of the instruction.
    pub rob_index: RobIndex,
    /// Unit the instruction executes on.
    pub fu: FuType,
    /// Program counter, for dumps.
    pub pc: u64,
    /// First source operand.
    pub op1: Operand,
    /// Second source operand.
    pub op2: Operand,
    /// Whether the entry has been sent to its functional unit.
    pub dispatched: bool,
}

impl RsEntry {
    /// Both operands available and not yet sent to a unit.
    #[inline]
    pub const fn is_ready(&self) -> bool {
        !self.dispatched && self.op1.is_ready() && self.op2.is_ready()
    }
}

/// Reservation-station pool.
#[derive(Debug)]
pub struct ReservationStations {
    /// `None` marks a free slot.
    slots: Vec<Option<RsEntry>>,
    /// Number of occupied slots.
    count: usize,
}

impl ReservationStations {
    /// Creates a pool of `size` free slots.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "reservation-station pool must be non-empty");
        Self {
            slots: vec![None; size],
            count: 0,
        }
    }

    /// Total number of slots.
    #[inline]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no slot is occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Returns the entry in `index`, if occupied.
    pub fn get(&self, index: RsIndex) -> Option<&RsEntry> {
        self.slots.get(index.0).and_then(Option::as_ref)
    }

    /// Places an instruction in the lowest free slot.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralHazard::RsFull`] if no slot is free.
    pub fn push(
        &mut self,
        rob_index: RobIndex,
        fu: FuType,
        pc: u64,
        op1: Operand,
        op2: Operand,
    ) -> Result<RsIndex, StructuralHazard> {
        let Some(free) = self.slots.iter().position(Option::is_none) else {
            return Err(StructuralHazard::RsFull);
        };
        self.slots[free] = Some(RsEntry {
            rob_index,
            fu,
            pc,
            op1,
            op2,
            dispatched: false,
        });
        self.count += 1;
        Ok(RsIndex(free))
    }

    /// Indices of every entry with both operands ready that has not been dispatched.
    pub fn find_ready(&self) -> Vec<RsIndex> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.as_ref().is_some_and(RsEntry::is_ready))
            .map(|(i, _)| RsIndex(i))
            .collect()
    }

    /// Wakes every operand waiting on `producer`.
    ///
    /// Returns the number of operands cleared.
    pub fn broadcast(&mut self, producer: RobIndex) -> usize {
        let waiting = Operand::Pending(producer);
        let mut woken = 0;
        for entry in self.slots.iter_mut().flatten() {
            for op in [&mut entry.op1, &mut entry.op2] {
                if *op == waiting {
                    *op = Operand::Ready;
                    woken += 1;
                }
            }
        }
        woken
    }

    /// Marks an occupied entry as sent to its functional unit.
    pub fn mark_dispatched(&mut self, index: RsIndex) {
        let Some(entry) = self.slots[index.0].as_mut() else {
            panic!("dispatch of free reservation station {index}");
        };
        assert!(!entry.dispatched, "{index} dispatched twice");
        entry.dispatched = true;
    }

    /// Frees an occupied slot.
    pub fn deallocate(&mut self, index: RsIndex) -> RsEntry {
        let Some(entry) = self.slots[index.0].take() else {
            panic!("deallocation of free reservation station {index}");
        };
        self.count -= 1;
        entry
    }

    /// Iterate over occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (RsIndex, &RsEntry)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|e| (RsIndex(i), e)))
    }

    /// Frees every slot.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.count = 0;
    }
}
