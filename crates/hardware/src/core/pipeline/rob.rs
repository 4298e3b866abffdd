//! Reorder Buffer (ROB) for in-order commit.
//!
//! The ROB is a circular buffer that tracks in-flight instructions from issue
//! through commit. It provides:
//! 1. **Allocation:** Assigns a slot at the tail to every issued instruction.
//! 2. **Completion:** Queues writeback notifications and applies them at the next commit step.
//! 3. **In-order Commit:** Retires only the head, only once completed, and releases its RAT mapping.
//! 4. **Commit Channel:** Hands retired traces to the driver in program order.
//!
//! Slots move through `Empty -> Allocated -> Completed -> Empty`. Completion may
//! happen out of order; commit never does.

use std::collections::VecDeque;
use std::fmt;

use crate::common::error::StructuralHazard;
use crate::core::pipeline::rat::RegisterAliasTable;
use crate::core::pipeline::trace::InstrTrace;

/// Position of an in-flight instruction in the ROB.
///
/// Unique among in-flight instructions; reused once the slot commits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RobIndex(pub usize);

impl fmt::Display for RobIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ROB{}", self.0)
    }
}

/// Lifecycle state of an occupied ROB slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RobState {
    /// Issued; result not yet written back.
    #[default]
    Allocated,
    /// Written back; waiting to reach the head.
    Completed,
}

/// A single occupied entry in the Reorder Buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RobEntry {
    /// The instruction, owned by the ROB until commit.
    pub trace: InstrTrace,
    /// Current lifecycle state.
    pub state: RobState,
}

impl RobEntry {
    /// Returns true once the entry has been written back.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.state == RobState::Completed
    }
}

/// Reorder Buffer: fixed-capacity circular buffer for in-order commit.
#[derive(Debug)]
pub struct ReorderBuffer {
    /// Slot arena; `None` marks an empty slot.
    entries: Vec<Option<RobEntry>>,
    /// Index of the oldest entry (commit point).
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    /// Number of occupied entries.
    count: usize,
    /// Completion notifications not yet applied.
    completed: VecDeque<RobIndex>,
    /// Retired traces waiting for the driver.
    committed: VecDeque<InstrTrace>,
}

impl ReorderBuffer {
    /// Creates a new ROB with the given capacity.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ROB capacity must be non-zero");
        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, || None);
        Self {
            entries,
            head: 0,
            tail: 0,
            count: 0,
            completed: VecDeque::new(),
            committed: VecDeque::new(),
        }
    }

    /// Returns the ROB capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the ROB is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the ROB is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.entries.len()
    }

    /// Returns the number of free slots.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.entries.len() - self.count
    }

    /// Index of the oldest in-flight entry, if any.
    #[inline]
    pub const fn head(&self) -> Option<RobIndex> {
        if self.count == 0 {
            None
        } else {
            Some(RobIndex(self.head))
        }
    }

    /// Returns the entry at `index`, or `None` if the slot is empty.
    pub fn get(&self, index: RobIndex) -> Option<&RobEntry> {
        self.entries.get(index.0).and_then(Option::as_ref)
    }

    /// Allocates the tail slot for `trace`.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralHazard::RobFull`] if every slot is occupied; the
    /// buffer is left untouched.
    pub fn allocate(&mut self, trace: InstrTrace) -> Result<RobIndex, StructuralHazard> {
        if self.is_full() {
            return Err(StructuralHazard::RobFull);
        }

        let index = self.tail;
        let slot = &mut self.entries[index];
        assert!(
            slot.is_none(),
            "ROB slot {index} allocated while still occupied"
        );
        *slot = Some(RobEntry {
            trace,
            state: RobState::Allocated,
        });

        self.tail = (self.tail + 1) % self.entries.len();
        self.count += 1;
        Ok(RobIndex(index))
    }

    /// Queues a completion notification for `index`.
    ///
    /// The entry is marked Completed at the next [`commit_step`](Self::commit_step),
    /// which decouples writeback timing from commit timing.
    pub fn notify_completion(&mut self, index: RobIndex) {
        assert!(
            self.get(index).is_some(),
            "completion notified for empty ROB slot {index}"
        );
        self.completed.push_back(index);
    }

    /// Runs one cycle of the commit logic.
    ///
    /// Applies queued completions, then retires the head if it has completed:
    /// the RAT mapping of its destination is cleared only if it still points at
    /// the head, and the trace is sent on the commit channel. At most one entry
    /// retires per step. Returns true if an entry retired.
    pub fn commit_step(&mut self, rat: &mut RegisterAliasTable) -> bool {
        while let Some(index) = self.completed.pop_front() {
            let Some(entry) = self.entries[index.0].as_mut() else {
                panic!("completion applied to empty ROB slot {index}");
            };
            assert!(
                entry.state == RobState::Allocated,
                "ROB slot {index} completed twice"
            );
            entry.state = RobState::Completed;
        }

        let head = match self.entries[self.head].as_ref() {
            Some(entry) if entry.is_completed() => RobIndex(self.head),
            _ => return false,
        };

        let entry = self.pop();
        if entry.trace.wb {
            let _ = rat.clear_if_match(entry.trace.rd, head);
        }
        tracing::trace!(rob = head.0, trace = %entry.trace, "rob-commit");
        self.committed.push_back(entry.trace);
        true
    }

    /// Receives the next retired trace from the commit channel.
    pub fn take_committed(&mut self) -> Option<InstrTrace> {
        self.committed.pop_front()
    }

    /// Removes the head entry. Only valid for a completed head.
    fn pop(&mut self) -> RobEntry {
        assert!(!self.is_empty(), "pop from empty ROB");
        let Some(entry) = self.entries[self.head].take() else {
            panic!("ROB head {} is empty while count = {}", self.head, self.count);
        };
        assert!(
            entry.is_completed(),
            "ROB head {} popped before completion",
            self.head
        );
        self.head = (self.head + 1) % self.entries.len();
        self.count -= 1;
        entry
    }

    /// Iterate over occupied entries from head (oldest) to tail (youngest).
    pub fn iter(&self) -> impl Iterator<Item = (RobIndex, &RobEntry)> + '_ {
        let cap = self.entries.len();
        (0..self.count).filter_map(move |i| {
            let idx = (self.head + i) % cap;
            self.entries[idx].as_ref().map(|e| (RobIndex(idx), e))
        })
    }

    /// Empties the buffer and both channels.
    pub fn reset(&mut self) {
        for slot in &mut self.entries {
            *slot = None;
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        self.completed.clear();
        self.committed.clear();
    }
}
