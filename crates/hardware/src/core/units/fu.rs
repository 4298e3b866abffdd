//! Fixed-latency functional unit.
//!
//! A unit is pipelined: it accepts at most one instruction per cycle through
//! its dispatch port and may hold several in flight. Every [`tick`](FunctionalUnit::tick)
//! decrements the remaining cycles of each in-flight entry; entries reaching
//! zero move to the output queue in dispatch order, where the scoreboard's
//! writeback stage picks them up.

use std::collections::VecDeque;

use crate::common::error::StructuralHazard;
use crate::core::pipeline::reservation::RsIndex;
use crate::core::pipeline::rob::RobIndex;
use crate::core::pipeline::trace::FuType;

/// An instruction executing on, or completed by, a functional unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FuEntry {
    /// Reservation station holding the instruction.
    pub rs_index: RsIndex,
    /// ROB slot of the instruction.
    pub rob_index: RobIndex,
    /// Cycles left before the result is available.
    pub remaining: u32,
}

/// Fixed-latency, pipelined functional unit.
#[derive(Debug)]
pub struct FunctionalUnit {
    kind: FuType,
    latency: u32,
    /// In flight, oldest first.
    pipeline: VecDeque<FuEntry>,
    /// Completed results, oldest first.
    output: VecDeque<FuEntry>,
    /// Dispatch port already used this cycle.
    port_busy: bool,
}

impl FunctionalUnit {
    /// Creates a unit of class `kind` with a latency of `latency` cycles.
    pub fn new(kind: FuType, latency: u32) -> Self {
        assert!(latency > 0, "{kind} latency must be non-zero");
        Self {
            kind,
            latency,
            pipeline: VecDeque::new(),
            output: VecDeque::new(),
            port_busy: false,
        }
    }

    /// Unit class.
    #[inline]
    pub const fn kind(&self) -> FuType {
        self.kind
    }

    /// Latency in cycles.
    #[inline]
    pub const fn latency(&self) -> u32 {
        self.latency
    }

    /// Returns true if the dispatch port can accept an instruction this cycle.
    #[inline]
    pub const fn can_accept(&self) -> bool {
        !self.port_busy
    }

    /// Number of instructions still executing.
    #[inline]
    pub fn in_flight(&self) -> usize {
        self.pipeline.len()
    }

    /// Starts executing an instruction.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralHazard::FuBusy`] if the dispatch port was already
    /// used this cycle.
    pub fn dispatch(&mut self, rs_index: RsIndex, rob_index: RobIndex) -> Result<(), StructuralHazard> {
        if self.port_busy {
            return Err(StructuralHazard::FuBusy(self.kind));
        }
        self.port_busy = true;
        self.pipeline.push_back(FuEntry {
            rs_index,
            rob_index,
            remaining: self.latency,
        });
        Ok(())
    }

    /// Advances every in-flight instruction by one cycle and reopens the port.
    pub fn tick(&mut self) {
        for entry in &mut self.pipeline {
            entry.remaining = entry.remaining.saturating_sub(1);
        }
        // Fixed latency and one dispatch per cycle keep the queue sorted by
        // remaining cycles, so finished entries are always at the front.
        while self.pipeline.front().is_some_and(|e| e.remaining == 0) {
            if let Some(done) = self.pipeline.pop_front() {
                self.output.push_back(done);
            }
        }
        self.port_busy = false;
    }

    /// Oldest completed result.
    #[inline]
    pub fn front(&self) -> Option<&FuEntry> {
        self.output.front()
    }

    /// Removes the oldest completed result.
    #[inline]
    pub fn pop(&mut self) -> Option<FuEntry> {
        self.output.pop_front()
    }

    /// Returns true if no result is waiting for writeback.
    #[inline]
    pub fn output_is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Drops all in-flight and completed work.
    pub fn reset(&mut self) {
        self.pipeline.clear();
        self.output.clear();
        self.port_busy = false;
    }
}
