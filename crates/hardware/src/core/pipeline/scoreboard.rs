//! Tomasulo-style scoreboard: issue, execute-dispatch and writeback.
//!
//! The scoreboard owns all shared scheduling state: the Register Alias Table,
//! the Register Source Table, the reservation stations, the reorder buffer and
//! the functional units. Callers only see stage-level operations and cannot
//! update one structure without the others.
//!
//! Operand renaming is two-level: the RAT maps a register to the ROB index of
//! its latest producer, and the RST maps that ROB index to the reservation
//! station still computing it. A producer that has already broadcast has no
//! RST entry, so its consumers are ready immediately and read the value from
//! the ROB.

use crate::common::error::{ConsistencyError, IssueStall, StructuralHazard};
use crate::config::{Config, LatencyConfig};
use crate::core::pipeline::occupancy::{Occupancy, RobRow, RsRow};
use crate::core::pipeline::rat::RegisterAliasTable;
use crate::core::pipeline::reservation::{Operand, ReservationStations, RsIndex};
use crate::core::pipeline::rob::{ReorderBuffer, RobIndex};
use crate::core::pipeline::trace::{FuType, InstrTrace};
use crate::core::units::fu::FunctionalUnit;

/// Scheduling state of the out-of-order backend.
#[derive(Debug)]
pub struct Scoreboard {
    rat: RegisterAliasTable,
    /// Register Source Table: producing RS of each ROB slot, `None` once broadcast.
    rst: Vec<Option<RsIndex>>,
    rs: ReservationStations,
    rob: ReorderBuffer,
    /// One unit per [`FuType`], indexed by [`FuType::index`].
    units: [FunctionalUnit; FuType::COUNT],
}

impl Scoreboard {
    /// Builds a scoreboard sized by the pipeline configuration.
    pub fn new(config: &Config) -> Self {
        let p = &config.pipeline;
        Self::with_sizes(p.rob_size, p.rs_size, p.latency)
    }

    /// Builds a scoreboard with explicit resource sizes.
    pub fn with_sizes(rob_size: usize, rs_size: usize, latency: LatencyConfig) -> Self {
        Self {
            rat: RegisterAliasTable::new(),
            rst: vec![None; rob_size],
            rs: ReservationStations::new(rs_size),
            rob: ReorderBuffer::new(rob_size),
            units: FuType::ALL.map(|kind| FunctionalUnit::new(kind, latency.of(kind))),
        }
    }

    /// Renames and allocates an instruction.
    ///
    /// Capacity of both the ROB and the reservation stations is checked before
    /// any state changes, so a stalled issue leaves everything untouched.
    ///
    /// # Errors
    ///
    /// Returns an [`IssueStall`] carrying the trace back if the ROB or the
    /// reservation-station pool is full.
    pub fn issue(&mut self, trace: InstrTrace) -> Result<RobIndex, IssueStall> {
        if self.rob.is_full() {
            return Err(IssueStall {
                hazard: StructuralHazard::RobFull,
                trace,
            });
        }
        if self.rs.is_full() {
            return Err(IssueStall {
                hazard: StructuralHazard::RsFull,
                trace,
            });
        }

        // Sources are renamed before the destination mapping changes, so an
        // instruction reading its own destination waits on the older producer.
        let op1 = self.rename(trace.rs1);
        let op2 = self.rename(trace.rs2);
        let (fu, pc, rd, wb) = (trace.fu, trace.pc, trace.rd, trace.wb);

        let rob_index = self
            .rob
            .allocate(trace)
            .unwrap_or_else(|hazard| panic!("ROB allocation failed after capacity check: {hazard}"));

        if wb {
            self.rat.set(rd, Some(rob_index));
        }

        let rs_index = self
            .rs
            .push(rob_index, fu, pc, op1, op2)
            .unwrap_or_else(|hazard| panic!("RS allocation failed after capacity check: {hazard}"));
        self.rst[rob_index.0] = Some(rs_index);

        Ok(rob_index)
    }

    /// Resolves a source register to its availability.
    fn rename(&self, reg: usize) -> Operand {
        match self.rat.get(reg) {
            Some(producer) if self.rst[producer.0].is_some() => Operand::Pending(producer),
            _ => Operand::Ready,
        }
    }

    /// Dispatches every ready reservation station whose unit has a free port.
    ///
    /// Entries whose unit is busy stay ready and are retried next cycle.
    /// Returns the traces dispatched this cycle.
    pub fn execute(&mut self) -> Vec<InstrTrace> {
        let mut dispatched = Vec::new();
        for rs_index in self.rs.find_ready() {
            let Some(entry) = self.rs.get(rs_index) else {
                continue;
            };
            let (fu, rob_index) = (entry.fu, entry.rob_index);

            match self.units[fu.index()].dispatch(rs_index, rob_index) {
                Ok(()) => {
                    self.rs.mark_dispatched(rs_index);
                    if let Some(rob_entry) = self.rob.get(rob_index) {
                        dispatched.push(rob_entry.trace.clone());
                    }
                }
                Err(hazard) => {
                    tracing::trace!(rs = rs_index.0, rob = rob_index.0, %hazard, "dispatch deferred");
                }
            }
        }
        dispatched
    }

    /// Retires one functional-unit result.
    ///
    /// The lowest-index unit with a completed result owns the single writeback
    /// port. Its result wakes all waiting operands, clears the RST slot,
    /// notifies the ROB and frees the reservation station.
    pub fn writeback(&mut self) -> Option<InstrTrace> {
        let unit = self.units.iter_mut().find(|u| !u.output_is_empty())?;
        let done = unit.pop()?;

        let woken = self.rs.broadcast(done.rob_index);
        self.rst[done.rob_index.0] = None;
        self.rob.notify_completion(done.rob_index);
        let freed = self.rs.deallocate(done.rs_index);
        assert_eq!(
            freed.rob_index, done.rob_index,
            "{} held {} but its unit reported {}",
            done.rs_index, freed.rob_index, done.rob_index
        );

        tracing::trace!(rob = done.rob_index.0, rs = done.rs_index.0, woken, "broadcast");
        self.rob.get(done.rob_index).map(|e| e.trace.clone())
    }

    /// Runs the ROB commit step and receives the retired trace, if any.
    pub fn commit(&mut self) -> Option<InstrTrace> {
        let _ = self.rob.commit_step(&mut self.rat);
        self.rob.take_committed()
    }

    /// Advances every functional unit by one cycle.
    pub fn tick_units(&mut self) {
        for unit in &mut self.units {
            unit.tick();
        }
    }

    /// Register Alias Table.
    #[inline]
    pub const fn rat(&self) -> &RegisterAliasTable {
        &self.rat
    }

    /// Reorder buffer.
    #[inline]
    pub const fn rob(&self) -> &ReorderBuffer {
        &self.rob
    }

    /// Reservation stations.
    #[inline]
    pub const fn rs(&self) -> &ReservationStations {
        &self.rs
    }

    /// Producing reservation station of ROB slot `index`, if still pending.
    #[inline]
    pub fn rst(&self, index: RobIndex) -> Option<RsIndex> {
        self.rst[index.0]
    }

    /// Functional unit of class `kind`.
    #[inline]
    pub const fn unit(&self, kind: FuType) -> &FunctionalUnit {
        &self.units[kind.index()]
    }

    /// Returns true when nothing is in flight.
    pub fn is_idle(&self) -> bool {
        self.rob.is_empty()
            && self.rs.is_empty()
            && self
                .units
                .iter()
                .all(|u| u.in_flight() == 0 && u.output_is_empty())
    }

    /// Checks the cross-structure invariants.
    ///
    /// Every RAT mapping must point at an occupied ROB slot whose instruction
    /// writes that register, and every RST entry must point at an occupied
    /// reservation station holding that ROB slot.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConsistencyError`] found.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        for (reg, rob) in self.rat.iter_pending() {
            match self.rob.get(rob) {
                Some(entry) if entry.trace.wb && entry.trace.rd == reg => {}
                _ => return Err(ConsistencyError::RatStale { reg, rob }),
            }
        }
        for (slot, rs) in self.rst.iter().enumerate() {
            let Some(rs) = *rs else { continue };
            match self.rs.get(rs) {
                Some(entry) if entry.rob_index.0 == slot => {}
                _ => {
                    return Err(ConsistencyError::RstStale {
                        rob: RobIndex(slot),
                        rs,
                    });
                }
            }
        }
        Ok(())
    }

    /// Read-only view of ROB and RS occupancy.
    pub fn snapshot(&self) -> Occupancy {
        let head = self.rob.head();
        Occupancy {
            rob: self
                .rob
                .iter()
                .map(|(idx, e)| RobRow {
                    index: idx.0,
                    pc: e.trace.pc,
                    completed: e.is_completed(),
                    head: Some(idx) == head,
                })
                .collect(),
            rs: self
                .rs
                .iter()
                .map(|(idx, e)| RsRow {
                    index: idx.0,
                    rob: e.rob_index.0,
                    pc: e.pc,
                    fu: e.fu,
                    op1: pending_of(e.op1),
                    op2: pending_of(e.op2),
                    dispatched: e.dispatched,
                })
                .collect(),
        }
    }

    /// Per-cycle dump hook: logs every occupied RS and ROB slot at trace level.
    pub fn dump(&self) {
        for (idx, e) in self.rs.iter() {
            tracing::trace!(
                "{idx} rob={} pc={:#x} fu={} op1={} op2={} dispatched={}",
                e.rob_index,
                e.pc,
                e.fu,
                e.op1,
                e.op2,
                e.dispatched
            );
        }
        let head = self.rob.head();
        for (idx, e) in self.rob.iter() {
            tracing::trace!(
                "{idx} completed={} head={} trace=({})",
                e.is_completed(),
                Some(idx) == head,
                e.trace
            );
        }
    }

    /// Drops all in-flight state.
    pub fn reset(&mut self) {
        self.rat.reset();
        self.rst.fill(None);
        self.rs.reset();
        self.rob.reset();
        for unit in &mut self.units {
            unit.reset();
        }
    }
}

const fn pending_of(op: Operand) -> Option<usize> {
    match op {
        Operand::Ready => None,
        Operand::Pending(idx) => Some(idx.0),
    }
}
