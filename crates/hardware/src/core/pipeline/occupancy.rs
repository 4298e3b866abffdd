//! Serializable ROB/RS occupancy snapshot for external debug tooling.

use serde::Serialize;

use crate::core::pipeline::trace::FuType;

/// One occupied reorder-buffer slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RobRow {
    /// Slot index.
    pub index: usize,
    /// Program counter of the instruction.
    pub pc: u64,
    /// Whether the instruction has been written back.
    pub completed: bool,
    /// Whether this slot is the commit point.
    pub head: bool,
}

/// One occupied reservation station.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RsRow {
    /// Station index.
    pub index: usize,
    /// ROB slot of the instruction.
    pub rob: usize,
    /// Program counter of the instruction.
    pub pc: u64,
    /// Target functional unit.
    pub fu: FuType,
    /// ROB slot the first operand waits on.
    pub op1: Option<usize>,
    /// ROB slot the second operand waits on.
    pub op2: Option<usize>,
    /// Whether the instruction is executing.
    pub dispatched: bool,
}

/// ROB and RS occupancy at the end of a cycle, oldest ROB entry first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    /// Occupied ROB slots from head to tail.
    pub rob: Vec<RobRow>,
    /// Occupied reservation stations in index order.
    pub rs: Vec<RsRow>,
}
