//! Instruction trace records.
//!
//! An [`InstrTrace`] is the immutable hand-off from the functional emulator to
//! the timing core. The emulator has already computed the architectural effect;
//! the core only needs the register dependencies, the destination, the unit the
//! instruction executes on, and the resolved control flow.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::constants::INSTRUCTION_WIDTH;

/// Functional-unit class an instruction executes on.
///
/// The discriminant is the unit's index in the scoreboard; a lower index wins
/// the single writeback port when several units complete in the same cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum FuType {
    /// Integer arithmetic, logic and control flow.
    #[default]
    #[serde(alias = "ALU")]
    Alu = 0,
    /// Loads and stores.
    #[serde(alias = "LSU")]
    Lsu = 1,
    /// CSR reads/writes and system instructions.
    #[serde(alias = "CSR")]
    Csr = 2,
}

impl FuType {
    /// Number of functional-unit classes.
    pub const COUNT: usize = 3;

    /// Every unit class, in writeback-priority order.
    pub const ALL: [Self; Self::COUNT] = [Self::Alu, Self::Lsu, Self::Csr];

    /// Index of this unit in the scoreboard's unit array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alu => write!(f, "ALU"),
            Self::Lsu => write!(f, "LSU"),
            Self::Csr => write!(f, "CSR"),
        }
    }
}

/// Immutable record of one functionally executed instruction.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InstrTrace {
    /// Program counter of the instruction.
    pub pc: u64,
    /// Architectural next program counter (resolved branch/jump target or fall-through).
    pub next_pc: u64,
    /// First source register.
    #[serde(default)]
    pub rs1: usize,
    /// Second source register.
    #[serde(default)]
    pub rs2: usize,
    /// Destination register.
    #[serde(default)]
    pub rd: usize,
    /// Whether the instruction writes `rd` (false for branches, stores, x0 writes).
    #[serde(default)]
    pub wb: bool,
    /// Functional unit the instruction executes on.
    #[serde(default)]
    pub fu: FuType,
    /// Whether the instruction is a branch or jump and consults the predictor.
    #[serde(default)]
    pub control_flow: bool,
}

impl InstrTrace {
    /// Returns true if control left the fall-through path.
    #[inline]
    pub const fn taken(&self) -> bool {
        self.next_pc != self.pc.wrapping_add(INSTRUCTION_WIDTH)
    }
}

impl fmt::Display for InstrTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: pc={:#x}", self.fu, self.pc)?;
        if self.wb {
            write!(f, ", rd=x{}", self.rd)?;
        }
        write!(f, ", rs1=x{}, rs2=x{}", self.rs1, self.rs2)?;
        if self.control_flow {
            write!(f, ", next_pc={:#x}", self.next_pc)?;
        }
        Ok(())
    }
}
