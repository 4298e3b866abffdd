//! Hazard and Error definitions.
//!
//! This module defines the error taxonomy of the timing core. It provides:
//! 1. **Structural Hazards:** Back-pressure from a full ROB, a full reservation-station
//!    pool or a busy functional-unit port. Always recoverable by stalling one cycle.
//! 2. **Issue Stalls:** A structural hazard paired with the instruction it rejected, so
//!    ownership of the trace returns to the caller for a retry.
//! 3. **Configuration and Simulation Errors:** Invalid parameters, trace-file I/O and RAM access.
//!
//! Invariant violations (popping an empty ROB, committing an incomplete entry,
//! double-allocating a reservation station) are not represented here: they
//! indicate a scheduling defect and abort via `panic!`.

use std::io;
use std::path::PathBuf;

use crate::core::pipeline::reservation::RsIndex;
use crate::core::pipeline::rob::RobIndex;
use crate::core::pipeline::trace::{FuType, InstrTrace};

/// Resource back-pressure detected by the issue or execute stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StructuralHazard {
    /// Every reorder-buffer slot is occupied.
    #[error("reorder buffer full")]
    RobFull,

    /// Every reservation-station slot is occupied.
    #[error("reservation stations full")]
    RsFull,

    /// The functional unit already accepted an instruction this cycle.
    #[error("{0} dispatch port busy")]
    FuBusy(FuType),
}

/// An instruction that could not be issued this cycle.
///
/// Carries the rejected trace back to the driver unchanged, so it can be
/// retried next cycle without refetching from the emulator.
#[derive(Debug, thiserror::Error)]
#[error("issue stalled at pc {:#x}: {hazard}", trace.pc)]
pub struct IssueStall {
    /// The hazard that blocked issue.
    pub hazard: StructuralHazard,
    /// The instruction to retry.
    pub trace: InstrTrace,
}

/// Cross-structure inconsistency found by
/// [`Scoreboard::check_consistency`](crate::core::pipeline::Scoreboard::check_consistency).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyError {
    /// A RAT mapping points at a ROB slot that does not produce that register.
    #[error("RAT[x{reg}] -> {rob}, which does not write x{reg}")]
    RatStale {
        /// Architectural register.
        reg: usize,
        /// ROB slot the RAT points at.
        rob: RobIndex,
    },

    /// An RST entry points at a reservation station that does not hold its ROB slot.
    #[error("RST[{rob}] -> {rs}, which does not hold {rob}")]
    RstStale {
        /// ROB slot owning the RST entry.
        rob: RobIndex,
        /// Reservation station the RST points at.
        rs: RsIndex,
    },
}

/// Invalid core configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A buffer or pool size was zero.
    #[error("{name} must be at least 1")]
    ZeroSize {
        /// Name of the offending field.
        name: &'static str,
    },

    /// A functional-unit latency was zero.
    #[error("{unit} latency must be at least 1 cycle")]
    ZeroLatency {
        /// Unit whose latency is invalid.
        unit: FuType,
    },

    /// A predictor width is outside its supported range.
    #[error("{name} = {value} is outside {min}..={max}")]
    OutOfRange {
        /// Name of the offending field.
        name: &'static str,
        /// Configured value.
        value: u32,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },
}

/// Errors surfaced by the simulation surface (loader, RAM, configuration).
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// I/O failure while reading a trace or configuration file.
    #[error("could not read {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON deserialization failure.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A trace instruction names a register outside the architectural file.
    #[error("instruction {index}: register x{reg} does not exist")]
    InvalidRegister {
        /// Position of the instruction in the trace.
        index: usize,
        /// Offending register number.
        reg: usize,
    },

    /// RAM access outside the attached region.
    #[error("memory access out of range: {addr:#x} (+{len} bytes)")]
    Memory {
        /// Faulting address.
        addr: u64,
        /// Access length in bytes.
        len: usize,
    },
}

/// Result type for simulation-surface operations.
pub type Result<T> = std::result::Result<T, SimError>;
