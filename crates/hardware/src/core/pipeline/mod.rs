//! Out-of-order pipeline structures.
//!
//! This module contains the scheduling state of the timing core:
//! 1. **Trace:** The immutable instruction record consumed from the emulator.
//! 2. **RAT:** Architectural register to in-flight producer mapping.
//! 3. **Reservation Stations:** Issued instructions waiting on operands.
//! 4. **ROB:** Circular in-order log enforcing in-order commit.
//! 5. **Scoreboard:** Issue, execute-dispatch and writeback over all of the above.

/// ROB/RS occupancy snapshot for debug tooling.
pub mod occupancy;

/// Register Alias Table.
pub mod rat;

/// Reservation-station pool and operand tags.
pub mod reservation;

/// Reorder Buffer.
pub mod rob;

/// Per-cycle stages: commit, writeback, execute, issue.
pub mod stages;

/// Scoreboard orchestrating RAT, RST, RS, ROB and functional units.
pub mod scoreboard;

/// Instruction trace records and functional-unit classes.
pub mod trace;

/// Pipeline stage interface.
pub mod traits;

pub use self::scoreboard::Scoreboard;
pub use self::trace::{FuType, InstrTrace};
