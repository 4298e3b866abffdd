//! Common utilities and types used throughout the timing core.
//!
//! This module provides fundamental building blocks shared by every component:
//! 1. **Constants:** Register-file and instruction-width constants.
//! 2. **Error Handling:** Structural hazards, issue stalls, configuration and simulation errors.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for hazards, configuration and simulation I/O.
pub mod error;

pub use constants::{INSTRUCTION_WIDTH, NUM_REGS};
pub use error::{ConfigError, ConsistencyError, IssueStall, SimError, StructuralHazard};
