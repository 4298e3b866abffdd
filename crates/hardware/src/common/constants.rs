//! Global Core Constants.
//!
//! This module defines constants shared by the pipeline structures. It includes:
//! 1. **Register Constants:** Architectural register count and the hardwired zero register.
//! 2. **Instruction Constants:** Fixed instruction width used for fall-through prediction.

/// Number of architectural integer registers (x0..x31).
pub const NUM_REGS: usize = 32;

/// Index of the hardwired zero register.
pub const ZERO_REG: usize = 0;

/// Size of a standard (32-bit) RISC-V instruction in bytes.
///
/// A control-flow instruction is considered taken when its next PC differs
/// from `pc + INSTRUCTION_WIDTH`.
pub const INSTRUCTION_WIDTH: u64 = 4;

/// Number of low PC bits ignored when indexing predictor tables.
pub const PC_ALIGN_SHIFT: u32 = 2;
