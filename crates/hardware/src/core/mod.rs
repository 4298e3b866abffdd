//! Core processor implementation.
//!
//! This module contains the out-of-order timing core: the per-cycle driver,
//! the scheduling structures it advances, and the functional units and branch
//! predictors it drives.

/// CPU driver and per-cycle orchestration.
pub mod cpu;

/// Scheduling structures (RAT, RS, ROB, scoreboard) and pipeline stages.
pub mod pipeline;

/// Functional units and branch prediction.
pub mod units;

pub use self::cpu::Cpu;
