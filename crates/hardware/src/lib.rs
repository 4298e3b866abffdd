//! Out-of-order timing core for the tinyrv RISC-V simulator.
//!
//! This crate decides, cycle by cycle, when each in-flight instruction is
//! renamed, dispatched, executed, written back and committed:
//! 1. **Core:** Register renaming, reservation stations, reorder buffer and the per-cycle driver.
//! 2. **Units:** Fixed-latency functional units and branch predictors (GShare, static).
//! 3. **Simulation:** Emulator interface, trace replay, loader and top-level simulator.
//! 4. **Configuration and statistics:** JSON-deserializable config and performance counters.
//!
//! Functional decode and execution of RISC-V instructions is out of scope: the
//! core consumes immutable [`InstrTrace`] records produced by an [`Emulator`].

/// Common types and constants (errors, register and instruction constants).
pub mod common;
/// Core configuration (defaults, predictor selection, unit latencies).
pub mod config;
/// Timing core (pipeline structures, functional units, branch prediction, driver).
pub mod core;
/// Emulator interface, trace replay, loader and simulator loop.
pub mod sim;
/// Performance counters and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Per-cycle pipeline driver.
pub use crate::core::Cpu;
/// Immutable instruction record handed from the emulator to the core.
pub use crate::core::pipeline::trace::{FuType, InstrTrace};
/// Functional emulator interface consumed by the core.
pub use crate::sim::emulator::Emulator;
/// Top-level simulator loop.
pub use crate::sim::simulator::Simulator;
