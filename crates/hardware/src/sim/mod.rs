//! Simulation surface around the timing core.
//!
//! Provides the functional emulator interface, trace and configuration
//! loading, the RAM handle, and the top-level run loop.

/// Emulator trait and trace replay.
pub mod emulator;

/// Trace and configuration file loading.
pub mod loader;

/// RAM handle passed to the emulator.
pub mod memory;

/// Top-level simulator loop.
pub mod simulator;
