/// Structural hazards: full buffers stall issue without losing instructions.
pub mod hazards;

/// Randomized in-order commit and RAT/ROB consistency checks.
pub mod properties;



/// Latency and writeback-port timing.
pub mod timing;
