//! Execution units and functional components.
//!
//! This module contains the fixed-latency functional units the scoreboard
//! dispatches to and the branch prediction unit consulted at issue.

/// Branch Resolution Unit: branch predictors and the target cache.
pub mod bru;

/// Fixed-latency pipelined functional unit.
pub mod fu;

pub use self::fu::{FuEntry, FunctionalUnit};
