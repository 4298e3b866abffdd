//! # Unit Components
//!
//! Organizes the unit tests by the crate module they exercise.

/// Configuration defaults, JSON deserialization and validation.
pub mod config;



/// Statistics accounting.
pub mod stats;
