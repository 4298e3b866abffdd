//! Shared test infrastructure.



/// `mockall` mocks of the emulator interface.
pub mod mocks;
