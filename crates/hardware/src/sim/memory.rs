//! Simulated RAM handle.
//!
//! A flat, byte-addressed region handed to the functional emulator through
//! [`Emulator::attach_memory`](super::emulator::Emulator::attach_memory). The
//! timing core never reads it; it only owns it until the emulator takes it.

use crate::common::error::{Result, SimError};

/// A contiguous RAM region starting at `base`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ram {
    base: u64,
    data: Vec<u8>,
}

impl Ram {
    /// Creates a zero-filled region of `size` bytes at `base`.
    pub fn new(base: u64, size: usize) -> Self {
        Self {
            base,
            data: vec![0; size],
        }
    }

    /// Creates a region at `base` initialized with `bytes`.
    pub fn from_bytes(base: u64, bytes: Vec<u8>) -> Self {
        Self { base, data: bytes }
    }

    /// Physical address of the first byte.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Returns the size of the region in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the region is zero-sized.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn range(&self, addr: u64, len: usize) -> Result<std::ops::Range<usize>> {
        addr.checked_sub(self.base)
            .and_then(|offset| usize::try_from(offset).ok())
            .and_then(|start| Some(start..start.checked_add(len)?))
            .filter(|range| range.end <= self.data.len())
            .ok_or(SimError::Memory { addr, len })
    }

    /// Reads a little-endian 32-bit word.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Memory`] if any byte lies outside the region.
    pub fn read_u32(&self, addr: u64) -> Result<u32> {
        let range = self.range(addr, 4)?;
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.data[range]);
        Ok(u32::from_le_bytes(word))
    }

    /// Writes a little-endian 32-bit word.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Memory`] if any byte lies outside the region.
    pub fn write_u32(&mut self, addr: u64, val: u32) -> Result<()> {
        let range = self.range(addr, 4)?;
        self.data[range].copy_from_slice(&val.to_le_bytes());
        Ok(())
    }

    /// Borrows the raw contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}
