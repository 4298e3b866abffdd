//! Functional emulator interface.
//!
//! The timing core never decodes or executes instructions itself. Each issue
//! cycle it pulls the next already-executed instruction from an [`Emulator`]
//! and only schedules it. [`TraceEmulator`] replays a recorded trace and is the
//! emulator used by the `sim` binary and the test-suite.

use crate::core::pipeline::trace::InstrTrace;
use crate::sim::loader::TraceFile;
use crate::sim::memory::Ram;

/// Source of functionally executed instructions, consumed in program order.
pub trait Emulator {
    /// Executes the next instruction and returns its trace, or `None` once the
    /// program has stopped producing instructions.
    fn step(&mut self) -> Option<InstrTrace>;

    /// Returns the program's exit code once it has finished.
    fn check_exit(&self) -> Option<u64>;

    /// Hands the emulator the RAM it executes against.
    fn attach_memory(&mut self, ram: Ram);

    /// Rewinds the emulator to its initial state.
    fn reset(&mut self) {}
}

/// Replays a fixed list of instruction traces.
#[derive(Clone, Debug, Default)]
pub struct TraceEmulator {
    instructions: Vec<InstrTrace>,
    cursor: usize,
    exit_code: u64,
    memory: Option<Ram>,
}

impl TraceEmulator {
    /// Creates an emulator that yields `instructions` in order, then exits with `exit_code`.
    pub fn new(instructions: Vec<InstrTrace>, exit_code: u64) -> Self {
        Self {
            instructions,
            cursor: 0,
            exit_code,
            memory: None,
        }
    }

    /// Number of instructions not yet handed out.
    pub fn remaining(&self) -> usize {
        self.instructions.len() - self.cursor
    }

    /// The attached RAM, if any.
    pub const fn memory(&self) -> Option<&Ram> {
        self.memory.as_ref()
    }
}

impl From<TraceFile> for TraceEmulator {
    fn from(file: TraceFile) -> Self {
        Self::new(file.instructions, file.exit_code)
    }
}

impl Emulator for TraceEmulator {
    fn step(&mut self) -> Option<InstrTrace> {
        let trace = self.instructions.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(trace)
    }

    fn check_exit(&self) -> Option<u64> {
        (self.cursor == self.instructions.len()).then_some(self.exit_code)
    }

    fn attach_memory(&mut self, ram: Ram) {
        self.memory = Some(ram);
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}
