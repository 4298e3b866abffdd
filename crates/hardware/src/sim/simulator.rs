//! Simulator: the top-level run loop around the timing core.
//!
//! Owns the [`Cpu`] and decides when a run is over: the emulator has reported
//! an exit code and every issued instruction has committed, or the cycle
//! limit was reached.

use crate::common::error::Result;
use crate::config::Config;
use crate::core::Cpu;
use crate::sim::emulator::Emulator;

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    /// The timing core.
    pub cpu: Cpu,
    /// Cycle limit, if any.
    pub max_cycles: Option<u64>,
}

impl Simulator {
    /// Creates a simulator fed by `emulator`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`](crate::common::SimError::Config) if the
    /// configuration does not validate.
    pub fn new(config: &Config, emulator: Box<dyn Emulator>) -> Result<Self> {
        Ok(Self {
            cpu: Cpu::new(config, emulator)?,
            max_cycles: config.general.max_cycles,
        })
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) {
        self.cpu.tick();
    }

    /// Returns true once the program exited and the pipeline drained, or the
    /// cycle limit was hit.
    pub fn finished(&self) -> bool {
        let out_of_cycles = self
            .max_cycles
            .is_some_and(|limit| self.cpu.stats.cycles >= limit);
        out_of_cycles || (self.cpu.check_exit().is_some() && self.cpu.is_drained())
    }

    /// Runs to completion and returns the exit code, or `None` if the cycle
    /// limit stopped the run first.
    pub fn run(&mut self) -> Option<u64> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), calling `observe` after every cycle.
    pub fn run_with(&mut self, mut observe: impl FnMut(&Cpu)) -> Option<u64> {
        while !self.finished() {
            self.tick();
            observe(&self.cpu);
        }
        let exit = self.cpu.check_exit().filter(|_| self.cpu.is_drained());
        tracing::info!(
            cycles = self.cpu.stats.cycles,
            instructions = self.cpu.stats.instructions_retired,
            exit = ?exit,
            "simulation finished"
        );
        exit
    }
}
