//! CPU Core Definition and Per-Cycle Driver.
//!
//! This module defines the central `Cpu` structure, which owns the scoreboard,
//! the branch predictor and the functional emulator feeding it. It coordinates:
//! 1. **Stage ordering:** Each cycle runs commit, writeback, execute and issue, in
//!    that order, then advances every functional unit by one cycle.
//! 2. **Issue control:** Holds an instruction rejected by a structural hazard or a
//!    misprediction, and counts down the misprediction penalty.
//! 3. **Observability:** Statistics, occupancy snapshots and the per-cycle dump.

use std::fmt;

use crate::common::error::ConfigError;
use crate::config::Config;
use crate::core::pipeline::Scoreboard;
use crate::core::pipeline::occupancy::Occupancy;
use crate::core::pipeline::stages::{CommitStage, ExecuteStage, IssueStage, WritebackStage};
use crate::core::pipeline::trace::InstrTrace;
use crate::core::pipeline::traits::PipelineStage;
use crate::core::units::bru::BranchPredictorWrapper;
use crate::sim::emulator::Emulator;
use crate::sim::memory::Ram;
use crate::stats::SimStats;

/// Out-of-order timing core.
///
/// The core only schedules: every instruction it sees has already been
/// executed by the attached [`Emulator`].
pub struct Cpu {
    /// RAT, RST, reservation stations, ROB and functional units.
    pub(crate) scoreboard: Scoreboard,
    /// Branch predictor, `None` when prediction is disabled.
    pub(crate) predictor: Option<BranchPredictorWrapper>,
    /// Functional emulator producing instruction traces.
    pub(crate) emulator: Box<dyn Emulator>,
    /// Instruction fetched but not yet accepted by the scoreboard.
    pub(crate) stalled: Option<InstrTrace>,
    /// Remaining issue cycles blocked by a misprediction.
    pub(crate) issue_stalls: u32,
    /// Issue cycles blocked after each misprediction.
    pub(crate) mispredict_penalty: u32,
    /// Enable pipeline event tracing.
    pub(crate) trace_instructions: bool,
    /// The emulator returned `None` on the last fetch attempt.
    pub(crate) fetch_exhausted: bool,
    /// Performance statistics.
    pub stats: SimStats,
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("scoreboard", &self.scoreboard)
            .field("predictor", &self.predictor)
            .field("stalled", &self.stalled)
            .field("issue_stalls", &self.issue_stalls)
            .field("mispredict_penalty", &self.mispredict_penalty)
            .field("fetch_exhausted", &self.fetch_exhausted)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Cpu {
    /// Creates a core fed by `emulator`, sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`Config::validate`].
    pub fn new(config: &Config, emulator: Box<dyn Emulator>) -> Result<Self, ConfigError> {
        config.validate()?;
        let p = &config.pipeline;
        tracing::debug!(
            rob = p.rob_size,
            rs = p.rs_size,
            predictor = ?p.branch_predictor,
            penalty = p.mispredict_penalty,
            "core configured"
        );
        Ok(Self {
            scoreboard: Scoreboard::new(config),
            predictor: BranchPredictorWrapper::new(config),
            emulator,
            stalled: None,
            issue_stalls: 0,
            mispredict_penalty: p.mispredict_penalty,
            trace_instructions: config.general.trace_instructions,
            fetch_exhausted: false,
            stats: SimStats::default(),
        })
    }

    /// Advances the core by one clock cycle.
    ///
    /// Stages run back to front so that a structure freed this cycle (a ROB
    /// slot at commit, a reservation station at writeback) can be reused by
    /// the issue stage in the same cycle.
    pub fn tick(&mut self) {
        CommitStage::tick(self);
        WritebackStage::tick(self);
        ExecuteStage::tick(self);
        IssueStage::tick(self);
        self.scoreboard.tick_units();

        if cfg!(debug_assertions) {
            if let Err(msg) = self.scoreboard.check_consistency() {
                panic!("cycle {}: {msg}", self.stats.cycles);
            }
        }

        if self.trace_instructions || cfg!(feature = "always-trace") {
            tracing::trace!(cycle = self.stats.cycles, "occupancy");
            self.scoreboard.dump();
        }
        self.stats.cycles += 1;
    }

    /// Returns true while issued instructions are uncommitted or an
    /// instruction is waiting to issue.
    pub fn running(&self) -> bool {
        self.stats.instructions_issued != self.stats.instructions_retired
            || self.stalled.is_some()
    }

    /// Returns true once the emulator is exhausted and every instruction has committed.
    pub fn is_drained(&self) -> bool {
        self.fetch_exhausted && !self.running() && self.scoreboard.is_idle()
    }

    /// The program's exit code, once the emulator reports one.
    pub fn check_exit(&self) -> Option<u64> {
        self.emulator.check_exit()
    }

    /// Hands `ram` to the emulator.
    pub fn attach_ram(&mut self, ram: Ram) {
        self.emulator.attach_memory(ram);
    }

    /// Restores the power-on state: empties every structure, rewinds the
    /// emulator and clears statistics.
    pub fn reset(&mut self) {
        self.scoreboard.reset();
        if let Some(bp) = self.predictor.as_mut() {
            bp.reset();
        }
        self.emulator.reset();
        self.stalled = None;
        self.issue_stalls = 0;
        self.fetch_exhausted = false;
        self.stats = SimStats::default();
    }

    /// Performance statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Read-only ROB/RS occupancy.
    pub fn snapshot(&self) -> Occupancy {
        self.scoreboard.snapshot()
    }

    /// Logs ROB/RS occupancy at trace level.
    pub fn dump(&self) {
        self.scoreboard.dump();
    }

    /// Scheduling state.
    pub const fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// The active branch predictor.
    pub const fn predictor(&self) -> Option<&BranchPredictorWrapper> {
        self.predictor.as_ref()
    }

    /// Instruction currently held at issue.
    pub const fn stalled(&self) -> Option<&InstrTrace> {
        self.stalled.as_ref()
    }

    /// Remaining issue cycles blocked by a misprediction.
    pub const fn issue_stalls(&self) -> u32 {
        self.issue_stalls
    }

    /// Prints the performance summary to stdout.
    pub fn show_stats(&self) {
        self.stats.print();
    }
}
