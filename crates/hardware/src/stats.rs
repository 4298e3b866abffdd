//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics of the timing core. It provides:
//! 1. **Cycle and IPC:** Total cycles, issued and committed instructions, and derived IPC/CPI.
//! 2. **Instruction mix:** Committed instructions per functional unit, plus control flow.
//! 3. **Branch prediction:** Correct and wrong predictions, and accuracy.
//! 4. **Stalls:** Issue cycles lost to mispredictions and to full buffers.

use std::time::Instant;

use crate::core::pipeline::trace::{FuType, InstrTrace};

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions accepted by the scoreboard.
    pub instructions_issued: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,

    /// Count of committed ALU instructions.
    pub inst_alu: u64,
    /// Count of committed load/store instructions.
    pub inst_lsu: u64,
    /// Count of committed CSR instructions.
    pub inst_csr: u64,
    /// Count of committed control-flow instructions (any unit).
    pub inst_branch: u64,

    /// Number of branch predictions that were correct.
    pub branch_predictions: u64,
    /// Number of branch predictions that were wrong (mispredictions).
    pub branch_mispredictions: u64,

    /// Issue cycles lost to misprediction penalties.
    pub stalls_control: u64,
    /// Issue cycles lost to a full ROB or reservation-station pool.
    pub stalls_structural: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_issued: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_lsu: 0,
            inst_csr: 0,
            inst_branch: 0,
            branch_predictions: 0,
            branch_mispredictions: 0,
            stalls_control: 0,
            stalls_structural: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"core"`, `"instruction_mix"`, `"branch"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "core", "instruction_mix", "branch"];

impl SimStats {
    /// Accounts a committed instruction in the instruction mix.
    pub fn record_commit(&mut self, trace: &InstrTrace) {
        match trace.fu {
            FuType::Alu => self.inst_alu += 1,
            FuType::Lsu => self.inst_lsu += 1,
            FuType::Csr => self.inst_csr += 1,
        }
        if trace.control_flow {
            self.inst_branch += 1;
        }
    }

    /// Committed instructions per cycle, or 0.0 before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Fraction of predicted control-flow instructions predicted correctly, in percent.
    pub fn branch_accuracy(&self) -> f64 {
        let total = self.branch_predictions + self.branch_mispredictions;
        if total == 0 {
            0.0
        } else {
            100.0 * (self.branch_predictions as f64 / total as f64)
        }
    }

    /// The one-line performance summary, e.g. `PERF: instrs=12, cycles=20`.
    pub fn perf_line(&self) -> String {
        format!(
            "PERF: instrs={}, cycles={}",
            self.instructions_retired, self.cycles
        )
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;

        println!("{}", self.perf_line());
        if want("summary") {
            let khz = if seconds > 0.0 {
                (self.cycles as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            println!("==========================================================");
            println!("TIMING CORE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {:.4} s", seconds);
            println!("sim_cycles               {}", self.cycles);
            println!("sim_freq                 {:.2} kHz", khz);
            println!("sim_insts_issued         {}", self.instructions_issued);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", cyc / instr);
            println!("----------------------------------------------------------");
        }
        if want("core") {
            println!("CORE BREAKDOWN");
            println!(
                "  stalls.control         {} ({:.2}%)",
                self.stalls_control,
                (self.stalls_control as f64 / cyc) * 100.0
            );
            println!(
                "  stalls.structural      {} ({:.2}%)",
                self.stalls_structural,
                (self.stalls_structural as f64 / cyc) * 100.0
            );
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.lsu", self.inst_lsu),
                ("op.csr", self.inst_csr),
                ("op.branch", self.inst_branch),
            ] {
                println!(
                    "  {:<22} {} ({:.2}%)",
                    name,
                    count,
                    (count as f64 / instr) * 100.0
                );
            }
            println!("----------------------------------------------------------");
        }
        if want("branch") {
            println!("BRANCH PREDICTION");
            println!(
                "  bp.lookups             {}",
                self.branch_predictions + self.branch_mispredictions
            );
            println!("  bp.mispredicts         {}", self.branch_mispredictions);
            println!("  bp.accuracy            {:.2}%", self.branch_accuracy());
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
