//! Configuration system for the timing core.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the core. It provides:
//! 1. **Defaults:** Baseline sizes, latencies and predictor geometry.
//! 2. **Structures:** Hierarchical config for general settings, pipeline resources and predictor.
//! 3. **Enums:** Branch predictor selection and target-cache update policy.
//! 4. **Validation:** Rejection of parameters the pipeline structures cannot be built with.
//!
//! Configuration is supplied as JSON (`serde_json::from_str`) or via `Config::default()`.

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;
use crate::core::pipeline::trace::FuType;

/// Default configuration constants for the core.
mod defaults {
    /// Reorder buffer capacity (in-flight instructions).
    pub const ROB_SIZE: usize = 16;

    /// Reservation-station pool size.
    pub const RS_SIZE: usize = 8;

    /// Integer ALU latency in cycles.
    pub const ALU_LATENCY: u32 = 1;

    /// Load/store unit latency in cycles.
    pub const LSU_LATENCY: u32 = 3;

    /// CSR unit latency in cycles.
    pub const CSR_LATENCY: u32 = 2;

    /// Issue stall applied after a misprediction, in cycles.
    pub const MISPREDICT_PENALTY: u32 = 2;

    /// GShare table size, log2 (256 counters and 256 target-cache entries).
    pub const GSHARE_TABLE_BITS: u32 = 8;

    /// GShare global history width in bits.
    pub const GSHARE_HISTORY_BITS: u32 = 8;
}

/// Branch predictor implementation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// No prediction: fetch is assumed to follow the true path (no stalls).
    None,
    /// Static predictor (always not-taken).
    Static,
    /// GShare predictor (global history XOR PC).
    #[default]
    #[serde(alias = "GSHARE", alias = "Gshare")]
    GShare,
}

/// When the GShare target cache is written.
///
/// Two policies exist in the lineage of this core; the first is the standard
/// GShare behavior and the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BtbUpdatePolicy {
    /// Overwrite the entry on every taken outcome.
    #[default]
    OnTaken,
    /// Overwrite the entry only on a taken outcome that was predicted correctly.
    OnCorrectPrediction,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use tinyrv_core::config::{BranchPredictor, Config};
///
/// let json = r#"{
///     "general": { "trace_instructions": true },
///     "pipeline": {
///         "rob_size": 4,
///         "branch_predictor": "Static",
///         "latency": { "lsu": 5 }
///     }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.pipeline.rob_size, 4);
/// assert_eq!(config.pipeline.rs_size, 8);
/// assert_eq!(config.pipeline.latency.lsu, 5);
/// assert_eq!(config.pipeline.latency.alu, 1);
/// assert_eq!(config.pipeline.branch_predictor, BranchPredictor::Static);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline resources and branch predictor configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Checks that every structure can be built with these parameters.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found: a zero-sized buffer, a zero
    /// latency, or a predictor width outside its supported range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pipeline;
        if p.rob_size == 0 {
            return Err(ConfigError::ZeroSize { name: "rob_size" });
        }
        if p.rs_size == 0 {
            return Err(ConfigError::ZeroSize { name: "rs_size" });
        }
        for unit in FuType::ALL {
            if p.latency.of(unit) == 0 {
                return Err(ConfigError::ZeroLatency { unit });
            }
        }
        check_range("gshare.table_bits", p.gshare.table_bits, 1, 16)?;
        check_range("gshare.history_bits", p.gshare.history_bits, 1, 32)?;
        Ok(())
    }
}

fn check_range(name: &'static str, value: u32, min: u32, max: u32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log every pipeline event and the ROB/RS occupancy each cycle
    #[serde(default)]
    pub trace_instructions: bool,

    /// Stop the simulator after this many cycles (unbounded if unset)
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

/// Pipeline resources and branch predictor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Reorder buffer capacity
    #[serde(default = "PipelineConfig::default_rob_size")]
    pub rob_size: usize,

    /// Reservation-station pool size
    #[serde(default = "PipelineConfig::default_rs_size")]
    pub rs_size: usize,

    /// Branch predictor type
    #[serde(default)]
    pub branch_predictor: BranchPredictor,

    /// Cycles of issue stall after a misprediction
    #[serde(default = "PipelineConfig::default_mispredict_penalty")]
    pub mispredict_penalty: u32,

    /// GShare predictor geometry
    #[serde(default)]
    pub gshare: GShareConfig,

    /// Functional-unit latencies
    #[serde(default)]
    pub latency: LatencyConfig,
}

impl PipelineConfig {
    /// Returns the default reorder buffer capacity.
    fn default_rob_size() -> usize {
        defaults::ROB_SIZE
    }

    /// Returns the default reservation-station pool size.
    fn default_rs_size() -> usize {
        defaults::RS_SIZE
    }

    /// Returns the default misprediction penalty.
    fn default_mispredict_penalty() -> u32 {
        defaults::MISPREDICT_PENALTY
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rob_size: defaults::ROB_SIZE,
            rs_size: defaults::RS_SIZE,
            branch_predictor: BranchPredictor::default(),
            mispredict_penalty: defaults::MISPREDICT_PENALTY,
            gshare: GShareConfig::default(),
            latency: LatencyConfig::default(),
        }
    }
}

/// GShare predictor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GShareConfig {
    /// Log2 of the counter table and target cache size
    #[serde(default = "GShareConfig::default_table_bits")]
    pub table_bits: u32,

    /// Global history register width
    #[serde(default = "GShareConfig::default_history_bits")]
    pub history_bits: u32,

    /// Target cache update policy
    #[serde(default)]
    pub btb_update: BtbUpdatePolicy,
}

impl GShareConfig {
    /// Returns the default table size (log2).
    fn default_table_bits() -> u32 {
        defaults::GSHARE_TABLE_BITS
    }

    /// Returns the default global history width.
    fn default_history_bits() -> u32 {
        defaults::GSHARE_HISTORY_BITS
    }
}

impl Default for GShareConfig {
    fn default() -> Self {
        Self {
            table_bits: defaults::GSHARE_TABLE_BITS,
            history_bits: defaults::GSHARE_HISTORY_BITS,
            btb_update: BtbUpdatePolicy::default(),
        }
    }
}

/// Fixed latency, in cycles, of each functional unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Integer ALU (arithmetic, logic, branches)
    #[serde(default = "LatencyConfig::default_alu")]
    pub alu: u32,

    /// Load/store unit
    #[serde(default = "LatencyConfig::default_lsu")]
    pub lsu: u32,

    /// CSR unit
    #[serde(default = "LatencyConfig::default_csr")]
    pub csr: u32,
}

impl LatencyConfig {
    /// Returns the configured latency of `unit`.
    pub const fn of(&self, unit: FuType) -> u32 {
        match unit {
            FuType::Alu => self.alu,
            FuType::Lsu => self.lsu,
            FuType::Csr => self.csr,
        }
    }

    fn default_alu() -> u32 {
        defaults::ALU_LATENCY
    }

    fn default_lsu() -> u32 {
        defaults::LSU_LATENCY
    }

    fn default_csr() -> u32 {
        defaults::CSR_LATENCY
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            alu: defaults::ALU_LATENCY,
            lsu: defaults::LSU_LATENCY,
            csr: defaults::CSR_LATENCY,
        }
    }
}
