//! Trace and configuration loading.
//!
//! This module reads the JSON inputs of a simulation run. It provides:
//! 1. **Trace files:** A recorded instruction stream plus the program's exit code.
//! 2. **Configuration files:** A [`Config`] document, validated before it is returned.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::constants::NUM_REGS;
use crate::common::error::{Result, SimError};
use crate::config::Config;
use crate::core::pipeline::trace::InstrTrace;

/// A recorded program run.
///
/// # Examples
///
/// ```
/// use tinyrv_core::sim::loader::parse_trace;
///
/// let file = parse_trace(r#"{
///     "exit_code": 3,
///     "instructions": [
///         { "pc": 256, "next_pc": 260, "rd": 1, "wb": true, "fu": "Alu" }
///     ]
/// }"#).unwrap();
/// assert_eq!(file.exit_code, 3);
/// assert_eq!(file.instructions[0].rd, 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceFile {
    /// Exit code reported once every instruction has been replayed
    #[serde(default)]
    pub exit_code: u64,
    /// Instructions in program order
    pub instructions: Vec<InstrTrace>,
}

impl TraceFile {
    /// Checks that every register operand names an architectural register.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`] for the first out-of-range operand.
    pub fn validate(&self) -> Result<()> {
        for (index, instr) in self.instructions.iter().enumerate() {
            if let Some(&reg) = [instr.rd, instr.rs1, instr.rs2]
                .iter()
                .find(|&&reg| reg >= NUM_REGS)
            {
                return Err(SimError::InvalidRegister { index, reg });
            }
        }
        Ok(())
    }
}

/// Parses and validates a trace document from a JSON string.
///
/// # Errors
///
/// Returns [`SimError::Json`] if the document is malformed and
/// [`SimError::InvalidRegister`] if an instruction names a register past x31.
pub fn parse_trace(json: &str) -> Result<TraceFile> {
    let file: TraceFile = serde_json::from_str(json)?;
    file.validate()?;
    Ok(file)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a trace file from disk.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read, [`SimError::Json`]
/// if it is malformed and [`SimError::InvalidRegister`] if it names a register
/// past x31.
pub fn load_trace_file(path: impl AsRef<Path>) -> Result<TraceFile> {
    let path = path.as_ref();
    let file = parse_trace(&read(path)?)?;
    tracing::debug!(
        path = %path.display(),
        instructions = file.instructions.len(),
        "loaded trace"
    );
    Ok(file)
}

/// Reads, parses and validates a configuration file.
///
/// # Errors
///
/// Returns [`SimError::Io`], [`SimError::Json`] or [`SimError::Config`].
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let config: Config = serde_json::from_str(&read(path.as_ref())?)?;
    config.validate()?;
    Ok(config)
}
