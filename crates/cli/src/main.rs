//! tinyrv timing-core simulator CLI.
//!
//! This binary replays a recorded instruction trace through the out-of-order
//! timing core. It performs:
//! 1. **Loading:** Reads the JSON trace and an optional JSON configuration.
//! 2. **Simulation:** Ticks the core until the trace exits and the pipeline drains.
//! 3. **Reporting:** Prints the performance summary, and optionally the ROB/RS
//!    occupancy after every cycle as JSON lines.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tinyrv_core::Simulator;
use tinyrv_core::config::Config;
use tinyrv_core::sim::emulator::TraceEmulator;
use tinyrv_core::sim::loader;

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "tinyrv out-of-order timing core",
    long_about = "Replay an instruction trace through the out-of-order timing core.\n\nLogging is controlled by RUST_LOG (e.g. RUST_LOG=tinyrv_core=trace).\n\nExamples:\n  sim run -f trace.json\n  sim run -f trace.json -c config.json --max-cycles 10000 --dump"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace file through the core.
    Run {
        /// JSON trace to replay.
        #[arg(short, long)]
        file: PathBuf,

        /// JSON configuration (defaults are used for missing fields).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Stop after this many cycles.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Print ROB/RS occupancy as a JSON line after every cycle.
        #[arg(long)]
        dump: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Run {
            file,
            config,
            max_cycles,
            dump,
        } => cmd_run(&file, config.as_deref(), max_cycles, dump),
    };
    process::exit(code);
}

/// Runs a trace to completion and returns the process exit code.
fn cmd_run(
    file: &std::path::Path,
    config_path: Option<&std::path::Path>,
    max_cycles: Option<u64>,
    dump: bool,
) -> i32 {
    let mut config = match config_path {
        Some(path) => match loader::load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[!] FATAL: {e}");
                return 1;
            }
        },
        None => Config::default(),
    };
    if max_cycles.is_some() {
        config.general.max_cycles = max_cycles;
    }

    let trace = match loader::load_trace_file(file) {
        Ok(trace) => trace,
        Err(e) => {
            eprintln!("[!] FATAL: {e}");
            return 1;
        }
    };

    println!("[*] Replaying {} ({} instructions)", file.display(), trace.instructions.len());
    println!(
        "  ROB: {}  RS: {}  Predictor: {:?}  Penalty: {}",
        config.pipeline.rob_size,
        config.pipeline.rs_size,
        config.pipeline.branch_predictor,
        config.pipeline.mispredict_penalty
    );

    let mut sim = match Simulator::new(&config, Box::new(TraceEmulator::from(trace))) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("[!] FATAL: {e}");
            return 1;
        }
    };

    let exit = sim.run_with(|cpu| {
        if dump {
            match serde_json::to_string(&cpu.snapshot()) {
                Ok(line) => println!("{{\"cycle\":{},\"occupancy\":{line}}}", cpu.stats.cycles),
                Err(e) => tracing::warn!("occupancy dump failed: {e}"),
            }
        }
    });

    sim.cpu.show_stats();
    match exit {
        Some(code) => {
            println!("[*] Exit code {code}");
            i32::try_from(code).unwrap_or(1)
        }
        None => {
            eprintln!(
                "[!] Cycle limit reached after {} cycles",
                sim.cpu.stats.cycles
            );
            1
        }
    }
}
