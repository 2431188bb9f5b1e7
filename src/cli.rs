use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Single-CPU scheduling simulator.
///
/// Runs job sets under FCFS, SJF, Priority or Round-Robin scheduling and
/// reports per-job and aggregate metrics.
#[derive(Parser, Debug)]
#[command(name = "cpu-schedsim", version, about = "Single-CPU scheduling simulator")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate a job set under one policy
    Run {
        #[command(flatten)]
        input: InputArgs,

        /// Policy: fcfs, sjf, priority, or rr
        #[arg(long, short)]
        policy: String,

        /// Time quantum (required for rr)
        #[arg(long, short)]
        quantum: Option<i64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Simulate a job set under every policy
    Compare {
        #[command(flatten)]
        input: InputArgs,

        /// Time quantum for Round-Robin
        #[arg(long, short, default_value = "4")]
        quantum: i64,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Generate a random job set as JSON
    Generate {
        /// Number of jobs
        #[arg(long, default_value = "5")]
        count: usize,

        /// RNG seed (random if not set)
        #[arg(long)]
        seed: Option<u64>,

        /// Latest arrival tick
        #[arg(long, default_value = "10")]
        max_arrival: i64,

        /// Longest burst
        #[arg(long, default_value = "10")]
        max_burst: i64,

        /// Number of priority levels
        #[arg(long, default_value = "3")]
        priority_levels: i32,

        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage saved job sets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PresetAction {
    /// Save a job file as a preset
    Save {
        /// JSON file with an array of jobs
        #[arg(long)]
        jobs: PathBuf,

        /// Preset name (defaults to "Test N")
        #[arg(long)]
        name: Option<String>,

        /// Preset store file
        #[arg(long, default_value = "presets.json")]
        store: PathBuf,
    },

    /// List saved presets
    List {
        /// Preset store file
        #[arg(long, default_value = "presets.json")]
        store: PathBuf,
    },
}

/// Where the job set comes from.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// JSON file with an array of jobs
    #[arg(long, conflicts_with = "preset", required_unless_present = "preset")]
    pub jobs: Option<PathBuf>,

    /// Name of a saved preset
    #[arg(long)]
    pub preset: Option<String>,

    /// Preset store file
    #[arg(long, default_value = "presets.json")]
    pub store: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}
