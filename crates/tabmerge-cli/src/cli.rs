//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tabmerge: clean, flag and merge CSV datasets
#[derive(Parser)]
#[command(name = "tabmerge")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process the input files and write the combined CSV
    Run {
        /// Input files in concatenation order (default: from config, else dataset1.csv dataset2.csv)
        #[arg(value_name = "INPUT")]
        inputs: Vec<PathBuf>,

        /// Output path for the combined CSV (default: combined.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Threshold for the flag column
        #[arg(long)]
        threshold: Option<f64>,

        /// Write a JSON run report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Load a single file and show its resolved schema
    Inspect {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// TOML configuration file (for delimiter, null values and declared types)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
