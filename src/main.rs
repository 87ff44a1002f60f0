//! nnet - Neural Network Topology Builder
//!
//! Reads a topology script, builds the network graph, and prints a
//! structural summary.
//!
//! # Usage
//!
//! ```bash
//! nnet network.nnet
//! ```

use std::path::PathBuf;

use clap::Parser;
use nnet_core::{dsl, error::Result};

/// Script-driven neural network topology builder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the topology script
    #[arg(value_name = "SCRIPT_FILE")]
    script_file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let parsed = dsl::parse_file(&args.script_file)?;

    for warning in &parsed.warnings {
        eprintln!("warning: {warning}");
    }

    println!("Parse successful.");
    print!("{}", parsed.network);

    Ok(())
}
