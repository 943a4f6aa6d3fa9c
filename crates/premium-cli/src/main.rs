//! Premium Predictor - Main Entry Point

use clap::Parser;
use premium_cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}
