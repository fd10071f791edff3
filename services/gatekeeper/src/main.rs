//! Gatekeeper entry point.
//!
//! Parses arguments, loads the access configuration, and prints the answer
//! to stdout. Configuration errors exit non-zero with the full context chain.
use clap::Parser;
use gatekeeper::{Cli, observability};

fn main() -> anyhow::Result<()> {
    observability::init_tracing("info");
    let cli = Cli::parse();
    let output = gatekeeper::run(&cli)?;
    println!("{output}");
    Ok(())
}
