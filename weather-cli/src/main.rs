//! Binary crate for the `weather-fetcher` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive city prompt
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod logging;
mod render;
mod session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    logging::init(cmd.verbose);

    cmd.run().await.inspect_err(|_| println!("Unexpected error occurred:"))
}
