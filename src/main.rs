// Marketplace agenda
// Main entry point

use anyhow::Result;
use clap::Parser;

use agenda::cli::{self, Cli};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting agenda");

    let output = cli::run(Cli::parse())?;
    print!("{}", output);
    Ok(())
}
