//! Onramp CLI
//!
//! Command-line interface for the Onramp signup flow.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use onramp_cli::{Cli, commands, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    commands::run(cli).await
}
