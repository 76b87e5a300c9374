//! TruStar command-line client
//!
//! Builds indicator search and tag requests from flags. By default the finalized
//! request descriptor is printed as JSON; `--execute` sends it to the API.
//!
//! ## Usage
//!
//! ```text
//! trustar search --enclave-id E1 --from 2022-01-01 --to 2022-02-01 --sort-column CREATED
//! trustar tag add --indicator-id abc --tag phishing --execute
//! trustar tag delete --indicator-id abc
//! ```
//!
//! Logging goes to stderr (stdout carries the JSON output); see [`logging`] for the
//! environment variables that shape it.

use anyhow::Result;
use clap::Parser;

mod cli;
mod command;
mod config;
mod http;
mod logging;

use cli::Cli;
use logging::LogSettings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&LogSettings::from_env())?;

    log::debug!("Starting trustar {}", env!("CARGO_PKG_VERSION"));
    command::run(cli).await
}
