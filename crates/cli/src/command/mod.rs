mod search;
mod tag;

use crate::cli::{Cli, Commands, TagAction};
use crate::config::CliConfig;
use crate::http::HttpTransport;
use anyhow::{Context, Result};
use serde::Serialize;

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.api_endpoint {
        config.api.api_endpoint = endpoint;
    }

    match cli.command {
        Commands::Search(args) => search::run(args, &config).await,
        Commands::Tag { action } => match action {
            TagAction::Add(args) => tag::add(args, &config).await,
            TagAction::Delete(args) => tag::delete(args, &config).await,
        },
        Commands::Schema => {
            let schema = trustar_protocol::request_schema().context("Failed to build schema")?;
            print_json(&schema)
        }
    }
}

fn transport(config: &CliConfig) -> Result<HttpTransport> {
    HttpTransport::new(&config.http).context("Failed to set up HTTP transport")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{rendered}");
    Ok(())
}
