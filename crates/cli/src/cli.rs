use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use trustar_search::{Attribute, Observable};

#[derive(Parser, Debug)]
#[command(name = "trustar", version)]
#[command(about = "Build and send TruStar indicator search and tag requests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML config file (defaults to ./trustar.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base endpoint
    #[arg(long, global = true)]
    pub api_endpoint: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search indicators
    Search(SearchArgs),

    /// Add or remove user tags on an indicator
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Print the JSON Schema of the request descriptor
    Schema,
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Free-text search term
    #[arg(long)]
    pub query_term: Option<String>,

    /// Window start: epoch seconds or a date such as 2022-01-01 or "3 days ago"
    #[arg(long)]
    pub from: Option<String>,

    /// Window end, same formats as --from
    #[arg(long)]
    pub to: Option<String>,

    /// UPDATED, CREATED or PROCESSED_AT
    #[arg(long)]
    pub sort_column: Option<String>,

    /// Priority score between -1 and 3 (repeatable)
    #[arg(long = "priority-score", allow_negative_numbers = true)]
    pub priority_scores: Vec<i32>,

    /// Enclave id (repeatable)
    #[arg(long = "enclave-id")]
    pub enclave_ids: Vec<String>,

    /// Observable type such as IP4 or SHA256 (repeatable)
    #[arg(long = "type")]
    pub types: Vec<String>,

    /// Attribute filter as TYPE=VALUE (repeatable)
    #[arg(long = "attribute", value_parser = parse_attribute)]
    pub attributes: Vec<Attribute>,

    /// Related observable as TYPE=VALUE (repeatable)
    #[arg(long = "related", value_parser = parse_observable)]
    pub related: Vec<Observable>,

    /// Results per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Raw body parameter as KEY=JSON; applied last, so it overrides other flags
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, Value)>,

    /// Send the request instead of printing it
    #[arg(long)]
    pub execute: bool,
}

#[derive(Subcommand, Debug)]
pub enum TagAction {
    /// Attach tags to an indicator
    Add(TagArgs),

    /// Remove tags from an indicator
    Delete(TagArgs),
}

#[derive(Args, Debug, Default)]
pub struct TagArgs {
    #[arg(long)]
    pub indicator_id: Option<String>,

    /// Tag name (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Send the request instead of printing it
    #[arg(long)]
    pub execute: bool,
}

fn split_pair(raw: &str) -> Result<(&str, &str), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))
}

fn parse_attribute(raw: &str) -> Result<Attribute, String> {
    let (kind, value) = split_pair(raw)?;
    Ok(Attribute::new(kind, value))
}

fn parse_observable(raw: &str) -> Result<Observable, String> {
    let (kind, value) = split_pair(raw)?;
    Ok(Observable::new(kind, value))
}

/// Values that are not valid JSON are kept as plain strings.
fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = split_pair(raw)?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn pairs_split_on_first_equals() {
        assert_eq!(
            parse_attribute("MALWARE=a=b").unwrap(),
            Attribute::new("MALWARE", "a=b")
        );
        assert!(parse_observable("IP4").is_err());
        assert!(parse_observable("=1.2.3.4").is_err());
    }

    #[test]
    fn params_fall_back_to_strings() {
        assert_eq!(
            parse_param("limit=5").unwrap(),
            ("limit".to_string(), Value::from(5))
        );
        assert_eq!(
            parse_param("cursor=abc").unwrap(),
            ("cursor".to_string(), Value::from("abc"))
        );
    }

    #[test]
    fn negative_priority_scores_parse() {
        let cli = Cli::try_parse_from([
            "trustar",
            "search",
            "--priority-score",
            "-1",
            "--priority-score",
            "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Search(args) => assert_eq!(args.priority_scores, vec![-1, 3]),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
