//! Logger setup for the binary.
//!
//! | Variable | Effect |
//! |---|---|
//! | `TRUSTAR_LOG` | env_logger filter, default `warn` |
//! | `TRUSTAR_LOG_FORMAT` | `json` for one JSON object per record |
//! | `TRUSTAR_LOG_SHOW_LEVEL` / `_MODULE` / `_TIME` | `0` drops the field from JSON records |
//! | `TRUSTAR_LOG_FILE` | append to this file instead of stderr |

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

pub const ENV_FILTER: &str = "TRUSTAR_LOG";
pub const ENV_FORMAT: &str = "TRUSTAR_LOG_FORMAT";
pub const ENV_SHOW_LEVEL: &str = "TRUSTAR_LOG_SHOW_LEVEL";
pub const ENV_SHOW_MODULE: &str = "TRUSTAR_LOG_SHOW_MODULE";
pub const ENV_SHOW_TIME: &str = "TRUSTAR_LOG_SHOW_TIME";
pub const ENV_FILE: &str = "TRUSTAR_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub json: bool,
    pub show_level: bool,
    pub show_module: bool,
    pub show_time: bool,
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            json: false,
            show_level: true,
            show_module: true,
            show_time: true,
            file: None,
        }
    }
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str| lookup(key).map_or(true, |v| v.trim() != "0");
        Self {
            filter: lookup(ENV_FILTER)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.filter),
            json: lookup(ENV_FORMAT).is_some_and(|v| v.eq_ignore_ascii_case("json")),
            show_level: flag(ENV_SHOW_LEVEL),
            show_module: flag(ENV_SHOW_MODULE),
            show_time: flag(ENV_SHOW_TIME),
            file: lookup(ENV_FILE)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

pub fn init(settings: &LogSettings) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&settings.filter);

    match &settings.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }

    if settings.json {
        let fields = settings.clone();
        builder.format(move |buf, record| {
            let line = json_record(
                &fields,
                &record.args().to_string(),
                record.level(),
                record.target(),
                Utc::now(),
            );
            writeln!(buf, "{line}")
        });
    }

    builder.try_init().context("Logger already initialized")?;
    Ok(())
}

/// Message plus whichever of level/module/time the settings keep.
pub fn json_record(
    settings: &LogSettings,
    message: &str,
    level: log::Level,
    module: &str,
    time: DateTime<Utc>,
) -> Value {
    let mut record = Map::new();
    record.insert("message".to_string(), Value::from(message));
    if settings.show_level {
        record.insert("level".to_string(), Value::from(level.as_str()));
    }
    if settings.show_module {
        record.insert("module".to_string(), Value::from(module));
    }
    if settings.show_time {
        record.insert(
            "time".to_string(),
            Value::from(time.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
    }
    Value::Object(record)
}
