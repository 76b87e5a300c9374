use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use trustar_search::ApiConfig;

pub const DEFAULT_CONFIG_FILE: &str = "trustar.toml";
pub const ENV_API_ENDPOINT: &str = "TRUSTAR_API_ENDPOINT";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "TRUSTAR_HTTP_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Layered settings: defaults, then the TOML file, then environment variables.
/// Command-line overrides are applied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub api: ApiConfig,
    pub http: HttpConfig,
}

impl CliConfig {
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_API_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            self.api.api_endpoint = endpoint;
        }
        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT_SECS) {
            self.http.timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_HTTP_TIMEOUT_SECS} must be a number of seconds"))?;
        }
        Ok(())
    }
}
