use serde::{Deserialize, Serialize};

pub const DEFAULT_API_ENDPOINT: &str = "https://api.trustar.co/api/2.0";

const INDICATORS_PATH: &str = "/indicators";

/// Connection settings the builders read their endpoints from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub api_endpoint: String,
}

impl ApiConfig {
    pub fn new(api_endpoint: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
        }
    }

    pub fn indicators_endpoint(&self) -> String {
        format!(
            "{}{}",
            self.api_endpoint.trim_end_matches('/'),
            INDICATORS_PATH
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_ENDPOINT)
    }
}
