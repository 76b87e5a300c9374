use serde::{Deserialize, Serialize};
use std::fmt;

/// One observable returned by an indicator search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchedObservable {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub first_seen: Option<i64>,
    #[serde(default)]
    pub last_seen: Option<i64>,
    #[serde(default)]
    pub enclave_guids: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl fmt::Display for SearchedObservable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SearchedObservable(type={}, value={})",
            self.kind.as_deref().unwrap_or("None"),
            self.value.as_deref().unwrap_or("None")
        )
    }
}

/// Search response envelope; only the `items` array is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<SearchedObservable>,
}
