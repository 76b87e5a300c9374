use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either a single `name=value` query parameter or a suffix appended to the endpoint path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryString {
    Pair { name: String, value: String },
    Path(String),
}

impl QueryString {
    pub fn pair(name: impl Into<String>, value: impl Into<String>) -> Self {
        QueryString::Pair {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn path(suffix: impl Into<String>) -> Self {
        QueryString::Path(suffix.into())
    }
}

/// Fully validated description of one outbound call.
///
/// Built once per terminal builder call and never mutated afterwards; the
/// `with_*` helpers consume and return the descriptor while it is being assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RequestDescriptor {
    method: Method,
    endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    params: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    query_string: Option<QueryString>,
}

impl RequestDescriptor {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            params: None,
            query_string: None,
        }
    }

    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_query(mut self, query: QueryString) -> Self {
        self.query_string = Some(query);
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// JSON body, absent for calls that send none.
    pub fn params(&self) -> Option<&Map<String, Value>> {
        self.params.as_ref()
    }

    pub fn query_string(&self) -> Option<&QueryString> {
        self.query_string.as_ref()
    }

    /// Endpoint with any path suffix applied. Query pairs are left to [`Self::query_pairs`].
    pub fn url(&self) -> String {
        match &self.query_string {
            Some(QueryString::Path(suffix)) => format!("{}{}", self.endpoint, suffix),
            _ => self.endpoint.clone(),
        }
    }

    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        match &self.query_string {
            Some(QueryString::Pair { name, value }) => vec![(name.as_str(), value.as_str())],
            _ => Vec::new(),
        }
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.as_ref().and_then(|params| params.get(key))
    }
}
