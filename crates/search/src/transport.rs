//! Seam between finalized requests and whatever actually performs the HTTP call.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use trustar_protocol::RequestDescriptor;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Parse response failed: {0}")]
    Decode(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, TransportError>;

    /// Single result of a call: the first element of an array response, `Null` for an
    /// empty array, the value itself otherwise.
    async fn fetch_one(&self, request: &RequestDescriptor) -> Result<Value, TransportError> {
        match self.send(request).await? {
            Value::Array(items) => Ok(items.into_iter().next().unwrap_or(Value::Null)),
            other => Ok(other),
        }
    }
}
