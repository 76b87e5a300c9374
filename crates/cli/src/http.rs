use crate::config::HttpConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use trustar_protocol::{Method, RequestDescriptor};
use trustar_search::{Transport, TransportError};

/// [`Transport`] over reqwest. No retries and no authentication headers.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, TransportError> {
        let url = request.url();
        log::debug!("{} {}", request.method(), url);

        let mut req = self.client.request(to_reqwest(request.method()), &url);
        let pairs = request.query_pairs();
        if !pairs.is_empty() {
            req = req.query(&pairs);
        }
        if let Some(params) = request.params() {
            req = req.json(params);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Request(format!("Read response failed: {e}")))?;

        if !status.is_success() {
            log::warn!("{} {} returned {}", request.method(), url, status);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
