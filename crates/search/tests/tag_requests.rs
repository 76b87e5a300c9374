//! Tag creation and deletion against an in-memory transport

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Mutex;
use trustar_search::{
    ApiConfig, Method, RequestDescriptor, SearchError, SearchIndicator, Transport, TransportError,
};

#[derive(Default)]
struct RecordingTransport {
    response: Value,
    fail_with: Option<u16>,
    seen: Mutex<Vec<RequestDescriptor>>,
}

impl RecordingTransport {
    fn responding(response: Value) -> Self {
        Self {
            response,
            ..Self::default()
        }
    }

    fn seen(&self) -> Vec<RequestDescriptor> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, TransportError> {
        self.seen.lock().unwrap().push(request.clone());
        match self.fail_with {
            Some(status) => Err(TransportError::Status {
                status,
                body: "boom".to_string(),
            }),
            None => Ok(self.response.clone()),
        }
    }
}

fn builder() -> SearchIndicator {
    SearchIndicator::new(&ApiConfig::new("https://api.example"))
}

#[tokio::test]
async fn test_create_tag_posts_to_tag_path() {
    let transport = RecordingTransport::responding(json!([{ "guid": "t-1" }, { "guid": "t-2" }]));
    let mut search = builder();
    search.set_indicator_id("ind-9").set_tag("phishing");

    let result = search.create_tag(&transport).await.unwrap();

    assert_eq!(result, json!({ "guid": "t-1" }));
    let seen = transport.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method(), Method::Post);
    assert_eq!(seen[0].endpoint(), "https://api.example/indicators");
    assert_eq!(seen[0].url(), "https://api.example/indicators/ind-9/tags");
    assert_eq!(seen[0].param("tags"), Some(&json!(["phishing"])));
}

#[tokio::test]
async fn test_create_tag_requires_id_and_tag() {
    let transport = RecordingTransport::default();

    let mut only_id = builder();
    only_id.set_indicator_id("ind-9");
    let err = only_id.create_tag(&transport).await.unwrap_err();
    assert!(matches!(err, SearchError::MissingTagContext));

    let mut only_tag = builder();
    only_tag.set_tag("phishing");
    let err = only_tag.create_tag(&transport).await.unwrap_err();
    assert!(matches!(err, SearchError::MissingTagContext));

    assert!(transport.seen().is_empty(), "nothing may be sent");
}

#[tokio::test]
async fn test_delete_tag_on_fresh_builder() {
    let transport = RecordingTransport::default();

    let err = builder().delete_tag(&transport).await.unwrap_err();

    assert!(matches!(err, SearchError::MissingIndicatorId));
    assert!(transport.seen().is_empty());
}

#[tokio::test]
async fn test_delete_tag_sends_delete_without_body() {
    let transport = RecordingTransport::responding(json!({ "deleted": true }));
    let mut search = builder();
    search.set_indicator_id("ind-1");

    let result = search.delete_tag(&transport).await.unwrap();

    assert_eq!(result, json!({ "deleted": true }));
    let seen = transport.seen();
    assert_eq!(seen[0].method(), Method::Delete);
    assert_eq!(seen[0].url(), "https://api.example/indicators/ind-1/tags");
    assert_eq!(seen[0].params(), None);
}

#[tokio::test]
async fn test_transport_errors_propagate_unchanged() {
    let transport = RecordingTransport {
        fail_with: Some(503),
        ..RecordingTransport::default()
    };
    let mut search = builder();
    search.set_indicator_id("ind-1");

    let err = search.delete_tag(&transport).await.unwrap_err();

    assert!(matches!(
        err,
        SearchError::Transport(TransportError::Status { status: 503, .. })
    ));
    assert_eq!(err.to_string(), "API error (503): boom");
}

#[tokio::test]
async fn test_empty_array_response_yields_null() {
    let transport = RecordingTransport::responding(json!([]));
    let mut search = builder();
    search.set_indicator_id("ind-1");

    assert_eq!(search.delete_tag(&transport).await.unwrap(), Value::Null);
}
