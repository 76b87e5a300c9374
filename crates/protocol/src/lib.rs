//! # TruStar Protocol
//!
//! Types exchanged between the request builders and the transport that executes them.
//!
//! A [`RequestDescriptor`] is the immutable output of a finalized builder. It carries
//! everything the transport needs: the HTTP method, the base endpoint, the JSON body and
//! either a query-string pair or a path suffix.
//!
//! ```
//! use trustar_protocol::{Method, QueryString, RequestDescriptor};
//!
//! let request = RequestDescriptor::new(Method::Delete, "https://api.example/indicators")
//!     .with_query(QueryString::path("/abc/tags"));
//! assert_eq!(request.url(), "https://api.example/indicators/abc/tags");
//! ```

mod observable;
mod request;

pub use observable::{SearchPage, SearchedObservable};
pub use request::{Method, QueryString, RequestDescriptor};

/// JSON Schema of [`RequestDescriptor`], for transports written outside Rust.
pub fn request_schema() -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(schemars::schema_for!(RequestDescriptor))
}
