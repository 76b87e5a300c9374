//! # TruStar Search
//!
//! Fluent, validating builder for indicator search and tag requests.
//!
//! ## Flow
//!
//! ```text
//! SearchIndicator (setters)
//!     │
//!     ├──> Vocabulary / TimestampResolver   validate input
//!     │
//!     ├──> ParamSet                         ordered, last write wins
//!     │
//!     └──> query / create_tag / delete_tag
//!            └─> RequestDescriptor ──> Transport
//! ```
//!
//! Nothing touches the network until a tag operation is handed a [`Transport`];
//! `query()` only produces the descriptor.

mod builder;
mod config;
mod error;
mod finalize;
mod params;
mod timestamp;
mod transport;
pub mod vocabulary;

pub use builder::{
    Attribute, EnclaveIds, Observable, SearchIndicator, DEFAULT_PAGE_SIZE, PRIORITY_SCORES,
};
pub use config::{ApiConfig, DEFAULT_API_ENDPOINT};
pub use error::{Result, SearchError};
pub use params::{Param, ParamSet};
pub use timestamp::{ChronoDateParser, DateInput, DateParser, TimestampResolver};
pub use transport::{Transport, TransportError};
pub use trustar_protocol::{Method, QueryString, RequestDescriptor};
pub use vocabulary::{AttributeType, ObservableType, SortColumn, Vocabulary, VocabularyKind};
