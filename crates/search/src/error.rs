use crate::transport::TransportError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("{field} should be one of the following: {}", .allowed.join(", "))]
    InvalidEnum {
        field: &'static str,
        allowed: Vec<&'static str>,
    },

    #[error("scores should be a list of integers between -1 and 3, got {score}")]
    InvalidRange { score: i32 },

    #[error("Polling window should end after the start of it (from {from}, to {to})")]
    InvalidWindow { from: i64, to: i64 },

    #[error("Invalid date format: {0:?}")]
    InvalidDateFormat(String),

    #[error("Indicator id is required for tag operations")]
    MissingIndicatorId,

    #[error("Indicator id and a tag are required for creating a new user tag")]
    MissingTagContext,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Logs a validation failure at `warn` and hands it back for returning.
pub(crate) fn reject(err: SearchError) -> SearchError {
    log::warn!("Rejected search request: {err}");
    err
}
