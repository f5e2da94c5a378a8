//! Error types for the gateway client.

use hbase_rest_common::DecodeError;
use reqwest::StatusCode;

/// Failures that prevent a call from producing either data or a status.
///
/// A non-success HTTP status is not an error here, it is reported as
/// [`GatewayReply::Status`](crate::GatewayReply::Status).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Gateway communication error: {0}")]
    Communication(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Scanner created without a Location header")]
    MissingLocation,

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(StatusCode),
}

pub type Result<T> = std::result::Result<T, Error>;
