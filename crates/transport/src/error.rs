//! Error types for GIS service access.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    /// Network failure, or a body that is not valid JSON.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid header value for {name}")]
    InvalidHeader { name: &'static str },

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Valid JSON that does not have the expected shape.
    #[error("unexpected payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
