use thiserror::Error;
use transport::TransportError;

#[derive(Error, Debug)]
pub enum MapError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("no cohort/source selected")]
    NoSelection,

    #[error("map has not been initiated")]
    NotInitiated,

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("neither gisServiceUrl nor an API url is configured")]
    MissingServiceUrl,

    #[error("invalid app config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;
