//! Errors raised while decoding upstream payloads and configuration.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("payload for {username} is missing {field}")]
    MissingField {
        username: String,
        field: &'static str,
    },
}
