use thiserror::Error;

use crate::fetch::FetchError;

/// Errors surfaced by the digger library.
#[derive(Debug, Error)]
pub enum DiggerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(String),
}
