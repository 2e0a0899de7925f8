use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse an id from a stored string.
    ///
    /// Results in a 500 Internal Server Error with a generic message
    /// returned to the client.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseId {
        value: String,
        source: ParseIntError,
    },
}
