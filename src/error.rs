//! Unified error type.

use thiserror::Error;

/// The error type returned by strata's fallible operations.
///
/// Application-level errors (404, 401, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// startup misconfiguration (a bad route pattern, a bad bind address) and
/// infrastructure failures.
#[derive(Debug, Error)]
pub enum Error {
    /// A route template is not a valid regular expression.
    #[error("invalid route pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid socket address `{0}`")]
    Addr(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// A request body could not be decoded by [`bind_json`](crate::bind_json).
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
