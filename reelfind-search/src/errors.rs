//! Error types for movie lookups.

use thiserror::Error;

/// Errors that can occur during search or detail lookups.
#[derive(Debug, Error)]
pub enum MovieLookupError {
    /// The API answered with a well-formed failure response
    /// (`Response: "False"`); the message is carried verbatim.
    #[error("Movie API error: {message}")]
    ApiFailure {
        /// Error message as reported by the API
        message: String,
    },

    /// Network communication failed before a response was parsed.
    #[error("Network error: {reason}")]
    Network {
        /// The reason for the network error
        reason: String,
    },

    /// The response arrived but did not parse into the expected shape.
    #[error("Parse error: {reason}")]
    Parse {
        /// The reason for the parse error
        reason: String,
    },
}
