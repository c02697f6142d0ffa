//! Error taxonomy for the ask pipeline.
//!
//! The `Display` strings are the user-facing messages; the presentation
//! layer prints them as-is.

use thiserror::Error;

/// Classified failure of a query, from input validation through transport
/// and response normalization
///
/// Kinds are mutually exclusive. `EmptyQuestion`, `NoData`, `NoResults` and
/// `InvalidFormat` come from the resolver; `Network`, `Server` and `Unknown`
/// come from the transport mapping. Every kind is recoverable: the user can
/// always issue a new query or clear the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Please enter a question")]
    EmptyQuestion,

    #[error("No data returned. Please try again.")]
    NoData,

    #[error("No results found. Try a different question.")]
    NoResults,

    #[error("Invalid data format received from server.")]
    InvalidFormat,

    #[error("Network error. Please check your connection.")]
    Network,

    /// Server-supplied message, displayed verbatim
    #[error("{0}")]
    Server(String),

    #[error("Could not process question. Please try again.")]
    Unknown,
}

impl QueryError {
    /// Process exit code for one-shot invocations
    pub fn exit_code(&self) -> i32 {
        match self {
            QueryError::EmptyQuestion => 64,
            QueryError::InvalidFormat => 65,
            QueryError::Network => 70,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_displayed_verbatim() {
        let err = QueryError::Server("quota exceeded".to_string());
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(QueryError::EmptyQuestion.exit_code(), 64);
        assert_eq!(QueryError::InvalidFormat.exit_code(), 65);
        assert_eq!(QueryError::Network.exit_code(), 70);
        assert_eq!(QueryError::NoResults.exit_code(), 1);
        assert_eq!(QueryError::Server("x".into()).exit_code(), 1);
    }
}
