//! Error types for the Netlify client

use thiserror::Error;

/// Errors that can occur when using the Netlify client
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Access token cannot be used as a header value
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Reading a deploy archive failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Site id that cannot be used as a single URL path segment
    #[error("Invalid site id: {0:?}")]
    InvalidSiteId(String),

    /// Deploy payload rejected before any request was built
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] InvalidPayload),

    /// Failure reported by a non-reqwest transport
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Reasons a deploy payload is rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPayload {
    /// Neither an archive nor a digest was supplied
    #[error("You must supply a zip file or a file digest")]
    Missing,

    /// The archive stream does not hold zip data
    #[error("Zip file must be a readable, seekable stream of zip data")]
    ArchiveType,

    /// The digest is not a mapping of file path to hash
    #[error("File digest must be a mapping of file paths to content hashes")]
    DigestType,

    /// Both an archive and a digest were supplied
    #[error("Supply either a zip file or a file digest, not both")]
    Conflicting,
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_payload_messages_are_distinct() {
        let messages = [
            InvalidPayload::Missing.to_string(),
            InvalidPayload::ArchiveType.to_string(),
            InvalidPayload::DigestType.to_string(),
            InvalidPayload::Conflicting.to_string(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_client_error_wraps_payload_reason() {
        let error = ClientError::from(InvalidPayload::Missing);
        let display = error.to_string();
        assert!(display.contains("Invalid payload"));
        assert!(display.contains("You must supply a zip file or a file digest"));
    }
}
