//! Error taxonomy for helper operations
//!
//! Callers on the far side of the process boundary distinguish failures by
//! exact output text, so the messages for the sentinel variants are part of
//! the wire contract and must never change.

use thiserror::Error;

/// Sentinel message emitted when a lookup finds no credentials.
pub const NOT_FOUND_MESSAGE: &str = "credentials not found in native keychain";

/// Sentinel message emitted when a record or request has no server URL.
pub const MISSING_SERVER_URL_MESSAGE: &str = "no credentials server URL";

/// Sentinel message emitted when a record has no username.
pub const MISSING_USERNAME_MESSAGE: &str = "no credentials username";

/// Errors raised by stores, the URL normalizer, and the command dispatcher.
///
/// Internally errors stay tagged; they are flattened to text only when they
/// cross the process boundary via `Display`.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("credentials not found in native keychain")]
    NotFound,

    #[error("no credentials server URL")]
    MissingServerUrl,

    #[error("no credentials username")]
    MissingUsername,

    #[error("Usage: {program} <store|get|erase|list>")]
    Usage { program: String },

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("no hostname in URL")]
    NoHostname,

    #[error("invalid port: {0}")]
    InvalidPort(String),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Opaque failure reported by a store backend.
    #[error("{0}")]
    Store(String),

    /// Failure reported by an external helper program on the client side.
    #[error("{0}")]
    Program(String),
}

pub type CredentialResult<T> = Result<T, CredentialError>;

/// Whether helper output text is the not-found sentinel.
///
/// This is the one failure callers are expected to branch on rather than
/// treat as fatal, and external programs only hand us their stdout text.
pub fn is_not_found_message(text: &str) -> bool {
    text == NOT_FOUND_MESSAGE
}

/// Whether helper output text is the missing-server-URL sentinel.
pub fn is_missing_server_url_message(text: &str) -> bool {
    text == MISSING_SERVER_URL_MESSAGE
}

/// Whether helper output text is the missing-username sentinel.
pub fn is_missing_username_message(text: &str) -> bool {
    text == MISSING_USERNAME_MESSAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_messages_are_stable() {
        assert_eq!(
            CredentialError::NotFound.to_string(),
            "credentials not found in native keychain"
        );
        assert_eq!(
            CredentialError::MissingServerUrl.to_string(),
            "no credentials server URL"
        );
        assert_eq!(
            CredentialError::MissingUsername.to_string(),
            "no credentials username"
        );
    }

    #[test]
    fn test_message_predicates() {
        assert!(is_not_found_message(&CredentialError::NotFound.to_string()));
        assert!(is_missing_server_url_message(
            &CredentialError::MissingServerUrl.to_string()
        ));
        assert!(is_missing_username_message(
            &CredentialError::MissingUsername.to_string()
        ));

        assert!(!is_not_found_message("credentials not found"));
        assert!(!is_missing_server_url_message(""));
    }

    #[test]
    fn test_usage_message() {
        let err = CredentialError::Usage {
            program: "credshim".to_string(),
        };
        assert_eq!(err.to_string(), "Usage: credshim <store|get|erase|list>");
    }
}
