//! Shared data types for the credential helper protocol

mod credentials;
mod error;

pub use credentials::{Credentials, GetResponse};
pub use error::{
    CredentialError, CredentialResult,
    is_missing_server_url_message, is_missing_username_message, is_not_found_message,
    MISSING_SERVER_URL_MESSAGE, MISSING_USERNAME_MESSAGE, NOT_FOUND_MESSAGE,
};
