//! The credential record exchanged with the helper process

use serde::{Deserialize, Serialize};

use super::error::{CredentialError, CredentialResult};

/// A single credential entry, keyed by server URL.
///
/// The wire encoding uses the capitalized field names callers expect, so a
/// record round-trips byte-compatibly through any helper implementation:
///
/// ```json
/// {"ServerURL":"https://registry.example.com","Username":"u","Secret":"s"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "ServerURL", default)]
    pub server_url: String,
    #[serde(rename = "Username", default)]
    pub username: String,
    #[serde(rename = "Secret", default)]
    pub secret: String,
}

impl Credentials {
    pub fn new(
        server_url: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// Check the invariants a store operation relies on: a record must
    /// carry a server URL and a username.
    pub fn validate(&self) -> CredentialResult<()> {
        if self.server_url.is_empty() {
            return Err(CredentialError::MissingServerUrl);
        }
        if self.username.is_empty() {
            return Err(CredentialError::MissingUsername);
        }
        Ok(())
    }
}

/// Response payload for the `get` command. The server URL is implied by the
/// request and not repeated in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetResponse {
    #[serde(rename = "Username", default)]
    pub username: String,
    #[serde(rename = "Secret", default)]
    pub secret: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let creds = Credentials::new("https://registry.example.com", "foo", "bar");
        let encoded = serde_json::to_string(&creds).unwrap();
        assert_eq!(
            encoded,
            r#"{"ServerURL":"https://registry.example.com","Username":"foo","Secret":"bar"}"#
        );

        let decoded: Credentials = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, creds);
    }

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let decoded: Credentials = serde_json::from_str(r#"{"ServerURL":"x"}"#).unwrap();
        assert_eq!(decoded.server_url, "x");
        assert!(decoded.username.is_empty());
        assert!(decoded.secret.is_empty());
    }

    #[test]
    fn test_validate() {
        let creds = Credentials::new("https://registry.example.com", "foo", "bar");
        assert!(creds.validate().is_ok());

        let no_url = Credentials::new("", "foo", "bar");
        assert!(matches!(
            no_url.validate(),
            Err(CredentialError::MissingServerUrl)
        ));

        let no_user = Credentials::new("https://registry.example.com", "", "bar");
        assert!(matches!(
            no_user.validate(),
            Err(CredentialError::MissingUsername)
        ));
    }

    #[test]
    fn test_empty_secret_is_allowed() {
        let creds = Credentials::new("https://registry.example.com", "foo", "");
        assert!(creds.validate().is_ok());
    }
}
