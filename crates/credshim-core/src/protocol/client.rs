//! Caller-side wrapper around an external helper program
//!
//! Spawns `<helper> <command>`, feeds the payload on stdin, and converts
//! the helper's stdout text back into typed errors. The sentinel messages
//! are the only structured information that survives the process boundary,
//! so they are matched byte-for-byte.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command as ProcessCommand, Stdio};

use crate::types::{
    is_missing_server_url_message, is_missing_username_message, is_not_found_message,
    CredentialError, CredentialResult, Credentials, GetResponse,
};

/// What one helper invocation produced.
pub struct ProgramOutput {
    pub stdout: Vec<u8>,
    pub success: bool,
}

/// Runs one helper action with the given bytes on stdin.
///
/// The production implementation is [`ShellProgram`]; tests substitute an
/// in-process fake.
pub trait HelperProgram {
    fn run(&self, action: &str, input: &[u8]) -> std::io::Result<ProgramOutput>;
}

/// Helper program invoked as an external process.
pub struct ShellProgram {
    program: PathBuf,
}

impl ShellProgram {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl HelperProgram for ShellProgram {
    fn run(&self, action: &str, input: &[u8]) -> std::io::Result<ProgramOutput> {
        let mut child = ProcessCommand::new(&self.program)
            .arg(action)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input)?;
        }

        let output = child.wait_with_output()?;
        Ok(ProgramOutput {
            stdout: output.stdout,
            success: output.status.success(),
        })
    }
}

/// Save credentials through an external helper program.
pub fn store(program: &dyn HelperProgram, creds: &Credentials) -> CredentialResult<()> {
    let payload = serde_json::to_vec(creds)?;
    let output = program.run("store", &payload)?;
    if !output.success {
        return Err(classify_failure("store", &output.stdout));
    }
    Ok(())
}

/// Fetch the credentials for `server_url` from an external helper program.
pub fn get(program: &dyn HelperProgram, server_url: &str) -> CredentialResult<Credentials> {
    let output = program.run("get", server_url.as_bytes())?;
    if !output.success {
        return Err(classify_failure("get", &output.stdout));
    }

    let response: GetResponse = serde_json::from_slice(&output.stdout)?;
    Ok(Credentials {
        server_url: server_url.to_string(),
        username: response.username,
        secret: response.secret,
    })
}

/// Remove the credentials for `server_url` through an external helper
/// program.
pub fn erase(program: &dyn HelperProgram, server_url: &str) -> CredentialResult<()> {
    let output = program.run("erase", server_url.as_bytes())?;
    if !output.success {
        return Err(classify_failure("erase", &output.stdout));
    }
    Ok(())
}

/// Enumerate the helper's stored server URLs and usernames.
pub fn list(program: &dyn HelperProgram) -> CredentialResult<HashMap<String, String>> {
    let output = program.run("list", b"")?;
    if !output.success {
        return Err(classify_failure("list", &output.stdout));
    }
    Ok(serde_json::from_slice(&output.stdout)?)
}

fn classify_failure(action: &str, stdout: &[u8]) -> CredentialError {
    let text = String::from_utf8_lossy(stdout);
    let text = text.trim();

    if is_not_found_message(text) {
        return CredentialError::NotFound;
    }
    if is_missing_server_url_message(text) {
        return CredentialError::MissingServerUrl;
    }
    if is_missing_username_message(text) {
        return CredentialError::MissingUsername;
    }
    CredentialError::Program(format!(
        "error running credential helper `{}`: `{}`",
        action, text
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::server;
    use crate::stores::MemoryStore;

    /// Fake helper wired straight to the dispatcher over a memory store,
    /// exercising the full protocol without spawning a process.
    struct MockProgram {
        store: MemoryStore,
    }

    impl MockProgram {
        fn new() -> Self {
            Self {
                store: MemoryStore::new(),
            }
        }
    }

    impl HelperProgram for MockProgram {
        fn run(&self, action: &str, input: &[u8]) -> std::io::Result<ProgramOutput> {
            let args = vec!["credshim".to_string(), action.to_string()];
            let mut stdout = Vec::new();
            let code = server::run(&self.store, &args, input, &mut stdout);
            Ok(ProgramOutput {
                stdout,
                success: code == 0,
            })
        }
    }

    #[test]
    fn test_client_round_trip() {
        let program = MockProgram::new();
        let creds = Credentials::new("https://registry.example.com/", "u", "s");

        store(&program, &creds).unwrap();

        let fetched = get(&program, "https://registry.example.com/").unwrap();
        assert_eq!(fetched, creds);

        let listed = list(&program).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed["https://registry.example.com/"], "u");

        erase(&program, "https://registry.example.com/").unwrap();
        assert!(matches!(
            get(&program, "https://registry.example.com/"),
            Err(CredentialError::NotFound)
        ));
        assert!(list(&program).unwrap().is_empty());
    }

    #[test]
    fn test_client_maps_not_found_sentinel() {
        let program = MockProgram::new();
        assert!(matches!(
            get(&program, "https://absent.example.com"),
            Err(CredentialError::NotFound)
        ));
    }

    #[test]
    fn test_client_maps_validation_sentinels() {
        let program = MockProgram::new();

        let no_url = Credentials::new("", "u", "s");
        assert!(matches!(
            store(&program, &no_url),
            Err(CredentialError::MissingServerUrl)
        ));

        let no_user = Credentials::new("https://registry.example.com", "", "s");
        assert!(matches!(
            store(&program, &no_user),
            Err(CredentialError::MissingUsername)
        ));
    }

    #[test]
    fn test_client_wraps_other_failures() {
        struct FailingProgram;
        impl HelperProgram for FailingProgram {
            fn run(&self, _action: &str, _input: &[u8]) -> std::io::Result<ProgramOutput> {
                Ok(ProgramOutput {
                    stdout: b"keychain daemon unreachable\n".to_vec(),
                    success: false,
                })
            }
        }

        let err = get(&FailingProgram, "https://registry.example.com").unwrap_err();
        match err {
            CredentialError::Program(message) => {
                assert!(message.contains("keychain daemon unreachable"));
                assert!(message.contains("get"));
            }
            other => panic!("expected Program error, got {:?}", other),
        }
    }

    #[test]
    fn test_client_list_entries_survive_round_trip() {
        let program = MockProgram::new();
        for i in 0..3 {
            let creds = Credentials::new(
                format!("https://registry{}.example.com", i),
                format!("user{}", i),
                "secret",
            );
            store(&program, &creds).unwrap();
        }

        let listed = list(&program).unwrap();
        assert_eq!(listed.len(), 3);

        erase(&program, "https://registry1.example.com").unwrap();
        let listed = list(&program).unwrap();
        assert_eq!(listed.len(), 2);
        assert!(!listed.contains_key("https://registry1.example.com"));
    }
}
