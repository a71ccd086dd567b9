//! Helper-side command dispatcher

use std::io::{self, BufRead, Write};

use crate::logging::file_logger as log;
use crate::stores::CredentialStore;
use crate::types::{CredentialError, CredentialResult, Credentials, GetResponse};

/// The command selected by the helper's single CLI argument. It is chosen
/// once per process invocation and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Store,
    Get,
    Erase,
    List,
}

impl Command {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "store" => Some(Command::Store),
            "get" => Some(Command::Get),
            "erase" => Some(Command::Erase),
            "list" => Some(Command::List),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Store => "store",
            Command::Get => "get",
            Command::Erase => "erase",
            Command::List => "list",
        }
    }
}

/// Serve one helper invocation against `store` and exit.
///
/// Reads the command from `argv`, the payload from stdin, and writes the
/// result to stdout. Error text also goes to stdout, never stderr; callers
/// distinguish failure by the exit code and, for the sentinel messages, by
/// exact text.
pub fn serve(store: &dyn CredentialStore) -> ! {
    let args: Vec<String> = std::env::args().collect();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let code = run(store, &args, stdin.lock(), &mut stdout.lock());
    std::process::exit(code)
}

/// Dispatch one command, returning the process exit code.
///
/// Split out from [`serve`] so tests (and in-process callers) can supply
/// their own argv and streams.
pub fn run<R: BufRead, W: Write>(
    store: &dyn CredentialStore,
    args: &[String],
    reader: R,
    writer: &mut W,
) -> i32 {
    match handle_command(store, args, reader, writer) {
        Ok(()) => 0,
        Err(err) => {
            let _ = writeln!(writer, "{}", err);
            1
        }
    }
}

fn handle_command<R: BufRead, W: Write>(
    store: &dyn CredentialStore,
    args: &[String],
    reader: R,
    writer: &mut W,
) -> CredentialResult<()> {
    let program = args.first().map(String::as_str).unwrap_or("credshim");
    let usage = || CredentialError::Usage {
        program: program.to_string(),
    };

    if args.len() != 2 {
        return Err(usage());
    }
    let command = Command::parse(&args[1]).ok_or_else(usage)?;
    log::debug(
        "protocol",
        &format!("dispatching '{}' to store '{}'", command.as_str(), store.name()),
    );

    match command {
        Command::Store => store_command(store, reader),
        Command::Get => get_command(store, reader, writer),
        Command::Erase => erase_command(store, reader),
        Command::List => list_command(store, writer),
    }
}

/// Read all of stdin up front. Reading is line-oriented and the line
/// terminators are discarded, so a payload spanning several lines is
/// reassembled as the concatenation of the lines' bytes.
fn read_payload<R: BufRead>(reader: R) -> CredentialResult<String> {
    let mut payload = String::new();
    for line in reader.lines() {
        payload.push_str(&line?);
    }
    Ok(payload)
}

fn store_command<R: BufRead>(store: &dyn CredentialStore, reader: R) -> CredentialResult<()> {
    let payload = read_payload(reader)?;
    let creds: Credentials = serde_json::from_str(&payload)?;
    store.add(&creds)
}

fn get_command<R: BufRead, W: Write>(
    store: &dyn CredentialStore,
    reader: R,
    writer: &mut W,
) -> CredentialResult<()> {
    let payload = read_payload(reader)?;
    let server_url = payload.trim();

    let (username, secret) = store.get(server_url)?;
    let response = GetResponse { username, secret };
    writeln!(writer, "{}", serde_json::to_string(&response)?)?;
    Ok(())
}

fn erase_command<R: BufRead>(store: &dyn CredentialStore, reader: R) -> CredentialResult<()> {
    let payload = read_payload(reader)?;
    store.delete(payload.trim())
}

fn list_command<W: Write>(store: &dyn CredentialStore, writer: &mut W) -> CredentialResult<()> {
    let entries = store.list()?;
    writeln!(writer, "{}", serde_json::to_string(&entries)?)?;
    Ok(())
}
