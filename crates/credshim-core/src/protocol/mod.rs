//! The helper subprocess protocol
//!
//! One invocation of the helper performs one command: the single CLI
//! argument selects it, stdin carries the payload, stdout carries the
//! result or a single line of error text, and the exit code is the only
//! structured failure signal. `server` is the helper-side dispatcher;
//! `client` drives an external helper program from the calling side.

mod client;
mod server;

pub use client::{erase, get, list, store, HelperProgram, ProgramOutput, ShellProgram};
pub use server::{run, serve, Command};
