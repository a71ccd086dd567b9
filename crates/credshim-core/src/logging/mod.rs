//! Diagnostics for a process whose stdout belongs to the wire protocol
//!
//! The helper's stdout carries protocol payloads and its exit code is the
//! failure signal, so diagnostics go to a file instead, and only when
//! explicitly enabled.

pub mod file_logger;

pub use file_logger::{debug, error, info, log, log_file_path, warn, LogLevel};
