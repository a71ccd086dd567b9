//! Registry URL canonicalization and alias matching
//!
//! Server URLs arrive in loose forms (`registry.example.com:5000`,
//! `https://registry.example.com/path?x=y`). This module reduces them to a
//! canonical structured form and decides whether a queried URL denotes a
//! previously stored one, including partial matches where the query leaves
//! scheme, port, or path unspecified.

mod matcher;
mod parse;

pub use matcher::{approximate_match, exact_match, find_match};
pub use parse::{parse, RegistryUrl, Scheme};
