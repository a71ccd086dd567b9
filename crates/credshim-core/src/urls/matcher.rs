//! Alias matching between queried and stored registry URLs
//!
//! Storage media that cannot do partial lookups (file trees, registry keys)
//! enumerate their stored URLs and ask these functions whether an entry
//! answers a query.

use super::parse::{parse, RegistryUrl, Scheme};

/// Whether the query and a stored URL have identical canonical forms.
pub fn exact_match(query: &RegistryUrl, stored: &RegistryUrl) -> bool {
    query.to_string() == stored.to_string()
}

/// Whether the query matches a stored URL once its unspecified fields are
/// filled in from the stored one.
///
/// The gap-filling is directional: a query may adopt the stored scheme,
/// port, and path, never the reverse. A query that is more specific than
/// the stored entry therefore does not match it.
pub fn approximate_match(query: &RegistryUrl, stored: &RegistryUrl) -> bool {
    let mut query = query.clone();
    if query.scheme == Scheme::Unspecified {
        query.scheme = stored.scheme;
    }
    if query.port.is_none() && stored.port.is_some() {
        query.port = stored.port;
    }
    if query.path.is_empty() {
        query.path = stored.path.clone();
    }
    query.to_string() == stored.to_string()
}

/// Find the stored target answering `server_url`.
///
/// Runs a full exact pass before any approximate matching, so a precise hit
/// always beats an alias. Within a pass the first enumerated target wins.
/// Targets that fail to parse are skipped; if the query itself does not
/// parse it can only hit a byte-identical target.
pub fn find_match<'a>(server_url: &str, targets: &'a [String]) -> Option<&'a str> {
    let query = match parse(server_url) {
        Ok(url) => url,
        Err(_) => {
            return targets
                .iter()
                .find(|target| target.as_str() == server_url)
                .map(String::as_str);
        }
    };

    let parsed: Vec<(&String, RegistryUrl)> = targets
        .iter()
        .filter_map(|target| parse(target).ok().map(|url| (target, url)))
        .collect();

    for (target, stored) in &parsed {
        if exact_match(&query, stored) {
            return Some(target.as_str());
        }
    }
    for (target, stored) in &parsed {
        if approximate_match(&query, stored) {
            return Some(target.as_str());
        }
    }
    None
}
