//! Loose registry address parsing

use std::fmt;

use crate::types::{CredentialError, CredentialResult};

/// URL scheme of a registry address. Bare `host[:port]` addresses are legal
/// and carry no scheme at all, which matters for alias matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    Unspecified,
    Http,
    Https,
}

/// A registry address reduced to canonical form.
///
/// The canonical string rendering (`Display`) is what stores key on and what
/// the matcher compares, so equal renderings mean "the same entry".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryUrl {
    pub scheme: Scheme,
    pub host: String,
    pub port: Option<u16>,
    pub path: String,
}

impl fmt::Display for RegistryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scheme {
            Scheme::Unspecified => f.write_str("//")?,
            Scheme::Http => f.write_str("http://")?,
            Scheme::Https => f.write_str("https://")?,
        }
        f.write_str(&self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        f.write_str(&self.path)
    }
}

/// Parse and validate a loosely-formatted registry address.
///
/// A missing scheme is treated as `//`, so a bare `host[:port][/path]` does
/// not have its hostname swallowed into the path. Only `http` and `https`
/// schemes are accepted; the query string (and fragment) are dropped because
/// they play no part in identifying a credential entry.
pub fn parse(address: &str) -> CredentialResult<RegistryUrl> {
    // a "://" inside the path is not a scheme delimiter
    let (scheme, rest) = match address.find("://").filter(|idx| !address[..*idx].contains('/')) {
        Some(idx) => {
            let scheme = match address[..idx].to_ascii_lowercase().as_str() {
                "http" => Scheme::Http,
                "https" => Scheme::Https,
                other => return Err(CredentialError::UnsupportedScheme(other.to_string())),
            };
            (scheme, &address[idx + 3..])
        }
        None => (
            Scheme::Unspecified,
            address.strip_prefix("//").unwrap_or(address),
        ),
    };

    let rest = &rest[..rest.find(['?', '#']).unwrap_or(rest.len())];
    let (authority, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, ""),
    };

    // userinfo is not part of the canonical form
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    let (host, port) = split_port(host_port)?;
    if host.is_empty() {
        return Err(CredentialError::NoHostname);
    }

    Ok(RegistryUrl {
        scheme,
        host: host.to_string(),
        port,
        path: path.to_string(),
    })
}

fn split_port(host_port: &str) -> CredentialResult<(&str, Option<u16>)> {
    // Bracketed IPv6 hosts keep their brackets in the canonical form.
    let (host, port) = if host_port.starts_with('[') {
        match host_port.find(']') {
            Some(end) => (&host_port[..=end], host_port[end + 1..].strip_prefix(':')),
            None => return Err(CredentialError::NoHostname),
        }
    } else {
        match host_port.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        }
    };

    let port = match port {
        Some(raw) => Some(
            raw.parse::<u16>()
                .map_err(|_| CredentialError::InvalidPort(raw.to_string()))?,
        ),
        None => None,
    };
    Ok((host, port))
}
