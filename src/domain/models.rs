use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::errors::TunnelError;

/// Destination of a CONNECT request, parsed from its authority form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunnelTarget {
    pub host: String,
    pub port: u16,
}

impl TunnelTarget {
    pub fn new<T>(host: T, port: u16) -> Self
    where
        T: Into<String>,
    {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl FromStr for TunnelTarget {
    type Err = TunnelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let authority = s.trim();
        let (host, port) = authority
            .rsplit_once(':')
            .ok_or_else(|| TunnelError::InvalidTarget(format!("missing port in '{}'", authority)))?;

        // IPv6 authorities arrive bracketed ("[::1]:443"); the brackets are
        // not part of the address we dial.
        let host = host.trim_start_matches('[').trim_end_matches(']');
        if host.is_empty() {
            return Err(TunnelError::InvalidTarget(format!(
                "empty host in '{}'",
                authority
            )));
        }

        let port = port.parse::<u16>().map_err(|_| {
            TunnelError::InvalidTarget(format!("invalid port '{}' in '{}'", port, authority))
        })?;

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for TunnelTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// The request line and header block read off a fresh client connection.
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub method: String,
    pub target: String,
    pub version: String,
    pub headers: HashMap<String, String>,
}

impl RequestHead {
    pub fn new<M, T, V>(method: M, target: T, version: V) -> Self
    where
        M: Into<String>,
        T: Into<String>,
        V: Into<String>,
    {
        Self {
            method: method.into(),
            target: target.into(),
            version: version.into(),
            headers: HashMap::new(),
        }
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn is_connect(&self) -> bool {
        self.method.eq_ignore_ascii_case("CONNECT")
    }
}

/// One accepted tunnel, as seen by the session tracker.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub id: uuid::Uuid,
    pub peer: String,
    pub target: String,
    pub opened_at: std::time::Instant,
    pub closed_at: Option<std::time::Instant>,
}

impl SessionInfo {
    pub fn new(peer: String, target: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            peer,
            target,
            opened_at: std::time::Instant::now(),
            closed_at: None,
        }
    }
}
