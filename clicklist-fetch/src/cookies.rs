//! Per-domain cookie jar.
//!
//! The jar is the only state a session carries besides its CSRF token. It is
//! a plain value: the executor reads it to build `Cookie` headers and writes
//! every `Set-Cookie` it sees back into it. It can be serialized for reuse
//! across process runs.
//!
//! Domains are stored normalized (lower-case, no leading dot). Cookie names
//! are case-sensitive and the last write for a name wins.

use cookie::time::OffsetDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::error::FetchError;

/// Cookies keyed by domain, then by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieJar {
    domains: BTreeMap<String, BTreeMap<String, String>>,
}

impl CookieJar {
    /// Creates an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cookie, replacing any previous value for the same name.
    pub fn set(&mut self, domain: &str, name: impl Into<String>, value: impl Into<String>) {
        self.domains
            .entry(normalize_domain(domain))
            .or_default()
            .insert(name.into(), value.into());
    }

    /// Gets a cookie stored for exactly this domain.
    pub fn get(&self, domain: &str, name: &str) -> Option<&str> {
        self.domains
            .get(&normalize_domain(domain))?
            .get(name)
            .map(String::as_str)
    }

    /// All cookies stored for exactly this domain.
    pub fn get_all(&self, domain: &str) -> BTreeMap<String, String> {
        self.domains
            .get(&normalize_domain(domain))
            .cloned()
            .unwrap_or_default()
    }

    /// Removes a cookie. Returns the old value.
    pub fn remove(&mut self, domain: &str, name: &str) -> Option<String> {
        let key = normalize_domain(domain);
        let cookies = self.domains.get_mut(&key)?;
        let old = cookies.remove(name);
        if cookies.is_empty() {
            self.domains.remove(&key);
        }
        old
    }

    /// Finds a cookie by name in any domain.
    ///
    /// When several domains carry the name, the most specific (longest)
    /// domain wins.
    pub fn find(&self, name: &str) -> Option<&str> {
        self.domains
            .iter()
            .filter_map(|(domain, cookies)| cookies.get(name).map(|v| (domain.len(), v)))
            .max_by_key(|(len, _)| *len)
            .map(|(_, v)| v.as_str())
    }

    /// Removes every cookie.
    pub fn clear(&mut self) {
        self.domains.clear();
    }

    /// Returns true if the jar holds no cookies.
    pub fn is_empty(&self) -> bool {
        self.domains.values().all(BTreeMap::is_empty)
    }

    /// Number of cookies across all domains.
    pub fn len(&self) -> usize {
        self.domains.values().map(BTreeMap::len).sum()
    }

    /// Iterates `(domain, name, value)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.domains.iter().flat_map(|(domain, cookies)| {
            cookies
                .iter()
                .map(move |(name, value)| (domain.as_str(), name.as_str(), value.as_str()))
        })
    }

    /// Builds the `Cookie` header value for a request to `host`.
    ///
    /// Includes cookies stored for the host itself and for every parent
    /// domain. More specific domains override less specific ones.
    pub fn header_for(&self, host: &str) -> Option<String> {
        let host = normalize_domain(host);

        let mut matching: Vec<(&String, &BTreeMap<String, String>)> = self
            .domains
            .iter()
            .filter(|(domain, _)| domain_matches(&host, domain))
            .collect();
        matching.sort_by_key(|(domain, _)| domain.len());

        let mut merged: BTreeMap<&str, &str> = BTreeMap::new();
        for (_, cookies) in matching {
            for (name, value) in cookies {
                merged.insert(name.as_str(), value.as_str());
            }
        }

        if merged.is_empty() {
            return None;
        }

        Some(
            merged
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Stores one `Set-Cookie` header received from `request_host`.
    ///
    /// The cookie lands on its `Domain` attribute when that attribute
    /// domain-matches the host, otherwise on the host itself. `Max-Age <= 0`,
    /// an `Expires` date in the past or an empty value deletes the cookie.
    /// Returns false if the header was rejected.
    pub fn store_response_cookie(&mut self, request_host: &str, set_cookie: &str) -> bool {
        let parsed = match cookie::Cookie::parse(set_cookie) {
            Ok(c) => c,
            Err(e) => {
                debug!(error = %e, "Ignoring unparseable Set-Cookie header");
                return false;
            }
        };

        let host = normalize_domain(request_host);
        let domain = match parsed.domain().map(normalize_domain) {
            Some(d) if domain_matches(&host, &d) => d,
            Some(d) => {
                debug!(host = %host, domain = %d, "Ignoring cookie for foreign domain");
                return false;
            }
            None => host,
        };

        // Max-Age takes precedence over Expires (RFC 6265 5.3).
        let expired = match parsed.max_age() {
            Some(age) => age.is_zero() || age.is_negative(),
            None => parsed
                .expires_datetime()
                .is_some_and(|at| at <= OffsetDateTime::now_utc()),
        };

        if expired || parsed.value().is_empty() {
            trace!(domain = %domain, name = parsed.name(), "Cookie removed by server");
            self.remove(&domain, parsed.name());
        } else {
            trace!(domain = %domain, name = parsed.name(), "Cookie stored");
            self.set(&domain, parsed.name(), parsed.value());
        }
        true
    }

    /// Serializes the jar to JSON.
    pub fn to_json(&self) -> Result<String, FetchError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a jar serialized with [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Lower-cases a domain and strips a leading dot.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// RFC 6265 domain match on normalized names.
fn domain_matches(host: &str, domain: &str) -> bool {
    host == domain
        || (host.len() > domain.len()
            && host.ends_with(domain)
            && host.as_bytes()[host.len() - domain.len() - 1] == b'.')
}

// ============================================================================
// Tests
// ============================================================================
