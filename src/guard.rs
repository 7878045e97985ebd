//! Route guards.
//!
//! A guard is the condition stored with a route. The trie carries it
//! untouched; after ranking, [`Routes`](crate::Routes) evaluates guards from
//! the most specific candidate down and takes the first one that passes.
//!
//! # Design Decisions
//! - Guards only see the request head, never the body
//! - Host matching is case-insensitive and ignores the port
//! - Header values are compared exactly
//! - `and` combines guards with AND semantics

use std::fmt;
use std::sync::Arc;

use http::request::Parts;

/// Shared predicate over the request head.
#[derive(Clone)]
pub struct Guard(Arc<dyn Fn(&Parts) -> bool + Send + Sync + 'static>);

impl Guard {
    pub fn from_fn(f: impl Fn(&Parts) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Matches the `Host` header, ignoring case and any `:port` suffix.
    ///
    /// IPv6 literals may be given with or without brackets: `[::1]` and
    /// `::1` both match a `Host: [::1]:8080` header.
    pub fn host(host: impl Into<String>) -> Self {
        let host = host.into();
        let expected = host.trim_start_matches('[').trim_end_matches(']').to_lowercase();
        Self::from_fn(move |head| {
            head.headers
                .get(http::header::HOST)
                .and_then(|h| h.to_str().ok())
                .is_some_and(|h| host_without_port(h).eq_ignore_ascii_case(&expected))
        })
    }

    /// Matches when header `name` is present with exactly `value`.
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        let (name, value) = (name.into(), value.into());
        Self::from_fn(move |head| {
            head.headers
                .get(name.as_str())
                .is_some_and(|v| v.as_bytes() == value.as_bytes())
        })
    }

    /// Both guards must pass.
    pub fn and(self, other: Guard) -> Self {
        Self::from_fn(move |head| self.check(head) && other.check(head))
    }

    pub fn check(&self, head: &Parts) -> bool {
        (self.0)(head)
    }
}

/// `example.com:8080` → `example.com`, `[::1]:8080` → `::1`.
fn host_without_port(host: &str) -> &str {
    match host.strip_prefix('[') {
        Some(v6) => v6.split(']').next().unwrap_or(v6),
        None => host.split(':').next().unwrap_or(host),
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
