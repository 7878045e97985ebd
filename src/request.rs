//! Incoming HTTP request type.

use bytes::Bytes;
use http::request::Parts;

use crate::trie::Params;

/// An incoming HTTP request, with the path parameters of the route it
/// was dispatched to.
pub struct Request {
    pub(crate) head: Parts,
    pub(crate) body: Bytes,
    pub(crate) params: Params,
}

impl Request {
    pub(crate) fn new(head: Parts, body: Bytes, params: Params) -> Self {
        Self { head, body, params }
    }

    pub fn method(&self) -> &http::Method { &self.head.method }
    pub fn path(&self) -> &str { self.head.uri.path() }
    pub fn headers(&self) -> &http::HeaderMap { &self.head.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Header lookup; header names are case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    /// Static parameters (`/{lang=en}/docs`) are included.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}
