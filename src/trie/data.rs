//! Per-route payload stored at terminal nodes, and the per-request result
//! built from it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::method::Method;

/// Captured path parameters for one match.
pub type Params = HashMap<String, String>;

/// Identifies the router (module) a route was registered on.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ModuleId(Arc<str>);

impl ModuleId {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the caller tells the trie about a route besides its pattern.
///
/// `condition` is carried, never evaluated, by the trie.
#[derive(Clone, Debug)]
pub struct RouteDescription<C> {
    pub method: Method,
    pub condition: C,
}

/// Immutable summary of one registered route, computed at build time.
#[derive(Clone, Debug)]
pub struct NodeData<C> {
    pub(crate) module: ModuleId,
    pub(crate) route_index: usize,
    pub(crate) segment_count: usize,
    pub(crate) score: u64,
    pub(crate) method: Method,
    pub(crate) condition: C,
    pub(crate) pattern: Arc<str>,
}

impl<C> NodeData<C> {
    pub fn module(&self) -> &ModuleId { &self.module }
    pub fn route_index(&self) -> usize { self.route_index }
    pub fn segment_count(&self) -> usize { self.segment_count }
    pub fn method(&self) -> Method { self.method }
    pub fn condition(&self) -> &C { &self.condition }

    /// Sum of the scores of every node on the route's path.
    pub fn score(&self) -> u64 { self.score }

    /// The pattern as registered, e.g. `/users/{id}`.
    pub fn pattern(&self) -> &str { &self.pattern }

    /// Pairs this record with the parameters captured for one request.
    pub fn with_params(&self, params: Params) -> MatchResult<'_, C> {
        MatchResult { data: self, params }
    }
}

/// One compatible route for a request path.
#[derive(Debug)]
pub struct MatchResult<'t, C> {
    pub data: &'t NodeData<C>,
    pub params: Params,
}

impl<C> MatchResult<'_, C> {
    pub fn score(&self) -> u64 {
        self.data.score
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}
