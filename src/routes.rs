//! Compiled route table and request resolution.
//!
//! # Data Flow
//! ```text
//! Request head (method, path, headers)
//!     → path::segments
//!     → Trie::matches          every compatible route, with captures
//!     → sort by score, desc    ties keep registration/tree order
//!     → first candidate with the request's method whose guard passes
//!     → Found | MethodNotAllowed(allowed) | NotFound
//! ```
//!
//! # Design Decisions
//! - `Routes` is immutable; reloading builds a new one and swaps it in
//!   through [`RouteTable`]
//! - A guard that rejects a request is not an error: the next candidate
//!   is tried
//! - `405` is only answered when some candidate with another method would
//!   have accepted the request

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use bytes::Bytes;
use http::request::Parts;
use http::StatusCode;
use tracing::{debug, info, warn};

use crate::config::TrailingSlash;
use crate::error::BuildError;
use crate::guard::Guard;
use crate::handler::BoxedHandler;
use crate::method::Method;
use crate::path;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::trie::{MatchResult, NodeData, Params, Trie};

/// The condition stored with each route: its guard and its handler.
#[derive(Clone)]
pub struct Endpoint {
    pub(crate) guard: Option<Guard>,
    pub(crate) handler: BoxedHandler,
}

impl Endpoint {
    pub fn guard(&self) -> Option<&Guard> {
        self.guard.as_ref()
    }

    fn accepts(&self, head: &Parts) -> bool {
        self.guard.as_ref().is_none_or(|guard| guard.check(head))
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint").field("guard", &self.guard).finish_non_exhaustive()
    }
}

/// Outcome of [`Routes::resolve`].
#[derive(Debug)]
pub enum Resolution<'r> {
    Found {
        route: &'r NodeData<Endpoint>,
        params: Params,
    },
    /// The path matched, but only for these methods.
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

/// An immutable, built route table.
#[derive(Debug)]
pub struct Routes {
    trie: Trie<Endpoint>,
    trailing_slash: TrailingSlash,
}

impl Routes {
    pub(crate) fn new(trie: Trie<Endpoint>, trailing_slash: TrailingSlash) -> Self {
        Self { trie, trailing_slash }
    }

    pub fn trie(&self) -> &Trie<Endpoint> {
        &self.trie
    }

    /// Every route matching `path`, most specific first.
    pub fn candidates<'r>(&'r self, path: &'r str) -> Vec<MatchResult<'r, Endpoint>> {
        self.ranked(path, &())
    }

    fn ranked<'r, X: ?Sized>(
        &'r self,
        path: &'r str,
        context: &X,
    ) -> Vec<MatchResult<'r, Endpoint>> {
        let segments = path::segments(path, self.trailing_slash);
        // `segments` is never empty, so this cannot fail.
        let mut results = self.trie.matches(&segments, context).unwrap_or_default();
        results.sort_by(|a, b| b.score().cmp(&a.score()));
        results
    }

    /// Picks the route for a request.
    pub fn resolve<'r>(&'r self, head: &'r Parts) -> Resolution<'r> {
        let method = Method::from_http(&head.method);
        let mut allowed = Vec::new();

        for candidate in self.ranked(head.uri.path(), head) {
            let route = candidate.data;
            if !route.condition().accepts(head) {
                continue;
            }
            if Some(route.method()) == method {
                return Resolution::Found { route, params: candidate.params };
            }
            allowed.push(route.method());
        }

        if allowed.is_empty() {
            Resolution::NotFound
        } else {
            allowed.sort();
            allowed.dedup();
            Resolution::MethodNotAllowed(allowed)
        }
    }

    /// Resolves the request and runs the chosen handler.
    pub async fn respond(&self, head: Parts, body: Bytes) -> Response {
        let (handler, params) = match self.resolve(&head) {
            Resolution::Found { route, params } => {
                debug!(
                    method = %head.method,
                    path = head.uri.path(),
                    route = route.pattern(),
                    module = %route.module(),
                    score = route.score(),
                    "route matched"
                );
                (Arc::clone(&route.condition().handler), params)
            }
            Resolution::MethodNotAllowed(allowed) => {
                let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
                return Response::builder()
                    .status(StatusCode::METHOD_NOT_ALLOWED)
                    .header("allow", &allow)
                    .no_body();
            }
            Resolution::NotFound => {
                debug!(method = %head.method, path = head.uri.path(), "no route");
                return Response::status(StatusCode::NOT_FOUND);
            }
        };

        handler.call(Request::new(head, body, params)).await
    }

    /// One line per route: method, pattern, module#index and score.
    pub fn listing(&self) -> Vec<String> {
        self.trie.listing()
    }
}

/// A [`Routes`] that can be replaced while requests are being served.
///
/// Readers always see a complete table: the new one is built off to the
/// side and published with a single atomic pointer swap.
pub struct RouteTable {
    current: ArcSwap<Routes>,
}

impl RouteTable {
    pub fn new(routes: Routes) -> Self {
        Self { current: ArcSwap::from_pointee(routes) }
    }

    /// The table in effect right now.
    pub fn load(&self) -> Arc<Routes> {
        self.current.load_full()
    }

    /// Builds `router` and publishes it. On error the current table stays.
    pub fn reload(&self, router: Router) -> Result<(), BuildError> {
        match router.build() {
            Ok(routes) => {
                info!(routes = routes.trie().len(), "route table reloaded");
                self.current.store(Arc::new(routes));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "route reload rejected, keeping current table");
                Err(err)
            }
        }
    }
}

impl From<Routes> for RouteTable {
    fn from(routes: Routes) -> Self {
        Self::new(routes)
    }
}
