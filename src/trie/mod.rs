//! Specificity-scored pattern trie.
//!
//! # Data Flow
//! ```text
//! Build (single writer, once per route table):
//!     ["users", "{id}"] + module + index + description
//!     → SegmentKind::parse each segment (reject bad syntax up front)
//!     → walk / extend the tree, sharing nodes by raw segment text
//!     → NodeData { score = Σ node scores } appended at the terminal node
//!
//! Serve (any number of concurrent readers):
//!     ["users", "42"]
//!     → recursive descent over every child whose pattern accepts the segment
//!     → one MatchResult per NodeData at every terminal reached
//! ```
//!
//! Matching is all-matches, not first-match: `/users/admin` is returned for
//! both `/users/admin` and `/users/{id}`. Picking the winner (highest score,
//! then guard) belongs to the caller.

mod captures;
mod constraint;
mod data;
mod node;
mod segment;

use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::CaptureConflict;
use crate::error::{BuildError, BuildErrorKind, MatchError};

pub use constraint::Constraint;
pub use data::{MatchResult, ModuleId, NodeData, Params, RouteDescription};
pub use node::Node;
pub use segment::{
    ParsedSegment, SegmentKind, SegmentMatch, CATCH_ALL_SCORE, CONSTRAINED_SCORE, LITERAL_SCORE,
    MAX_SEGMENTS, PARAMETER_SCORE,
};

use captures::Captures;

/// The pattern tree. `C` is the caller's opaque route condition.
#[derive(Debug)]
pub struct Trie<C> {
    root: Node<C>,
    capture_conflicts: CaptureConflict,
    routes: usize,
}

impl<C> Trie<C> {
    pub fn new() -> Self {
        Self::with_capture_conflicts(CaptureConflict::default())
    }

    pub fn with_capture_conflicts(capture_conflicts: CaptureConflict) -> Self {
        Self { root: Node::root(), capture_conflicts, routes: 0 }
    }

    pub fn root(&self) -> &Node<C> {
        &self.root
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes == 0
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Registers one route.
    ///
    /// Every segment is validated before the tree is touched, so a failed
    /// call leaves the trie exactly as it was.
    pub fn add(
        &mut self,
        segments: &[&str],
        module: &ModuleId,
        route_index: usize,
        description: RouteDescription<C>,
    ) -> Result<(), BuildError> {
        let pattern: Arc<str> = format!("/{}", segments.join("/")).into();
        let fail = |kind| BuildError {
            pattern: pattern.to_string(),
            module: module.clone(),
            route_index,
            kind,
        };

        if segments.is_empty() {
            return Err(fail(BuildErrorKind::Empty));
        }
        if segments.len() > MAX_SEGMENTS {
            return Err(fail(BuildErrorKind::TooManySegments {
                count: segments.len(),
                limit: MAX_SEGMENTS,
            }));
        }

        let parsed = segments
            .iter()
            .map(|raw| SegmentKind::parse(raw))
            .collect::<Result<Vec<_>, _>>()
            .map_err(fail)?;

        if let Some(pos) = parsed.iter().position(|p| p.kind.is_catch_all()) {
            if pos + 1 != parsed.len() {
                return Err(fail(BuildErrorKind::CatchAllNotLast {
                    segment: segments[pos].to_owned(),
                }));
            }
        }

        if self.capture_conflicts == CaptureConflict::Reject {
            let mut seen = Vec::new();
            for name in parsed.iter().flat_map(|p| p.names()) {
                if seen.contains(&name) {
                    return Err(fail(BuildErrorKind::DuplicateParameter { name: name.to_owned() }));
                }
                seen.push(name);
            }
        }

        debug!(
            pattern = %pattern,
            module = %module,
            route_index,
            method = %description.method,
            "adding route"
        );

        let record = NodeData {
            module: module.clone(),
            route_index,
            segment_count: 0,
            score: 0,
            method: description.method,
            condition: description.condition,
            pattern,
        };
        self.root.insert(segments.iter().copied().zip(parsed), record, 0, 0);
        self.routes += 1;
        Ok(())
    }

    /// Every registered route compatible with `segments`, with the
    /// parameters captured along its branch.
    ///
    /// `context` is the caller's per-request value. It is forwarded through
    /// the whole descent untouched; pass `&()` when there is none.
    ///
    /// Results come out in tree order (depth-first, children in insertion
    /// order). An empty vector means no route matched.
    pub fn matches<'t, X: ?Sized>(
        &'t self,
        segments: &[&'t str],
        context: &X,
    ) -> Result<Vec<MatchResult<'t, C>>, MatchError> {
        if segments.is_empty() {
            return Err(MatchError::EmptyPath);
        }

        let mut out = Vec::new();
        self.root.descend(segments, 0, &Captures::default(), context, &mut out);
        trace!(segments = segments.len(), candidates = out.len(), "matched path");
        Ok(out)
    }

    /// Human-readable listing, one line per registered route.
    pub fn listing(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.routes);
        self.root.list("", &mut out);
        out
    }
}

impl<C> Default for Trie<C> {
    fn default() -> Self {
        Self::new()
    }
}
