//! Error types.
//!
//! "No route matched" is not an error: it is an empty candidate list, and a
//! `404` at the HTTP layer. Errors here are either build-time problems with
//! a registered pattern or infrastructure failures from the server.

use thiserror::Error;

use crate::trie::ModuleId;

/// The error type returned by [`Server`](crate::Server).
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// A route that could not be added to the trie.
#[derive(Clone, Debug, Error)]
#[error("invalid route `{pattern}` ({module}#{route_index}): {kind}")]
pub struct BuildError {
    /// The offending pattern, as given.
    pub pattern: String,
    pub module: ModuleId,
    pub route_index: usize,
    pub kind: BuildErrorKind,
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum BuildErrorKind {
    #[error("pattern has no segments")]
    Empty,

    #[error("unrecognized segment `{segment}`: {reason}")]
    InvalidSegment { segment: String, reason: &'static str },

    #[error("invalid constraint in `{segment}`: {message}")]
    InvalidConstraint { segment: String, message: String },

    #[error("catch-all `{segment}` must be the last segment")]
    CatchAllNotLast { segment: String },

    #[error("parameter `{name}` is captured more than once")]
    DuplicateParameter { name: String },

    #[error("pattern has {count} segments, the limit is {limit}")]
    TooManySegments { count: usize, limit: usize },
}

/// Misuse of [`Trie::matches`](crate::trie::Trie::matches).
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum MatchError {
    #[error("cannot match an empty segment sequence")]
    EmptyPath,
}
