//! Router configuration.
//!
//! ```rust
//! use sprig::{CaptureConflict, Config, TrailingSlash};
//!
//! let config = Config::default()
//!     .capture_conflicts(CaptureConflict::Reject)
//!     .trailing_slash(TrailingSlash::Strict);
//! ```

/// What to do when one pattern writes the same parameter name twice, e.g.
/// `/{id}/items/{id}`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CaptureConflict {
    /// The capture nearest the end of the path wins.
    #[default]
    Overwrite,
    /// The route fails to build.
    Reject,
}

/// How empty segments (`/users/`, `/a//b`) are treated, for both patterns
/// and request paths.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TrailingSlash {
    /// Empty segments are dropped: `/users/` is `/users`.
    #[default]
    Ignore,
    /// Empty segments are kept: `/users/` only matches a pattern that
    /// ends in `/`.
    Strict,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    pub capture_conflicts: CaptureConflict,
    pub trailing_slash: TrailingSlash,
}

impl Config {
    pub fn capture_conflicts(mut self, policy: CaptureConflict) -> Self {
        self.capture_conflicts = policy;
        self
    }

    pub fn trailing_slash(mut self, mode: TrailingSlash) -> Self {
        self.trailing_slash = mode;
        self
    }
}
