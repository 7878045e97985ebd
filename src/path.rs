//! Splitting paths and patterns into segments.
//!
//! The same splitter is used for registered patterns and for request paths,
//! so both sides agree on what a segment is. The leading `/` is not a
//! segment; the root path `/` is one empty segment.

use crate::config::TrailingSlash;

pub fn segments(path: &str, mode: TrailingSlash) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let mut out: Vec<&str> = match mode {
        TrailingSlash::Ignore => path.split('/').filter(|s| !s.is_empty()).collect(),
        TrailingSlash::Strict => path.split('/').collect(),
    };
    if out.is_empty() {
        out.push("");
    }
    out
}
