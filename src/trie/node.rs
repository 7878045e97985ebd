//! The recursive pattern tree.
//!
//! Children are keyed by the exact raw text of their pattern segment, so
//! `{id}` and `{Id}` are two children, not one. Iteration order is
//! insertion order and is visible in the order of match results.

use indexmap::IndexMap;

use crate::trie::captures::Captures;
use crate::trie::data::{MatchResult, NodeData};
use crate::trie::segment::{ParsedSegment, SegmentKind, SegmentMatch};

#[derive(Debug)]
pub struct Node<C> {
    pattern: Box<str>,
    kind: SegmentKind,
    statics: Vec<(Box<str>, Box<str>)>,
    children: IndexMap<Box<str>, Node<C>>,
    data: Vec<NodeData<C>>,
}

impl<C> Node<C> {
    pub(crate) fn root() -> Self {
        Self::with_segment("", ParsedSegment { kind: SegmentKind::Root, statics: Vec::new() })
    }

    fn with_segment(pattern: &str, parsed: ParsedSegment) -> Self {
        Self {
            pattern: pattern.into(),
            kind: parsed.kind,
            statics: parsed.statics,
            children: IndexMap::new(),
            data: Vec::new(),
        }
    }

    /// Raw pattern text of this node; empty for the root.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn kind(&self) -> &SegmentKind {
        &self.kind
    }

    pub fn score(&self) -> u64 {
        self.kind.score()
    }

    pub fn child(&self, raw: &str) -> Option<&Node<C>> {
        self.children.get(raw)
    }

    pub fn children(&self) -> impl Iterator<Item = &Node<C>> {
        self.children.values()
    }

    /// Routes that end at this node.
    pub fn data(&self) -> &[NodeData<C>] {
        &self.data
    }

    /// Walks towards the terminal node, creating missing children on the
    /// way. `rest` yields the raw text and parsed form of every segment not
    /// yet consumed; `depth` counts the ones that were, and `score` is the
    /// total of every ancestor.
    pub(crate) fn insert<'r, I>(
        &mut self,
        mut rest: I,
        mut record: NodeData<C>,
        depth: usize,
        score: u64,
    ) where
        I: Iterator<Item = (&'r str, ParsedSegment)>,
    {
        let score = score + self.score();
        let Some((raw, parsed)) = rest.next() else {
            record.segment_count = depth;
            record.score = score;
            self.data.push(record);
            return;
        };

        let child = self
            .children
            .entry(raw.into())
            .or_insert_with(|| Node::with_segment(raw, parsed));
        child.insert(rest, record, depth + 1, score);
    }

    /// Fans out over every child for the segment at `index`.
    ///
    /// `context` belongs to the caller; it is handed down unchanged and
    /// never read here.
    pub(crate) fn descend<'t, X: ?Sized>(
        &'t self,
        segments: &[&'t str],
        index: usize,
        captures: &Captures<'t>,
        context: &X,
        out: &mut Vec<MatchResult<'t, C>>,
    ) {
        for child in self.children.values() {
            child.collect(segments, index, captures.clone(), context, out);
        }
    }

    fn collect<'t, X: ?Sized>(
        &'t self,
        segments: &[&'t str],
        index: usize,
        mut captures: Captures<'t>,
        context: &X,
        out: &mut Vec<MatchResult<'t, C>>,
    ) {
        for (name, value) in &self.statics {
            captures = captures.push(name, (&**value).into());
        }

        let SegmentMatch::Matched(pairs) = self.kind.matches(segments, index) else {
            return;
        };
        for (name, value) in pairs {
            captures = captures.push(name, value);
        }

        if index + 1 == segments.len() || self.kind.is_catch_all() {
            out.extend(self.data.iter().map(|data| data.with_params(captures.to_params())));
            return;
        }

        self.descend(segments, index + 1, &captures, context, out);
    }

    /// Appends one line per route ending at or below this node.
    pub(crate) fn list(&self, prefix: &str, out: &mut Vec<String>) {
        for data in &self.data {
            out.push(format!(
                "{:<7} {:<32} {}#{} score={}",
                data.method(),
                prefix_or_root(prefix),
                data.module(),
                data.route_index(),
                data.score(),
            ));
        }
        for child in self.children.values() {
            child.list(&format!("{prefix}/{}", child.pattern), out);
        }
    }

    pub(crate) fn count(&self) -> usize {
        1 + self.children.values().map(Node::count).sum::<usize>()
    }
}

fn prefix_or_root(prefix: &str) -> &str {
    if prefix.is_empty() { "/" } else { prefix }
}
