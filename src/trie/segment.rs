//! Segment variants, their specificity scores, and the factory that picks a
//! variant from raw pattern text.
//!
//! | Syntax             | Variant                 | Score  |
//! |--------------------|-------------------------|--------|
//! | `users`            | literal                 | 256³   |
//! | `{lang=en}`        | literal + static param  | 256³   |
//! | `{id:int}`         | constrained parameter   | 256²   |
//! | `{id}`             | parameter               | 256    |
//! | `{*rest}`          | catch-all               | 1      |
//!
//! A route never has more than [`MAX_SEGMENTS`] segments, so the sum of any
//! number of lower-tier scores stays below a single higher-tier score.

use std::borrow::Cow;

use crate::error::BuildErrorKind;
use crate::trie::constraint::Constraint;

/// Upper bound on segments per registered route.
pub const MAX_SEGMENTS: usize = 255;

pub const LITERAL_SCORE: u64 = 1 << 24;
pub const CONSTRAINED_SCORE: u64 = 1 << 16;
pub const PARAMETER_SCORE: u64 = 1 << 8;
pub const CATCH_ALL_SCORE: u64 = 1;

/// What a node matches, decided once from its pattern text.
#[derive(Clone, Debug)]
pub enum SegmentKind {
    /// The weightless root. Never tested against a segment.
    Root,
    Literal(Box<str>),
    Parameter(Box<str>),
    Constrained { name: Box<str>, constraint: Constraint },
    CatchAll(Box<str>),
}

/// Outcome of testing one path segment against one node.
#[derive(Debug, PartialEq, Eq)]
pub enum SegmentMatch<'a> {
    NoMatch,
    Matched(Vec<(&'a str, Cow<'a, str>)>),
}

impl SegmentMatch<'_> {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

/// A parsed pattern segment: its variant plus any build-time parameters.
#[derive(Clone, Debug)]
pub struct ParsedSegment {
    pub kind: SegmentKind,
    pub statics: Vec<(Box<str>, Box<str>)>,
}

impl ParsedSegment {
    /// Names this segment writes into the captured map.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.statics
            .iter()
            .map(|(name, _)| &**name)
            .chain(self.kind.capture_name())
    }
}

impl SegmentKind {
    /// The node factory. Classifies `raw` purely by syntax.
    pub fn parse(raw: &str) -> Result<ParsedSegment, BuildErrorKind> {
        let invalid = |reason: &'static str| BuildErrorKind::InvalidSegment {
            segment: raw.to_owned(),
            reason,
        };

        let Some(inner) = raw.strip_prefix('{') else {
            if raw.contains(['{', '}']) {
                return Err(invalid("braces are only allowed around a whole segment"));
            }
            return Ok(ParsedSegment { kind: Self::Literal(raw.into()), statics: Vec::new() });
        };
        let Some(inner) = inner.strip_suffix('}') else {
            return Err(invalid("unterminated `{`"));
        };

        if let Some(name) = inner.strip_prefix('*') {
            if name.contains([':', '=']) {
                return Err(invalid("a catch-all cannot carry a constraint or value"));
            }
            check_name(name).map_err(invalid)?;
            return Ok(ParsedSegment { kind: Self::CatchAll(name.into()), statics: Vec::new() });
        }

        // `:` wins over `=` so constraint regexes may contain `=`.
        match (inner.find(':'), inner.find('=')) {
            (Some(colon), _) => {
                let (name, source) = (&inner[..colon], &inner[colon + 1..]);
                check_name(name).map_err(invalid)?;
                if source.is_empty() {
                    return Err(invalid("empty constraint"));
                }
                let constraint = Constraint::parse(source).map_err(|e| {
                    BuildErrorKind::InvalidConstraint {
                        segment: raw.to_owned(),
                        message: e.to_string(),
                    }
                })?;
                Ok(ParsedSegment {
                    kind: Self::Constrained { name: name.into(), constraint },
                    statics: Vec::new(),
                })
            }
            (None, Some(eq)) => {
                let (name, value) = (&inner[..eq], &inner[eq + 1..]);
                check_name(name).map_err(invalid)?;
                if value.is_empty() || value.contains(['{', '}']) {
                    return Err(invalid("a static parameter needs a plain literal value"));
                }
                Ok(ParsedSegment {
                    kind: Self::Literal(value.into()),
                    statics: vec![(name.into(), value.into())],
                })
            }
            (None, None) => {
                check_name(inner).map_err(invalid)?;
                Ok(ParsedSegment { kind: Self::Parameter(inner.into()), statics: Vec::new() })
            }
        }
    }

    /// Fixed specificity of this variant.
    pub fn score(&self) -> u64 {
        match self {
            Self::Root => 0,
            Self::Literal(_) => LITERAL_SCORE,
            Self::Constrained { .. } => CONSTRAINED_SCORE,
            Self::Parameter(_) => PARAMETER_SCORE,
            Self::CatchAll(_) => CATCH_ALL_SCORE,
        }
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, Self::CatchAll(_))
    }

    fn capture_name(&self) -> Option<&str> {
        match self {
            Self::Parameter(name) | Self::CatchAll(name) => Some(&**name),
            Self::Constrained { name, .. } => Some(&**name),
            Self::Root | Self::Literal(_) => None,
        }
    }

    /// Tests `segments[index]` against this variant.
    ///
    /// A catch-all takes everything from `index` to the end, joined by `/`.
    /// An `index` past the end never matches.
    pub fn matches<'a>(&'a self, segments: &[&'a str], index: usize) -> SegmentMatch<'a> {
        let Some(&segment) = segments.get(index) else {
            return SegmentMatch::NoMatch;
        };
        match self {
            Self::Root => SegmentMatch::NoMatch,
            Self::Literal(text) => {
                if **text == *segment {
                    SegmentMatch::Matched(Vec::new())
                } else {
                    SegmentMatch::NoMatch
                }
            }
            Self::Parameter(name) => SegmentMatch::Matched(vec![(&**name, Cow::Borrowed(segment))]),
            Self::Constrained { name, constraint } => {
                if constraint.accepts(segment) {
                    SegmentMatch::Matched(vec![(&**name, Cow::Borrowed(segment))])
                } else {
                    SegmentMatch::NoMatch
                }
            }
            Self::CatchAll(name) => {
                let rest = &segments[index..];
                let value = match rest {
                    [single] => Cow::Borrowed(*single),
                    _ => Cow::Owned(rest.join("/")),
                };
                SegmentMatch::Matched(vec![(&**name, value)])
            }
        }
    }
}

fn check_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("empty parameter name");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("parameter names may only contain ASCII letters, digits and `_`");
    }
    Ok(())
}
