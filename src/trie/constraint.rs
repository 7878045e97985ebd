//! Constraints attached to `{name:constraint}` segments.
//!
//! A handful of common shapes have keywords. Anything that is not a keyword
//! is compiled as a regular expression anchored to the whole segment, so
//! `{year:\d{4}}` accepts `2024` but not `20245`.

use regex::Regex;

/// Test a constrained parameter applies to one path segment.
#[derive(Clone, Debug)]
pub enum Constraint {
    /// Optional `-` followed by ASCII digits.
    Int,
    /// ASCII digits only.
    Uint,
    /// ASCII letters only.
    Alpha,
    /// ASCII letters and digits.
    Alnum,
    /// ASCII hex digits.
    Hex,
    /// Lowercase letters, digits and inner `-`, e.g. `hello-world`.
    Slug,
    /// Hyphenated 8-4-4-4-12 hex UUID.
    Uuid,
    /// Arbitrary pattern, anchored on both ends.
    Pattern(Regex),
}

impl Constraint {
    /// Parses the text after the `:` in a parameter segment.
    pub fn parse(source: &str) -> Result<Self, regex::Error> {
        Ok(match source {
            "int"   => Self::Int,
            "uint"  => Self::Uint,
            "alpha" => Self::Alpha,
            "alnum" => Self::Alnum,
            "hex"   => Self::Hex,
            "slug"  => Self::Slug,
            "uuid"  => Self::Uuid,
            _       => Self::Pattern(Regex::new(&format!("^(?:{source})$"))?),
        })
    }

    pub fn accepts(&self, segment: &str) -> bool {
        match self {
            Self::Int => {
                let digits = segment.strip_prefix('-').unwrap_or(segment);
                all_nonempty(digits, |c| c.is_ascii_digit())
            }
            Self::Uint  => all_nonempty(segment, |c| c.is_ascii_digit()),
            Self::Alpha => all_nonempty(segment, |c| c.is_ascii_alphabetic()),
            Self::Alnum => all_nonempty(segment, |c| c.is_ascii_alphanumeric()),
            Self::Hex   => all_nonempty(segment, |c| c.is_ascii_hexdigit()),
            Self::Slug => {
                all_nonempty(segment, |c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
                    && !segment.starts_with('-')
                    && !segment.ends_with('-')
            }
            Self::Uuid => is_uuid(segment),
            Self::Pattern(re) => re.is_match(segment),
        }
    }
}

fn all_nonempty(s: &str, pred: impl Fn(char) -> bool) -> bool {
    !s.is_empty() && s.chars().all(pred)
}

fn is_uuid(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    groups.len() == 5
        && groups.iter().zip([8, 4, 4, 4, 12]).all(|(g, len)| {
            g.len() == len && g.chars().all(|c| c.is_ascii_hexdigit())
        })
}
