//! Persistent list of captured `(name, value)` pairs.
//!
//! Matching fans out over every child of a node. Each branch needs its own
//! view of the captures made so far, and nothing a branch adds may be seen
//! by its siblings. Pushing returns a new head that shares the tail with the
//! parent, so handing a branch its copy is one `Rc` clone.

use std::borrow::Cow;
use std::rc::Rc;

use crate::trie::data::Params;

#[derive(Clone, Default)]
pub(crate) struct Captures<'a>(Option<Rc<Link<'a>>>);

struct Link<'a> {
    name: &'a str,
    value: Cow<'a, str>,
    prev: Captures<'a>,
}

impl<'a> Captures<'a> {
    pub(crate) fn push(&self, name: &'a str, value: Cow<'a, str>) -> Self {
        Self(Some(Rc::new(Link { name, value, prev: self.clone() })))
    }

    /// Flattens into a map. Later pushes overwrite earlier ones with the same name.
    pub(crate) fn to_params(&self) -> Params {
        let mut chain = Vec::new();
        let mut cursor = &self.0;
        while let Some(link) = cursor {
            chain.push(link);
            cursor = &link.prev.0;
        }

        chain
            .into_iter()
            .rev()
            .map(|link| (link.name.to_owned(), link.value.clone().into_owned()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_capture_wins() {
        let caps = Captures::default()
            .push("id", Cow::Borrowed("1"))
            .push("id", Cow::Borrowed("2"));
        assert_eq!(caps.to_params().get("id").map(String::as_str), Some("2"));
    }

    #[test]
    fn branches_do_not_see_each_other() {
        let base = Captures::default().push("a", Cow::Borrowed("1"));
        let left = base.push("b", Cow::Borrowed("2"));
        let right = base.push("c", Cow::Borrowed("3"));

        assert_eq!(left.to_params().len(), 2);
        assert!(!left.to_params().contains_key("c"));
        assert!(!right.to_params().contains_key("b"));
        assert_eq!(base.to_params().len(), 1);
    }
}
