//! Variable-name sets.
//!
//! Queries, expressions and witnesses are expressed over variable names.
//! Ordered sets keep every rendering and every traversal deterministic.

use std::collections::{BTreeMap, BTreeSet};

/// An ordered set of variable names.
pub type NameSet = BTreeSet<String>;

/// A partial assignment: variable name → label.
pub type Values = BTreeMap<String, String>;

/// Build a [`NameSet`] from anything yielding string-like items.
pub fn name_set<I, S>(names: I) -> NameSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(|s| s.as_ref().to_string()).collect()
}

/// Render a name set as `{a, b, c}`.
pub fn format_names(names: &NameSet) -> String {
    let inner: Vec<&str> = names.iter().map(String::as_str).collect();
    format!("{{{}}}", inner.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_set_is_sorted_and_deduplicated() {
        let s = name_set(["b", "a", "b"]);
        assert_eq!(s.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn format_names_renders_braces() {
        assert_eq!(format_names(&name_set(["y", "x"])), "{x, y}");
        assert_eq!(format_names(&NameSet::new()), "{}");
    }
}
