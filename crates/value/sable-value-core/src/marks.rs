//! Marks: opaque tokens attached to a single value node.
//!
//! A mark signals a cross-cutting property (sensitivity being the one this
//! workspace cares about) without touching the value's data. Marks are
//! shallow: a set belongs to exactly one node, never to its children.

use std::fmt;

use hashbrown::HashSet;

/// An opaque mark token. Equality is identity/string equality, never
/// structural: `Mark::other("sensitive")` is a distinct token from
/// [`Mark::Sensitive`] and is never interpreted as it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mark {
    /// The distinguished sensitivity token.
    Sensitive,
    /// Any other token. Opaque to this crate; preserved verbatim by every
    /// operation that touches mark sets.
    Other(String),
}

impl Mark {
    pub fn other(name: impl Into<String>) -> Mark {
        Mark::Other(name.into())
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Sensitive => f.write_str("sensitive"),
            Mark::Other(name) => f.write_str(name),
        }
    }
}

/// An unordered set of marks with plain set semantics: inserting a mark that
/// is already present changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkSet {
    marks: HashSet<Mark>,
}

impl MarkSet {
    pub fn new() -> MarkSet {
        MarkSet::default()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Inserts a mark; returns false if it was already present.
    pub fn insert(&mut self, mark: Mark) -> bool {
        self.marks.insert(mark)
    }

    /// Removes a mark; returns false if it was not present.
    pub fn remove(&mut self, mark: &Mark) -> bool {
        self.marks.remove(mark)
    }

    pub fn contains(&self, mark: &Mark) -> bool {
        self.marks.contains(mark)
    }

    /// Merges every mark of `other` into this set.
    pub fn merge(&mut self, other: MarkSet) {
        self.marks.extend(other.marks);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter()
    }
}

impl From<Mark> for MarkSet {
    fn from(mark: Mark) -> MarkSet {
        let mut set = MarkSet::new();
        set.insert(mark);
        set
    }
}

impl FromIterator<Mark> for MarkSet {
    fn from_iter<I: IntoIterator<Item = Mark>>(iter: I) -> MarkSet {
        MarkSet {
            marks: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MarkSet {
    type Item = Mark;
    type IntoIter = hashbrown::hash_set::IntoIter<Mark>;

    fn into_iter(self) -> Self::IntoIter {
        self.marks.into_iter()
    }
}
