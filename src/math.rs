use std::collections::BTreeSet;

/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// Returns `None` if the given raw entry is blank (i.e. empty after trimming surrounding
/// whitespace), otherwise the trimmed entry.
pub fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// An ordered collection of distinct names, each of which is associated with a dense
/// index. Indices are handed out in lexicographic order of the names, so the index
/// order coincides with the sorted order of the names. This makes iteration over the
/// names (and everything that is indexed by them) reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Interner(Bijection<usize, String>);

impl Interner {
    /// Builds an interner from the given raw names. Blank entries are skipped and duplicates
    /// collapse into a single name.
    pub fn from_raw<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted: BTreeSet<String> = names
            .into_iter()
            .filter_map(|name| non_blank(name.as_ref()).map(str::to_string))
            .collect();
        Self(sorted.into_iter().enumerate().collect())
    }

    /// Returns the number of interned names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no name is interned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Looks up the index of the given `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.get_by_right(name).copied()
    }

    /// Returns the name that is associated with `index`.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.0.get_by_left(&index).map(String::as_str)
    }

    /// Returns true if `name` is interned.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_right(name)
    }

    /// Iterates over all `(index, name)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.0.iter().map(|(i, name)| (*i, name.as_str()))
    }

    /// Iterates over the interned names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.right_values().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::Interner;

    #[test]
    fn interning_is_sorted_and_skips_blanks() {
        let interner = Interner::from_raw(["q2", "", "q0", "  ", "q1", "q0"]);
        assert_eq!(interner.len(), 3);
        assert_eq!(interner.names().collect::<Vec<_>>(), vec!["q0", "q1", "q2"]);
        assert_eq!(interner.index_of("q1"), Some(1));
        assert_eq!(interner.name(2), Some("q2"));
        assert!(!interner.contains(""));
    }

    #[test]
    fn entries_are_trimmed() {
        let interner = Interner::from_raw([" a ", "b\r"]);
        assert_eq!(interner.index_of("a"), Some(0));
        assert_eq!(interner.index_of("b"), Some(1));
    }
}
