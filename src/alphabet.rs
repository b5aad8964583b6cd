use itertools::Itertools;

use crate::{math::Interner, Show};

/// Position of a symbol within an [`Alphabet`].
pub type SymbolIndex = usize;

/// Represents an alphabet where a symbol is an opaque, non-blank string token.
///
/// # Example
/// The symbols are kept in lexicographic order and each of them is assigned the
/// position it takes in that order, so constructing an alphabet from `["b", "a", "b"]`
/// yields the alphabet `{a, b}` where `a` has index `0` and `b` has index `1`.
/// ```
/// use lexdfa::prelude::*;
///
/// let alphabet = Alphabet::from_raw(["b", "a", "", "b"]);
/// assert_eq!(alphabet.size(), 2);
/// assert_eq!(alphabet.index_of("b"), Some(1));
/// assert!(!alphabet.contains("c"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alphabet(Interner);

impl Alphabet {
    /// Creates an alphabet from the raw symbol entries, blank entries are skipped.
    pub fn from_raw<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(Interner::from_raw(symbols))
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the alphabet has no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: &str) -> bool {
        self.0.contains(symbol)
    }

    /// Gives the position of `symbol` in the alphabet.
    pub fn index_of(&self, symbol: &str) -> Option<SymbolIndex> {
        self.0.index_of(symbol)
    }

    /// Returns the symbol at position `index`.
    pub fn symbol(&self, index: SymbolIndex) -> Option<&str> {
        self.0.name(index)
    }

    /// Iterates over all symbols in order.
    pub fn universe(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.names()
    }

    /// Iterates over all `(index, symbol)` pairs in order.
    pub fn indexed(&self) -> impl Iterator<Item = (SymbolIndex, &str)> + '_ {
        self.0.iter()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Alphabet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_raw(iter)
    }
}

impl Show for Alphabet {
    fn show(&self) -> String {
        format!("{{{}}}", self.universe().join(", "))
    }
}
