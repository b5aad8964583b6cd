use crate::{math::Interner, Show};

/// Dense index of a state. State indices follow the lexicographic order of the state names.
pub type StateIndex = usize;

/// The set of states of an automaton, every state name is associated with a [`StateIndex`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateNames(Interner);

impl StateNames {
    /// Creates the set of states from raw entries, skipping blank ones.
    pub fn from_raw<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(Interner::from_raw(names))
    }

    /// Returns the number of states.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no states.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if a state with the given `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Gives the index of the state named `name`.
    pub fn index_of(&self, name: &str) -> Option<StateIndex> {
        self.0.index_of(name)
    }

    /// Gives the name of the state with index `index`.
    pub fn name(&self, index: StateIndex) -> Option<&str> {
        self.0.name(index)
    }

    /// Iterates over all `(index, name)` pairs in state order.
    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, &str)> + '_ {
        self.0.iter()
    }
}

impl Show for StateNames {
    fn show(&self) -> String {
        format!("{{{}}}", itertools::Itertools::join(&mut self.0.names(), ", "))
    }
}
