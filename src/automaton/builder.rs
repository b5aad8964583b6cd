use bit_set::BitSet;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    alphabet::Alphabet,
    error::StructuralError,
    math::non_blank,
    transition_system::{StateNames, TransitionTable},
};

use super::Dfa;

/// A raw transition record as it appears in a specification. A well-formed record consists of
/// exactly three fields: the source state, the destination state and the symbol. Whether a
/// record is well-formed is only checked when a [`Dfa`] is built from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionRecord {
    raw: String,
    fields: Vec<String>,
}

impl TransitionRecord {
    /// Splits the `raw` record into its fields along `separator`. Blank fields are skipped.
    pub fn parse(raw: &str, separator: &str) -> Self {
        let raw = raw.trim();
        Self {
            raw: raw.to_string(),
            fields: raw
                .split(separator)
                .filter_map(non_blank)
                .map(str::to_string)
                .collect(),
        }
    }

    /// Returns the record as it was given.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the fields of the record.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// A record is blank if it has no content at all, such records are skipped.
    pub fn is_blank(&self) -> bool {
        self.raw.is_empty()
    }

    /// Decomposes the record into source, destination and symbol, if it has exactly three fields.
    pub fn triple(&self) -> Option<(&str, &str, &str)> {
        match self.fields.as_slice() {
            [source, target, symbol] => Some((source.as_str(), target.as_str(), symbol.as_str())),
            _ => None,
        }
    }
}

impl<Q: AsRef<str>, P: AsRef<str>, S: AsRef<str>> From<(Q, P, S)> for TransitionRecord {
    fn from((source, target, symbol): (Q, P, S)) -> Self {
        let fields = vec![
            source.as_ref().trim().to_string(),
            target.as_ref().trim().to_string(),
            symbol.as_ref().trim().to_string(),
        ];
        Self {
            raw: fields.join(","),
            fields,
        }
    }
}

/// Collects the raw parts of a deterministic finite automaton and validates them upon
/// [`DfaBuilder::build`]. Blank entries in any of the lists are skipped.
///
/// The invariants are checked in a fixed order and the first violation is reported:
/// 1. there is at least one state,
/// 2. every accepting state is a state,
/// 3. the start state is a state,
/// 4. every transition record has three fields, refers to existing states and is labeled
///    with a symbol of the alphabet (record by record, in the order they were added),
/// 5. every state has a transition on every symbol.
///
/// Defining the same transition twice is not an error, the last definition wins.
///
/// # Example
///
/// ```
/// use lexdfa::prelude::*;
///
/// let dfa = Dfa::builder()
///     .with_states(["A", "B"])
///     .with_accepting_states(["B"])
///     .with_alphabet(["0", "1"])
///     .with_initial("A")
///     .with_transitions([("A", "A", "0"), ("A", "B", "1"), ("B", "B", "0"), ("B", "A", "1")])
///     .build()
///     .unwrap();
/// assert!(dfa.accepts(["1"]));
/// assert!(!dfa.accepts(["1", "1"]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DfaBuilder {
    states: Vec<String>,
    accepting: Vec<String>,
    alphabet: Vec<String>,
    initial: Option<String>,
    transitions: Vec<TransitionRecord>,
}

fn owned<I, S>(iter: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    iter.into_iter().map(|s| s.as_ref().to_string())
}

impl DfaBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given raw state entries.
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.states.extend(owned(states));
        self
    }

    /// Adds the given raw accepting state entries.
    pub fn with_accepting_states<I, S>(mut self, accepting: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.accepting.extend(owned(accepting));
        self
    }

    /// Adds the given raw alphabet entries.
    pub fn with_alphabet<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.alphabet.extend(owned(symbols));
        self
    }

    /// Sets the start state, replacing an earlier one.
    pub fn with_initial(mut self, initial: impl AsRef<str>) -> Self {
        self.initial = Some(initial.as_ref().to_string());
        self
    }

    /// Adds a list of transition records. These can be anything that converts into a
    /// [`TransitionRecord`], for example triples `(source, destination, symbol)`.
    pub fn with_transitions<I, R>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<TransitionRecord>,
    {
        self.transitions
            .extend(transitions.into_iter().map(Into::into));
        self
    }

    /// Validates the collected parts and freezes them into a [`Dfa`]. The builder itself is
    /// left untouched, so building twice yields two automata that behave identically.
    pub fn build(&self) -> Result<Dfa, StructuralError> {
        let states = StateNames::from_raw(&self.states);
        if states.is_empty() {
            return Err(StructuralError::EmptyStates);
        }

        let mut accepting = BitSet::with_capacity(states.len());
        for name in self.accepting.iter().filter_map(|q| non_blank(q)) {
            match states.index_of(name) {
                Some(q) => {
                    accepting.insert(q);
                }
                None => return Err(StructuralError::InvalidAcceptState(name.to_string())),
            }
        }

        let alphabet = Alphabet::from_raw(&self.alphabet);

        let initial_name = self.initial.as_deref().map(str::trim).unwrap_or_default();
        let initial = states
            .index_of(initial_name)
            .ok_or_else(|| StructuralError::InvalidStartState(initial_name.to_string()))?;

        let mut table = TransitionTable::new(states.len(), alphabet.size());
        for record in self.transitions.iter().filter(|t| !t.is_blank()) {
            let Some((source, target, symbol)) = record.triple() else {
                return Err(StructuralError::MalformedTransition(record.raw().to_string()));
            };
            let unknown_state = |state: &str| StructuralError::UnknownTransitionState {
                transition: record.raw().to_string(),
                state: state.to_string(),
            };
            let p = states.index_of(source).ok_or_else(|| unknown_state(source))?;
            let q = states.index_of(target).ok_or_else(|| unknown_state(target))?;
            let a = alphabet.index_of(symbol).ok_or_else(|| {
                StructuralError::UnknownTransitionSymbol {
                    transition: record.raw().to_string(),
                    symbol: symbol.to_string(),
                }
            })?;

            if let Some(previous) = table.set(p, a, q) {
                debug!(
                    "transition from {source} on {symbol} redefined, replacing target {} with {target}",
                    states.name(previous).unwrap_or_default()
                );
            }
        }

        if let Some((q, a)) = table.first_missing() {
            return Err(StructuralError::MissingTransition {
                state: states.name(q).unwrap_or_default().to_string(),
                symbol: alphabet.symbol(a).unwrap_or_default().to_string(),
            });
        }

        trace!(
            "built automaton with states {} and {} accepting",
            states.iter().map(|(_, q)| q).join(", "),
            accepting.len()
        );
        Ok(Dfa::from_parts(states, alphabet, initial, accepting, table))
    }
}
