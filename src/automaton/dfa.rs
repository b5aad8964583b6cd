use bit_set::BitSet;
use owo_colors::OwoColorize;
use tracing::error;

use crate::{
    alphabet::Alphabet,
    format::output::{ACCEPTED, INVALID_INPUT, REJECTED},
    transition_system::{Run, StateIndex, StateNames, Step, TransitionTable},
    Show,
};

use super::DfaBuilder;

/// The outcome of simulating a [`Dfa`] on a word.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The word was consumed entirely and the run ended in an accepting state.
    Accepted,
    /// The word was consumed entirely and the run ended in a rejecting state.
    Rejected,
    /// The contained symbol is not part of the alphabet, the simulation stopped there.
    InvalidInput(String),
}

impl Verdict {
    /// Returns true if `self` is [`Verdict::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Accepted => write!(f, "{ACCEPTED}"),
            Verdict::Rejected => write!(f, "{REJECTED}"),
            Verdict::InvalidInput(symbol) => write!(f, "{INVALID_INPUT} {symbol}"),
        }
    }
}

/// A deterministic finite automaton (DFA) whose transition function is total. It accepts a
/// finite word if reading it from the initial state leads into an accepting state.
///
/// A `Dfa` can only be obtained through [`DfaBuilder::build`], which checks all structural
/// invariants. Afterwards it can not be modified any more, so it may be shared freely
/// between threads and used for any number of simulations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    states: StateNames,
    alphabet: Alphabet,
    initial: StateIndex,
    accepting: BitSet,
    table: TransitionTable,
}

impl Dfa {
    /// Instantiates a new, empty [`DfaBuilder`].
    pub fn builder() -> DfaBuilder {
        DfaBuilder::default()
    }

    pub(crate) fn from_parts(
        states: StateNames,
        alphabet: Alphabet,
        initial: StateIndex,
        accepting: BitSet,
        table: TransitionTable,
    ) -> Self {
        Self {
            states,
            alphabet,
            initial,
            accepting,
            table,
        }
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns a reference to the alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns a reference to the states.
    pub fn states(&self) -> &StateNames {
        &self.states
    }

    /// Returns a reference to the underlying transition table.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Returns the index of the initial state.
    pub fn initial(&self) -> StateIndex {
        self.initial
    }

    /// Gives the name of the state `state`.
    pub fn state_name(&self, state: StateIndex) -> Option<&str> {
        self.states.name(state)
    }

    /// Looks up the index of the state that is named `name`.
    pub fn state_index(&self, name: &str) -> Option<StateIndex> {
        self.states.index_of(name)
    }

    /// Returns true if `state` is accepting.
    pub fn is_accepting(&self, state: StateIndex) -> bool {
        self.accepting.contains(state)
    }

    /// Iterates over the names of all accepting states in state order.
    pub fn accepting_states(&self) -> impl Iterator<Item = &str> + '_ {
        self.accepting.iter().filter_map(|q| self.states.name(q))
    }

    /// Returns the index of the state that is reached from `state` on `symbol`. Gives `None`
    /// if `symbol` is not part of the alphabet.
    pub fn successor(&self, state: StateIndex, symbol: &str) -> Option<StateIndex> {
        self.table.get(state, self.alphabet.index_of(symbol)?)
    }

    /// Starts a [`Run`] of `word` from the initial state.
    pub fn run_from_initial<W>(&self, word: W) -> Run<'_, W::IntoIter>
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        Run::new(&self.alphabet, &self.table, self.initial, word)
    }

    /// Simulates `self` on `word` and gives the resulting [`Verdict`]. The first symbol that does
    /// not belong to the alphabet stops the simulation and is reported through
    /// [`Verdict::InvalidInput`], regardless of what follows it.
    ///
    /// # Example
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
    /// assert_eq!(dfa.run(["1"]), Verdict::Accepted);
    /// assert_eq!(dfa.run(["0"]), Verdict::Rejected);
    /// assert_eq!(dfa.run(["1", "2"]), Verdict::InvalidInput("2".to_string()));
    /// ```
    pub fn run<W>(&self, word: W) -> Verdict
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        let mut run = self.run_from_initial(word);
        for step in run.by_ref() {
            match step {
                Step::Moved { .. } => {}
                Step::UnknownSymbol { symbol, .. } => return Verdict::InvalidInput(symbol),
                Step::MissingTransition {
                    position, state, ..
                } => {
                    error!(
                        "missing transition from state {} at position {position}, automaton is not total",
                        self.state_name(state).unwrap_or_default()
                    );
                    return Verdict::Rejected;
                }
            }
        }

        if self.is_accepting(run.state()) {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        }
    }

    /// Runs every word of `words` and collects the verdicts in the same order.
    pub fn run_all<I, W>(&self, words: I) -> Vec<Verdict>
    where
        I: IntoIterator<Item = W>,
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        words.into_iter().map(|word| self.run(word)).collect()
    }

    /// Returns whether `self` accepts the given finite word.
    pub fn accepts<W>(&self, word: W) -> bool
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        self.run(word).is_accepted()
    }

    /// Returns a string representation of the transition table. The initial state is marked
    /// with `→` and accepting states are set in bold.
    pub fn build_transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(self.alphabet.universe().map(str::to_string)),
        );
        for (q, name) in self.states.iter() {
            let mut label = if q == self.initial {
                format!("→ {name}")
            } else {
                name.to_string()
            };
            if self.is_accepting(q) {
                label = label.bold().to_string();
            }
            let mut row = vec![label];
            row.extend(self.table.row(q).unwrap_or_default().iter().map(|target| {
                target
                    .and_then(|p| self.state_name(p))
                    .unwrap_or("-")
                    .to_string()
            }));
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl Show for Dfa {
    fn show(&self) -> String {
        self.build_transition_table()
    }
}

#[cfg(test)]
mod tests {
    use super::Verdict;
    use crate::prelude::*;

    pub(crate) fn flip_flop() -> Dfa {
        Dfa::builder()
            .with_states(["A", "B"])
            .with_accepting_states(["B"])
            .with_alphabet(["0", "1"])
            .with_initial("A")
            .with_transitions([("A", "A", "0"), ("A", "B", "1"), ("B", "B", "0"), ("B", "A", "1")])
            .build()
            .unwrap()
    }

    #[test]
    fn verdicts() {
        let dfa = flip_flop();
        assert_eq!(dfa.run(["1"]), Verdict::Accepted);
        assert_eq!(dfa.run(["1", "1"]), Verdict::Rejected);
        assert_eq!(dfa.run(["0"]), Verdict::Rejected);
        assert_eq!(dfa.run(Vec::<&str>::new()), Verdict::Rejected);
    }

    #[test]
    fn invalid_symbol_short_circuits() {
        let dfa = flip_flop();
        assert_eq!(dfa.run(["1", "2"]), Verdict::InvalidInput("2".into()));
        assert_eq!(dfa.run(["2", "x"]), Verdict::InvalidInput("2".into()));
        assert_eq!(
            dfa.run(["1", "2"]).to_string(),
            "Invalid input string at 2"
        );
    }

    #[test]
    fn run_all_preserves_order() {
        let dfa = flip_flop();
        let words = vec![vec!["1"], vec!["1", "1"], vec!["0", "9"]];
        assert_eq!(
            dfa.run_all(&words),
            vec![
                Verdict::Accepted,
                Verdict::Rejected,
                Verdict::InvalidInput("9".into())
            ]
        );
    }

    #[test]
    fn simulation_is_deterministic() {
        let dfa = flip_flop();
        let word = ["1", "0", "0", "1", "1"];
        let first = dfa.run(word);
        assert!((0..10).all(|_| dfa.run(word) == first));
    }

    #[test]
    fn introspection() {
        let dfa = flip_flop();
        assert_eq!(dfa.size(), 2);
        assert_eq!(dfa.accepting_states().collect::<Vec<_>>(), vec!["B"]);
        let a = dfa.state_index("A").unwrap();
        assert_eq!(dfa.successor(a, "1"), dfa.state_index("B"));
        assert_eq!(dfa.successor(a, "2"), None);
        assert!(dfa.show().contains("→ A"));
    }

    #[test]
    fn shared_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dfa>();

        let dfa = std::sync::Arc::new(flip_flop());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let dfa = std::sync::Arc::clone(&dfa);
                std::thread::spawn(move || dfa.run(["1", "0"]))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Verdict::Accepted);
        }
    }
}
