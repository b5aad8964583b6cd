//! Extraction of a single lexeme with the longest-match ("maximal munch") rule.
//!
//! Given a [`Dfa`] whose accepting states are labeled with actions, the extractor reads the
//! input once from left to right and remembers the last position at which an accepting state
//! was entered. The prefix up to that position forms a [`Lexeme`], whatever follows it is
//! returned as an [`ErrorRecord`]. Exactly one call produces at most one lexeme, the remainder
//! is never scanned again.

use itertools::Itertools;
use tracing::{error, trace, warn};

use crate::{
    error::StructuralError,
    format::output::ERROR_ACTION,
    math::{non_blank, Map},
    transition_system::{StateIndex, Step},
};

use super::{Dfa, DfaBuilder};

/// Associates accepting states with action labels. The map is built by positional
/// correspondence with the declared accepting states and is not checked against the states
/// of any automaton.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionMap(Map<String, String>);

impl ActionMap {
    /// Pairs the i-th accepting state with the i-th action. Pairs whose state is blank are
    /// skipped, surplus entries on either side are ignored.
    ///
    /// ```
    /// use lexdfa::prelude::*;
    ///
    /// let actions = ActionMap::zip(["B", "C"], ["NUM", "ID", "KW"]);
    /// assert_eq!(actions.action("C"), Some("ID"));
    /// assert_eq!(actions.len(), 2);
    /// ```
    pub fn zip<I, J, S, T>(accepting: I, actions: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self(
            accepting
                .into_iter()
                .zip(actions)
                .filter_map(|(state, action)| {
                    non_blank(state.as_ref())
                        .map(|state| (state.to_string(), action.as_ref().trim().to_string()))
                })
                .collect(),
        )
    }

    /// Returns the action that is associated with the state named `state`.
    pub fn action(&self, state: &str) -> Option<&str> {
        self.0.get(state).map(String::as_str)
    }

    /// Returns the number of labeled states.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no state is labeled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for ActionMap {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(state, action)| (state.into(), action.into()))
                .collect(),
        )
    }
}

/// The longest prefix of an input that leads into an accepting state, together with the
/// action of that state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Lexeme {
    /// The action of the accepting state in which the prefix ends. `None` if that state
    /// has no action associated with it.
    pub action: Option<String>,
    /// The symbols of the prefix.
    pub matched: Vec<String>,
}

/// The part of an input that was not consumed by a [`Lexeme`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ErrorRecord {
    /// The unconsumed symbols.
    pub matched: Vec<String>,
}

/// The result of one fallback extraction: at most one lexeme followed by at most one error
/// segment. Concatenating both gives back the complete input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Extraction {
    /// The recognized lexeme, if some prefix reached an accepting state.
    pub lexeme: Option<Lexeme>,
    /// The remainder after the lexeme, if it is not empty.
    pub error: Option<ErrorRecord>,
}

impl Extraction {
    /// Gives the number of symbols that were consumed by the lexeme.
    pub fn consumed(&self) -> usize {
        self.lexeme.as_ref().map_or(0, |l| l.matched.len())
    }
}

fn render(action: &str, symbols: &[String], separator: &str) -> String {
    format!("<{action},\"{}\">", symbols.iter().join(separator))
}

impl Lexeme {
    /// Renders the lexeme as `<action,"s1,s2,...">`, joining the symbols with `separator`.
    pub fn render(&self, separator: &str) -> String {
        render(
            self.action.as_deref().unwrap_or_default(),
            &self.matched,
            separator,
        )
    }
}

impl ErrorRecord {
    /// Renders the record as `<Error,"s1,s2,...">`, joining the symbols with `separator`.
    pub fn render(&self, separator: &str) -> String {
        render(ERROR_ACTION, &self.matched, separator)
    }
}

impl Extraction {
    /// Renders the lexeme followed by the error record, joining symbols with `separator`.
    pub fn render(&self, separator: &str) -> String {
        self.lexeme
            .iter()
            .map(|l| l.render(separator))
            .chain(self.error.iter().map(|e| e.render(separator)))
            .collect()
    }
}

impl std::fmt::Display for Extraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(","))
    }
}

impl Dfa {
    /// Extracts the longest prefix of `word` that leads into an accepting state.
    ///
    /// The word is read once from the left. Each time an accepting state is entered, the
    /// position is remembered, overwriting earlier ones. Reading stops at the end of the word
    /// or at the first symbol outside the alphabet. If some position was remembered, the prefix
    /// up to and including it becomes the [`Lexeme`] (labeled with the action that `actions`
    /// associates with the accepting state) and all remaining symbols, including an offending
    /// symbol and everything after it, become the [`ErrorRecord`]. Otherwise the whole word is
    /// the error record. The empty prefix is never a lexeme.
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
    /// let actions = ActionMap::zip(["B"], ["TOK"]);
    /// let extraction = dfa.extract(["1", "0", "1", "1"], &actions);
    /// assert_eq!(extraction.to_string(), r#"<TOK,"1,0,1,1">"#);
    /// let extraction = dfa.extract(["1", "1", "0"], &actions);
    /// assert_eq!(extraction.to_string(), r#"<TOK,"1"><Error,"1,0">"#);
    /// ```
    pub fn extract<W>(&self, word: W, actions: &ActionMap) -> Extraction
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        let symbols: Vec<String> = word
            .into_iter()
            .map(|sym| sym.as_ref().to_string())
            .collect();

        let mut best: Option<(StateIndex, usize)> = None;
        for step in self.run_from_initial(&symbols) {
            match step {
                Step::Moved {
                    position, target, ..
                } => {
                    if self.is_accepting(target) {
                        best = Some((target, position));
                    }
                }
                Step::UnknownSymbol { position, symbol } => {
                    trace!("stopping extraction at invalid symbol {symbol} at position {position}");
                }
                Step::MissingTransition {
                    position, state, ..
                } => {
                    error!(
                        "missing transition from state {} at position {position}, aborting extraction",
                        self.state_name(state).unwrap_or_default()
                    );
                }
            }
        }

        let Some((state, position)) = best else {
            return Extraction {
                lexeme: None,
                error: (!symbols.is_empty()).then_some(ErrorRecord { matched: symbols }),
            };
        };

        let mut matched = symbols;
        let remainder = matched.split_off(position + 1);
        let name = self.state_name(state).unwrap_or_default();
        let action = actions.action(name).map(str::to_string);
        if action.is_none() {
            warn!("accepting state {name} has no associated action");
        }

        Extraction {
            lexeme: Some(Lexeme { action, matched }),
            error: (!remainder.is_empty()).then_some(ErrorRecord { matched: remainder }),
        }
    }

    /// Performs [`Dfa::extract`] for every word of `words`, preserving the order.
    pub fn extract_all<I, W>(&self, words: I, actions: &ActionMap) -> Vec<Extraction>
    where
        I: IntoIterator<Item = W>,
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        words
            .into_iter()
            .map(|word| self.extract(word, actions))
            .collect()
    }
}

/// A [`Dfa`] together with the [`ActionMap`] that labels its accepting states, which is what
/// fallback extraction operates on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackDfa {
    dfa: Dfa,
    actions: ActionMap,
}

impl FallbackDfa {
    /// Combines an automaton with its action map.
    pub fn new(dfa: Dfa, actions: ActionMap) -> Self {
        Self { dfa, actions }
    }

    /// Builds the automaton from `builder` and pairs the given accepting states with the given
    /// actions positionally.
    pub fn build<I, J, S, T>(
        builder: &DfaBuilder,
        accepting: I,
        actions: J,
    ) -> Result<Self, StructuralError>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Ok(Self::new(builder.build()?, ActionMap::zip(accepting, actions)))
    }

    /// Returns a reference to the underlying automaton.
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Returns a reference to the action map.
    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    /// Extracts the longest accepted prefix of `word`, see [`Dfa::extract`].
    pub fn extract<W>(&self, word: W) -> Extraction
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        self.dfa.extract(word, &self.actions)
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionMap, ErrorRecord, Extraction, FallbackDfa, Lexeme};
    use crate::prelude::*;

    fn flip_flop() -> FallbackDfa {
        let builder = Dfa::builder()
            .with_states(["A", "B"])
            .with_accepting_states(["B"])
            .with_alphabet(["0", "1"])
            .with_initial("A")
            .with_transitions([("A", "A", "0"), ("A", "B", "1"), ("B", "B", "0"), ("B", "A", "1")]);
        FallbackDfa::build(&builder, ["B"], ["TOK"]).unwrap()
    }

    fn strings(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    /// Recomputes the longest accepted prefix by checking every prefix on its own.
    fn longest_accepted_prefix(dfa: &Dfa, word: &[&str]) -> Option<usize> {
        (1..=word.len()).rev().find(|&n| dfa.accepts(&word[..n]))
    }

    #[test_log::test]
    fn maximal_munch() {
        let fb = flip_flop();
        let word = ["1", "0", "1", "1"];
        // A -1-> B -0-> B -1-> A -1-> B
        let longest = longest_accepted_prefix(fb.dfa(), &word).unwrap();
        assert_eq!(longest, 4);
        let extraction = fb.extract(word);
        assert_eq!(
            extraction,
            Extraction {
                lexeme: Some(Lexeme {
                    action: Some("TOK".into()),
                    matched: strings(&word[..longest]),
                }),
                error: None,
            }
        );
    }

    #[test]
    fn remainder_is_exactly_the_unconsumed_tail() {
        let fb = flip_flop();
        for word in [
            vec!["1", "1", "0"],
            vec!["0", "1", "1", "0", "0"],
            vec!["1", "0", "0", "1"],
            vec!["0", "0", "1"],
        ] {
            let extraction = fb.extract(&word);
            let longest = longest_accepted_prefix(fb.dfa(), &word).unwrap();
            let lexeme = extraction.lexeme.clone().unwrap();
            assert_eq!(lexeme.matched, strings(&word[..longest]));
            let tail = extraction
                .error
                .clone()
                .map(|e| e.matched)
                .unwrap_or_default();
            assert_eq!(tail, strings(&word[longest..]));
            assert_eq!(extraction.consumed() + tail.len(), word.len());
        }
    }

    #[test]
    fn no_accepting_state_reached() {
        let fb = flip_flop();
        let extraction = fb.extract(["0", "0"]);
        assert_eq!(extraction.lexeme, None);
        assert_eq!(
            extraction.error,
            Some(ErrorRecord {
                matched: strings(&["0", "0"])
            })
        );
        assert_eq!(extraction.to_string(), r#"<Error,"0,0">"#);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let extraction = flip_flop().extract(Vec::<String>::new());
        assert_eq!(extraction, Extraction::default());
        assert_eq!(extraction.to_string(), "");
    }

    #[test]
    fn invalid_symbol_truncates_scan() {
        let fb = flip_flop();
        let extraction = fb.extract(["1", "0", "x", "1"]);
        assert_eq!(
            extraction.lexeme.unwrap().matched,
            strings(&["1", "0"])
        );
        assert_eq!(
            extraction.error.unwrap().matched,
            strings(&["x", "1"])
        );

        let extraction = fb.extract(["x", "1"]);
        assert_eq!(extraction.lexeme, None);
        assert_eq!(extraction.error.unwrap().matched, strings(&["x", "1"]));
    }

    #[test]
    fn missing_action_renders_empty_label() {
        let fb = FallbackDfa::new(flip_flop().dfa().clone(), ActionMap::default());
        let extraction = fb.extract(["1"]);
        assert_eq!(extraction.lexeme.as_ref().unwrap().action, None);
        assert_eq!(extraction.render(";"), r#"<,"1">"#);
    }

    #[test]
    fn rendering_uses_separator() {
        let extraction = flip_flop().extract(["1", "1", "0"]);
        assert_eq!(extraction.render("|"), r#"<TOK,"1"><Error,"1|0">"#);
    }

    #[test]
    fn action_map_is_positional() {
        let actions = ActionMap::zip(["B", "", "D"], ["X", "Y", "Z"]);
        assert_eq!(actions.action("B"), Some("X"));
        assert_eq!(actions.action("D"), Some("Z"));
        assert_eq!(actions.len(), 2);
        let actions: ActionMap = [("q", "ID")].into_iter().collect();
        assert_eq!(actions.action("q"), Some("ID"));
    }
}
