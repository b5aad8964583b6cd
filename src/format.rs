//! The line oriented textual format in which automata and their inputs are specified, and
//! the report format in which results are written.
//!
//! A specification consists of one line per field. In [`Mode::Simulate`] these are, in order,
//! the states, the accepting states, the alphabet, the start state, the transitions and the
//! inputs. [`Mode::Fallback`] additionally has a line with one action per accepting state,
//! which is placed directly after the accepting states. Specifications are separated by a
//! single blank line.
//!
//! Within a line, entries are separated by the normal separator. The transitions and the
//! inputs are first split into records along the secondary separator, then every record is
//! split along the normal separator. With the default [`Separators`], a specification looks
//! as follows.
//! ```text
//! A,B
//! B
//! 0,1
//! A
//! A,A,0#A,B,1#B,B,0#B,A,1
//! 1#1,1#0
//! ```

use crate::{
    automaton::{ActionMap, DfaBuilder, TransitionRecord},
    math::non_blank,
};

/// Reading specifications from text.
pub mod input;
pub use input::{parse_specifications, SpecificationStream};

/// Writing reports.
pub mod output;
pub use output::WriteReport;

/// The tokens that split lines into entries and records.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Separators {
    /// Separates the entries within a line and the fields within a record.
    pub normal: String,
    /// Separates the records of the transitions and inputs lines.
    pub secondary: String,
}

impl Separators {
    /// Creates separators from the given tokens.
    pub fn new(normal: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            normal: normal.into(),
            secondary: secondary.into(),
        }
    }

    /// Splits a line into its entries along the normal separator.
    pub fn entries(&self, line: &str) -> Vec<String> {
        line.split(self.normal.as_str())
            .map(|entry| entry.trim().to_string())
            .collect()
    }

    /// Splits a line into its non-blank records along the secondary separator.
    pub fn records<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        line.split(self.secondary.as_str()).filter_map(non_blank)
    }
}

impl Default for Separators {
    fn default() -> Self {
        Self::new(",", "#")
    }
}

/// Determines how the automata of a batch are used, and thereby also the layout of a
/// specification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Every input is simulated and yields a verdict.
    #[default]
    Simulate,
    /// Every input yields a lexeme and/or an error record through fallback extraction.
    Fallback,
}

impl Mode {
    /// Returns the number of lines a specification consists of.
    pub fn fields(&self) -> usize {
        match self {
            Mode::Simulate => 6,
            Mode::Fallback => 7,
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simulate" | "dfa" => Ok(Mode::Simulate),
            "fallback" | "fbdfa" => Ok(Mode::Fallback),
            other => Err(format!("unknown mode `{other}`")),
        }
    }
}

/// The raw parts of one automaton together with the inputs that should be processed by it.
/// Nothing is validated yet, see [`Specification::builder`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Specification {
    /// Raw state entries.
    pub states: Vec<String>,
    /// Raw accepting state entries.
    pub accepting: Vec<String>,
    /// Raw action entries, only present for fallback specifications.
    pub actions: Option<Vec<String>>,
    /// Raw alphabet entries.
    pub alphabet: Vec<String>,
    /// The raw start state.
    pub initial: String,
    /// The transition records.
    pub transitions: Vec<TransitionRecord>,
    /// The inputs, each one a sequence of symbols.
    pub inputs: Vec<Vec<String>>,
}

impl Specification {
    /// Parses a specification from its lines, which must be given in the order that `mode`
    /// prescribes. Missing lines are treated as empty.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], mode: Mode, separators: &Separators) -> Self {
        let mut lines = lines.iter().map(|l| l.as_ref());
        let mut next = move || lines.next().unwrap_or_default();

        let states = separators.entries(next());
        let accepting = separators.entries(next());
        let actions = match mode {
            Mode::Simulate => None,
            Mode::Fallback => Some(separators.entries(next())),
        };
        let alphabet = separators.entries(next());
        let initial = next().trim().to_string();
        let transitions = separators
            .records(next())
            .map(|record| TransitionRecord::parse(record, &separators.normal))
            .collect();
        let inputs = separators
            .records(next())
            .map(|record| {
                separators
                    .entries(record)
                    .into_iter()
                    .filter(|symbol| !symbol.is_empty())
                    .collect()
            })
            .collect();

        Self {
            states,
            accepting,
            actions,
            alphabet,
            initial,
            transitions,
            inputs,
        }
    }

    /// Creates a [`DfaBuilder`] that holds the automaton parts of `self`.
    pub fn builder(&self) -> DfaBuilder {
        DfaBuilder::new()
            .with_states(&self.states)
            .with_accepting_states(&self.accepting)
            .with_alphabet(&self.alphabet)
            .with_initial(&self.initial)
            .with_transitions(self.transitions.iter().cloned())
    }

    /// Pairs the accepting states with the actions. Empty if there are no actions.
    pub fn action_map(&self) -> ActionMap {
        match &self.actions {
            Some(actions) => ActionMap::zip(&self.accepting, actions),
            None => ActionMap::default(),
        }
    }

    /// The number of declared inputs.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }
}
