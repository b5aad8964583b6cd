use thiserror::Error;

/// Discriminates the structural invariant that an automaton specification violates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StructuralErrorKind {
    /// The set of states is empty.
    EmptyStates,
    /// An accepting state is not a state.
    InvalidAcceptState,
    /// The start state is not a state.
    InvalidStartState,
    /// A transition record does not consist of exactly three fields.
    MalformedTransition,
    /// A transition mentions a state that does not exist.
    UnknownTransitionState,
    /// A transition is labeled with a symbol outside of the alphabet.
    UnknownTransitionSymbol,
    /// Some state lacks a transition for some symbol.
    MissingTransition,
}

/// The reason why an automaton could not be constructed. The [`std::fmt::Display`]
/// output is the failure line that is written into batch reports.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// No (non-blank) state was declared.
    #[error("Invalid states empty states set")]
    EmptyStates,
    /// The contained accepting state is not a declared state.
    #[error("Invalid accept state {0}")]
    InvalidAcceptState(String),
    /// The contained start state is not a declared state. The failure line does not name it.
    #[error("Invalid start state")]
    InvalidStartState(String),
    /// The contained transition record does not have exactly three fields.
    #[error("Incomplete Transition {0}")]
    MalformedTransition(String),
    /// A transition refers to a state that was not declared.
    #[error("Invalid transition {transition} state {state} does not exist")]
    UnknownTransitionState {
        /// The offending transition record.
        transition: String,
        /// The undeclared state.
        state: String,
    },
    /// A transition is labeled with a symbol that is not in the alphabet.
    #[error("Invalid transition {transition} input {symbol} is not in the alphabet")]
    UnknownTransitionSymbol {
        /// The offending transition record.
        transition: String,
        /// The undeclared symbol.
        symbol: String,
    },
    /// The first state (in state order) that lacks a transition.
    #[error("Missing transition for state {state}")]
    MissingTransition {
        /// The incomplete state.
        state: String,
        /// The first symbol (in alphabet order) for which the state has no transition.
        symbol: String,
    },
}

impl StructuralError {
    /// Returns the kind of invariant that is violated.
    pub fn kind(&self) -> StructuralErrorKind {
        match self {
            StructuralError::EmptyStates => StructuralErrorKind::EmptyStates,
            StructuralError::InvalidAcceptState(_) => StructuralErrorKind::InvalidAcceptState,
            StructuralError::InvalidStartState(_) => StructuralErrorKind::InvalidStartState,
            StructuralError::MalformedTransition(_) => StructuralErrorKind::MalformedTransition,
            StructuralError::UnknownTransitionState { .. } => {
                StructuralErrorKind::UnknownTransitionState
            }
            StructuralError::UnknownTransitionSymbol { .. } => {
                StructuralErrorKind::UnknownTransitionSymbol
            }
            StructuralError::MissingTransition { .. } => StructuralErrorKind::MissingTransition,
        }
    }
}

/// Errors that occur while reading specifications in the textual format.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Reading from the underlying source failed.
    #[error("could not read specification: {0}")]
    Io(#[from] std::io::Error),
    /// The input ended in the middle of a specification block.
    #[error("specification starting at line {line} is truncated, expected {expected} lines but found {found}")]
    Truncated {
        /// Line number (starting at 1) of the first line of the block.
        line: usize,
        /// Number of lines a block consists of.
        expected: usize,
        /// Number of lines that were actually present.
        found: usize,
    },
}
