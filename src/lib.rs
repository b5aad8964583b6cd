//! Library for validating and running deterministic finite automata that are given in a
//! simple textual format, with support for longest-match lexeme extraction.
//!
//! An automaton is assembled from its raw parts (states, accepting states, alphabet, start
//! state and transition records) through a [`automaton::DfaBuilder`]. Building checks every
//! structural invariant, most importantly that the transition function is total, and either
//! yields a [`automaton::Dfa`] or the first [`error::StructuralError`] that was found. Once
//! built, an automaton is immutable and can be
//! - simulated on words with [`automaton::Dfa::run`], which yields a [`automaton::Verdict`],
//! - used for fallback extraction with [`automaton::Dfa::extract`], which splits a word into
//!   its longest accepted prefix (the lexeme) and the remainder.
//!
//! Both operations are built on the step-wise [`transition_system::Run`] of a word over the
//! [`transition_system::TransitionTable`].
//!
//! The [`format`] module reads many specifications from text and writes reports, and
//! [`batch`] ties everything together by evaluating every input of every specification,
//! isolating specifications whose automaton is malformed.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use lexdfa::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, SymbolIndex},
        automaton::{
            ActionMap, Dfa, DfaBuilder, ErrorRecord, Extraction, FallbackDfa, Lexeme,
            TransitionRecord, Verdict,
        },
        batch::{evaluate, run_batch, run_stream, Outcome, Report, SpecificationReport},
        error::{FormatError, StructuralError, StructuralErrorKind},
        format::{
            parse_specifications, Mode, Separators, Specification, SpecificationStream,
            WriteReport,
        },
        transition_system::{Run, StateIndex, StateNames, Step, TransitionTable},
        Show,
    };
}

/// Some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Module that contains definitions for dealing with alphabets.
pub mod alphabet;
pub use alphabet::Alphabet;

pub mod transition_system;

/// Defines deterministic automata, their construction and the fallback extractor.
pub mod automaton;

/// Errors that can occur while constructing automata or reading specifications.
pub mod error;

pub mod format;

pub mod batch;

/// Implements the generation of random specifications and words.
#[cfg(feature = "random")]
pub mod random;

/// Helper trait which can be used to display states, alphabets, automata and such.
pub trait Show {
    /// Returns a human readable representation of `self`. For a collection of states this
    /// should be `{q0, q1, ...}`, for an automaton a table of its transitions. This is mainly
    /// used for debugging purposes.
    fn show(&self) -> String;
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl Show for str {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        format!(
            "[{}]",
            itertools::Itertools::join(&mut self.iter().map(Show::show), ", ")
        )
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        self.as_slice().show()
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

#[cfg(test)]
mod tests {
    use crate::Show;

    #[test]
    fn show_collections() {
        assert_eq!(vec!["a", "b"].show(), "[a, b]");
        assert_eq!(Vec::<usize>::new().show(), "[]");
        assert_eq!(String::from("q0").show(), "q0");
    }
}
