//! The transition function of a deterministic automaton together with the machinery to
//! replay a word on it.
//!
//! States and symbols are interned into dense indices (see [`StateNames`] and
//! [`crate::alphabet::Alphabet`]), which means the [`TransitionTable`] can store the
//! successor of every state/symbol pair in a flat vector. A [`Run`] walks such a table
//! symbol by symbol and reports every step it takes, it is the shared core of simulation
//! and fallback extraction.

mod state_index;
pub use state_index::{StateIndex, StateNames};

mod table;
pub use table::TransitionTable;

/// Contains the step-wise replay of a word on a transition table.
pub mod run;
pub use run::{Run, Step};
