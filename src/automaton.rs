mod builder;
pub use builder::{DfaBuilder, TransitionRecord};

mod dfa;
pub use dfa::{Dfa, Verdict};

/// Longest-match extraction of a single lexeme on top of a [`Dfa`].
pub mod fallback;
pub use fallback::{ActionMap, ErrorRecord, Extraction, FallbackDfa, Lexeme};
