use tracing::trace;

use crate::alphabet::{Alphabet, SymbolIndex};

use super::{StateIndex, TransitionTable};

/// A single step of a [`Run`]. Every step carries the `position` of the symbol of the input
/// that it concerns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The symbol at `position` was read and the run moved into `target`.
    Moved {
        /// Position of the symbol that was consumed.
        position: usize,
        /// Index of the consumed symbol.
        symbol: SymbolIndex,
        /// The state that was entered.
        target: StateIndex,
    },
    /// The symbol at `position` does not belong to the alphabet. The run halts.
    UnknownSymbol {
        /// Position of the offending symbol.
        position: usize,
        /// The offending symbol itself.
        symbol: String,
    },
    /// No transition exists for `state` on the symbol at `position`. The run halts. This
    /// can not happen for a transition table that is total.
    MissingTransition {
        /// Position of the symbol that could not be consumed.
        position: usize,
        /// The state in which the run was stuck.
        state: StateIndex,
        /// Index of the symbol that could not be consumed.
        symbol: SymbolIndex,
    },
}

impl Step {
    /// Returns true if the run can not continue after this step.
    pub fn is_halting(&self) -> bool {
        !matches!(self, Step::Moved { .. })
    }
}

/// Replays a word on a [`TransitionTable`] one symbol at a time. A run is an iterator
/// over [`Step`]s, it stops after the word is exhausted or after the first halting step.
///
/// ```
/// use lexdfa::prelude::*;
///
/// let alphabet = Alphabet::from_raw(["0", "1"]);
/// let mut table = TransitionTable::new(2, 2);
/// table.set(0, 0, 0);
/// table.set(0, 1, 1);
/// table.set(1, 0, 1);
/// table.set(1, 1, 0);
///
/// let mut run = Run::new(&alphabet, &table, 0, ["1", "0"]);
/// assert_eq!(run.by_ref().count(), 2);
/// assert_eq!(run.state(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Run<'a, I> {
    alphabet: &'a Alphabet,
    table: &'a TransitionTable,
    word: I,
    state: StateIndex,
    position: usize,
    halted: bool,
}

impl<'a, I> Run<'a, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// Starts a run of `word` from the state `initial`.
    pub fn new<W>(
        alphabet: &'a Alphabet,
        table: &'a TransitionTable,
        initial: StateIndex,
        word: W,
    ) -> Self
    where
        W: IntoIterator<IntoIter = I>,
    {
        Self {
            alphabet,
            table,
            word: word.into_iter(),
            state: initial,
            position: 0,
            halted: false,
        }
    }
}

impl<I> Run<'_, I> {
    /// The state the run currently resides in.
    pub fn state(&self) -> StateIndex {
        self.state
    }

    /// The number of symbols that have been consumed successfully so far.
    pub fn consumed(&self) -> usize {
        self.position
    }

    /// Returns true if the run stopped because of a halting [`Step`].
    pub fn halted(&self) -> bool {
        self.halted
    }
}

impl<I> Iterator for Run<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        let raw = self.word.next()?;
        let raw = raw.as_ref();
        let position = self.position;

        let Some(symbol) = self.alphabet.index_of(raw) else {
            trace!("symbol {raw:?} at position {position} is not in the alphabet");
            self.halted = true;
            return Some(Step::UnknownSymbol {
                position,
                symbol: raw.to_string(),
            });
        };

        match self.table.get(self.state, symbol) {
            Some(target) => {
                trace!("q{} --{raw}--> q{target}", self.state);
                self.state = target;
                self.position += 1;
                Some(Step::Moved {
                    position,
                    symbol,
                    target,
                })
            }
            None => {
                self.halted = true;
                Some(Step::MissingTransition {
                    position,
                    state: self.state,
                    symbol,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Run, Step};
    use crate::{alphabet::Alphabet, transition_system::TransitionTable};

    fn flip_flop() -> (Alphabet, TransitionTable) {
        let alphabet = Alphabet::from_raw(["0", "1"]);
        let mut table = TransitionTable::new(2, 2);
        table.set(0, 0, 0);
        table.set(0, 1, 1);
        table.set(1, 0, 1);
        table.set(1, 1, 0);
        (alphabet, table)
    }

    #[test]
    fn run_halts_on_unknown_symbol() {
        let (alphabet, table) = flip_flop();
        let mut run = Run::new(&alphabet, &table, 0, ["1", "2", "1"]);
        assert_eq!(
            run.next(),
            Some(Step::Moved {
                position: 0,
                symbol: 1,
                target: 1
            })
        );
        assert_eq!(
            run.next(),
            Some(Step::UnknownSymbol {
                position: 1,
                symbol: "2".to_string()
            })
        );
        assert_eq!(run.next(), None);
        assert!(run.halted());
        assert_eq!(run.consumed(), 1);
        assert_eq!(run.state(), 1);
    }

    #[test]
    fn run_halts_on_missing_transition() {
        let alphabet = Alphabet::from_raw(["a"]);
        let table = TransitionTable::new(1, 1);
        let steps: Vec<_> = Run::new(&alphabet, &table, 0, ["a", "a"]).collect();
        assert_eq!(
            steps,
            vec![Step::MissingTransition {
                position: 0,
                state: 0,
                symbol: 0
            }]
        );
        assert!(steps[0].is_halting());
    }

    #[test]
    fn empty_word_does_not_move() {
        let (alphabet, table) = flip_flop();
        let mut run = Run::new(&alphabet, &table, 1, Vec::<String>::new());
        assert_eq!(run.next(), None);
        assert_eq!(run.state(), 1);
        assert!(!run.halted());
    }
}
