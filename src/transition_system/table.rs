use crate::alphabet::SymbolIndex;

use super::StateIndex;

/// Stores the successor for every pair of state and symbol. The table is laid out row by row,
/// one row per state with one entry per symbol. An entry is `None` as long as no transition
/// has been recorded for the corresponding pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTable {
    states: usize,
    symbols: usize,
    entries: Vec<Option<StateIndex>>,
}

impl TransitionTable {
    /// Creates an empty table for `states` states over an alphabet of `symbols` symbols.
    pub fn new(states: usize, symbols: usize) -> Self {
        Self {
            states,
            symbols,
            entries: vec![None; states * symbols],
        }
    }

    /// Returns the number of states (rows) of the table.
    pub fn states(&self) -> usize {
        self.states
    }

    /// Returns the number of symbols (columns) of the table.
    pub fn symbols(&self) -> usize {
        self.symbols
    }

    fn position(&self, state: StateIndex, symbol: SymbolIndex) -> Option<usize> {
        if state >= self.states || symbol >= self.symbols {
            return None;
        }
        Some(state * self.symbols + symbol)
    }

    /// Records the transition `source --symbol--> target`. A previously recorded target for
    /// the same pair is overwritten and returned. Returns `None` also if the pair lies outside
    /// of the table, in which case nothing is recorded.
    pub fn set(
        &mut self,
        source: StateIndex,
        symbol: SymbolIndex,
        target: StateIndex,
    ) -> Option<StateIndex> {
        let pos = self.position(source, symbol)?;
        self.entries[pos].replace(target)
    }

    /// Returns the successor of `state` on `symbol`, if one has been recorded.
    pub fn get(&self, state: StateIndex, symbol: SymbolIndex) -> Option<StateIndex> {
        self.position(state, symbol).and_then(|pos| self.entries[pos])
    }

    /// Returns the row of `state`, i.e. the successors on every symbol in alphabet order.
    pub fn row(&self, state: StateIndex) -> Option<&[Option<StateIndex>]> {
        if state >= self.states {
            return None;
        }
        let start = state * self.symbols;
        self.entries.get(start..start + self.symbols)
    }

    /// Finds the first pair of state and symbol (in state order, then symbol order) that lacks
    /// a transition.
    pub fn first_missing(&self) -> Option<(StateIndex, SymbolIndex)> {
        self.entries
            .iter()
            .position(Option::is_none)
            .map(|pos| (pos / self.symbols, pos % self.symbols))
    }

    /// Returns true if every state has a successor on every symbol.
    pub fn is_total(&self) -> bool {
        self.first_missing().is_none()
    }
}
