use tracing::debug;

use crate::{alphabet::Alphabet, automaton::TransitionRecord, format::Specification};

/// Generates a random specification of a complete automaton with `states` states named
/// `q0, q1, ...` over the alphabet `a, b, ...` of size `symbols`. For every state and symbol a
/// target is drawn uniformly, each state is accepting with probability `accepting`. The
/// accepting states are labeled with the actions `T0, T1, ...` and `q0` is the start state.
/// The specification has no inputs.
pub fn generate_random_specification(
    states: usize,
    symbols: usize,
    accepting: f64,
) -> Specification {
    assert!(states > 0, "at least one state is needed");
    assert!(symbols <= 26, "alphabet is too large");

    let state_names: Vec<String> = (0..states).map(|i| format!("q{i}")).collect();
    let alphabet: Vec<String> = (0..symbols)
        .map(|i| ((b'a' + i as u8) as char).to_string())
        .collect();

    let accepting: Vec<String> = state_names
        .iter()
        .filter(|_| fastrand::f64() < accepting)
        .cloned()
        .collect();
    let actions = (0..accepting.len()).map(|i| format!("T{i}")).collect();

    let mut transitions = Vec::with_capacity(states * symbols);
    for source in &state_names {
        for symbol in &alphabet {
            let target = &state_names[fastrand::usize(..states)];
            transitions.push(TransitionRecord::from((source, target, symbol)));
        }
    }
    debug!(
        "generated random specification with {states} states, {symbols} symbols and {} accepting states",
        accepting.len()
    );

    Specification {
        initial: state_names[0].clone(),
        states: state_names,
        accepting,
        actions: Some(actions),
        alphabet,
        transitions,
        inputs: vec![],
    }
}

/// Generate a random word over the universe of the `alphabet`.
/// The length of the word is drawn uniformly from the range `min_len..=max_len`.
pub fn generate_random_word(alphabet: &Alphabet, min_len: usize, max_len: usize) -> Vec<String> {
    let symbols: Vec<&str> = alphabet.universe().collect();
    if symbols.is_empty() {
        return vec![];
    }
    let length = fastrand::usize(min_len..=max_len);
    (0..length)
        .map(|_| symbols[fastrand::usize(..symbols.len())].to_string())
        .collect()
}

/// Generate `number` random words over the universe of the `alphabet`.
/// The length for each sampled word is drawn uniformly from the range `min_len..=max_len`.
pub fn generate_random_words(
    alphabet: &Alphabet,
    min_len: usize,
    max_len: usize,
    number: usize,
) -> Vec<Vec<String>> {
    (0..number)
        .map(|_| generate_random_word(alphabet, min_len, max_len))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{generate_random_specification, generate_random_words};
    use crate::prelude::*;

    #[test]
    fn random_specifications_are_complete() {
        for _ in 0..20 {
            let spec = generate_random_specification(fastrand::usize(1..8), 3, 0.5);
            let dfa = spec.builder().build().unwrap();
            assert_eq!(dfa.size(), spec.states.len());
            assert!(dfa.table().is_total());
        }
    }

    #[test_log::test]
    fn dropping_any_transition_breaks_totality() {
        for _ in 0..20 {
            let mut spec = generate_random_specification(fastrand::usize(1..6), 2, 0.5);
            let dropped = spec.transitions.remove(fastrand::usize(..spec.transitions.len()));
            let (state, _, symbol) = dropped.triple().unwrap();
            assert_eq!(
                spec.builder().build().unwrap_err(),
                StructuralError::MissingTransition {
                    state: state.to_string(),
                    symbol: symbol.to_string()
                }
            );
        }
    }

    #[test]
    fn validation_is_idempotent() {
        let spec = generate_random_specification(6, 3, 0.4);
        let builder = spec.builder();
        let (first, second) = (builder.build().unwrap(), builder.build().unwrap());
        assert_eq!(first, second);
        for word in generate_random_words(first.alphabet(), 0, 12, 50) {
            assert_eq!(first.run(&word), second.run(&word));
            assert_eq!(
                first.extract(&word, &spec.action_map()),
                second.extract(&word, &spec.action_map())
            );
        }
    }

    #[test]
    fn extraction_partitions_the_input() {
        for _ in 0..10 {
            let spec = generate_random_specification(5, 2, 0.3);
            let fallback = FallbackDfa::new(spec.builder().build().unwrap(), spec.action_map());
            for word in generate_random_words(fallback.dfa().alphabet(), 0, 10, 30) {
                let extraction = fallback.extract(&word);
                let longest = (1..=word.len())
                    .rev()
                    .find(|&n| fallback.dfa().accepts(&word[..n]))
                    .unwrap_or(0);
                assert_eq!(extraction.consumed(), longest);

                let mut rejoined = extraction
                    .lexeme
                    .map(|l| l.matched)
                    .unwrap_or_default();
                rejoined.extend(
                    extraction
                        .error
                        .map(|ErrorRecord { matched }| matched)
                        .unwrap_or_default(),
                );
                assert_eq!(rejoined, word);
            }
        }
    }
}
