//! Applies validation and simulation (or fallback extraction) to many specifications at once.
//!
//! Every declared input of a specification yields exactly one [`Outcome`]. If the automaton
//! of a specification can not be constructed, the failure is recorded once and every input
//! of that specification is answered with [`Outcome::Ignored`]. One bad specification never
//! aborts the batch.

use std::io::BufRead;

use tracing::{debug, info, warn};

use crate::{
    automaton::{Extraction, FallbackDfa, Verdict},
    error::{FormatError, StructuralError},
    format::{Mode, Separators, Specification, SpecificationStream},
};

/// The result for a single input of a specification.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The verdict of simulating the input.
    Verdict(Verdict),
    /// The lexeme and/or error record extracted from the input.
    Extraction(Extraction),
    /// The input was not processed as the automaton could not be constructed.
    Ignored,
}

impl Outcome {
    /// Returns true if `self` is [`Outcome::Ignored`].
    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored)
    }
}

/// The results for all inputs of one specification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecificationReport {
    /// How the inputs were processed.
    pub mode: Mode,
    /// Either `Ok` if the automaton could be built or the structural error that prevented it.
    pub construction: Result<(), StructuralError>,
    /// One outcome per declared input, in the order of the inputs.
    pub outcomes: Vec<Outcome>,
}

impl SpecificationReport {
    /// Returns true if the automaton of the specification was constructed.
    pub fn constructed(&self) -> bool {
        self.construction.is_ok()
    }
}

/// Validates the automaton of `spec` and processes every input with it according to `mode`.
pub fn evaluate(spec: &Specification, mode: Mode) -> SpecificationReport {
    let built = spec
        .builder()
        .build()
        .map(|dfa| FallbackDfa::new(dfa, spec.action_map()));

    match built {
        Ok(fallback) => {
            debug!(
                "constructed automaton with {} states, processing {} inputs",
                fallback.dfa().size(),
                spec.input_count()
            );
            let outcomes = spec
                .inputs
                .iter()
                .map(|input| match mode {
                    Mode::Simulate => Outcome::Verdict(fallback.dfa().run(input)),
                    Mode::Fallback => Outcome::Extraction(fallback.extract(input)),
                })
                .collect();
            SpecificationReport {
                mode,
                construction: Ok(()),
                outcomes,
            }
        }
        Err(e) => {
            warn!(
                "could not construct automaton, ignoring {} inputs: {e}",
                spec.input_count()
            );
            SpecificationReport {
                mode,
                construction: Err(e),
                outcomes: vec![Outcome::Ignored; spec.input_count()],
            }
        }
    }
}

/// The results of a whole batch, one section per specification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// The sections in the order in which the specifications were given.
    pub sections: Vec<SpecificationReport>,
}

impl Report {
    /// Returns the number of specifications whose automaton could not be constructed.
    pub fn failures(&self) -> usize {
        self.sections.iter().filter(|s| !s.constructed()).count()
    }
}

/// Evaluates every specification of `specs`.
pub fn run_batch<'a, I>(specs: I, mode: Mode) -> Report
where
    I: IntoIterator<Item = &'a Specification>,
{
    let report = Report {
        sections: specs.into_iter().map(|spec| evaluate(spec, mode)).collect(),
    };
    info!(
        "processed {} specifications, {} of which could not be constructed",
        report.sections.len(),
        report.failures()
    );
    report
}

/// Reads specifications from `read` and evaluates them one after another.
pub fn run_stream<R: BufRead>(
    read: R,
    mode: Mode,
    separators: Separators,
) -> Result<Report, FormatError> {
    let mut sections = Vec::new();
    for spec in SpecificationStream::new(read, mode, separators) {
        sections.push(evaluate(&spec?, mode));
    }
    let report = Report { sections };
    info!(
        "processed {} specifications, {} of which could not be constructed",
        report.sections.len(),
        report.failures()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::{evaluate, run_batch, run_stream, Outcome};
    use crate::{
        automaton::{TransitionRecord, Verdict},
        error::StructuralErrorKind,
        format::{Mode, Separators, Specification},
    };

    fn flip_flop() -> Specification {
        Specification {
            states: vec!["A".into(), "B".into()],
            accepting: vec!["B".into()],
            actions: Some(vec!["TOK".into()]),
            alphabet: vec!["0".into(), "1".into()],
            initial: "A".into(),
            transitions: [("A", "A", "0"), ("A", "B", "1"), ("B", "B", "0"), ("B", "A", "1")]
                .into_iter()
                .map(TransitionRecord::from)
                .collect(),
            inputs: vec![
                vec!["1".into()],
                vec!["1".into(), "1".into()],
                vec!["0".into()],
                vec!["1".into(), "2".into()],
            ],
        }
    }

    #[test]
    fn every_input_gets_a_verdict() {
        let report = evaluate(&flip_flop(), Mode::Simulate);
        assert!(report.constructed());
        assert_eq!(
            report.outcomes,
            vec![
                Outcome::Verdict(Verdict::Accepted),
                Outcome::Verdict(Verdict::Rejected),
                Outcome::Verdict(Verdict::Rejected),
                Outcome::Verdict(Verdict::InvalidInput("2".into())),
            ]
        );
    }

    #[test_log::test]
    fn malformed_transition_ignores_all_inputs() {
        let mut spec = flip_flop();
        spec.transitions
            .push(TransitionRecord::parse("A,B", ","));
        for mode in [Mode::Simulate, Mode::Fallback] {
            let report = evaluate(&spec, mode);
            assert_eq!(
                report.construction.as_ref().unwrap_err().kind(),
                StructuralErrorKind::MalformedTransition
            );
            assert_eq!(report.outcomes.len(), spec.input_count());
            assert!(report.outcomes.iter().all(Outcome::is_ignored));
        }
    }

    #[test]
    fn bad_specification_does_not_abort_batch() {
        let mut broken = flip_flop();
        broken.initial = "C".into();
        broken.inputs.truncate(2);
        let specs = vec![flip_flop(), broken, flip_flop()];
        let report = run_batch(&specs, Mode::Fallback);
        assert_eq!(report.sections.len(), 3);
        assert_eq!(report.failures(), 1);
        assert_eq!(report.sections[1].outcomes, vec![Outcome::Ignored; 2]);
        assert!(report.sections[2].constructed());
        let cardinalities: Vec<_> = report.sections.iter().map(|s| s.outcomes.len()).collect();
        assert_eq!(cardinalities, vec![4, 2, 4]);
    }

    #[test]
    fn stream_evaluation() {
        let text = "A,B\nB\n0,1\nA\nA,A,0#A,B,1#B,B,0\n1#0\n\nA,B\nB\n0,1\nA\nA,A,0#A,B,1#B,B,0#B,A,1\n1#0#1,1\n";
        let report = run_stream(text.as_bytes(), Mode::Simulate, Separators::default()).unwrap();
        assert_eq!(report.sections.len(), 2);
        assert_eq!(
            report.sections[0].construction.as_ref().unwrap_err().kind(),
            StructuralErrorKind::MissingTransition
        );
        assert_eq!(report.sections[0].outcomes, vec![Outcome::Ignored; 2]);
        assert_eq!(report.sections[1].outcomes.len(), 3);
    }
}
