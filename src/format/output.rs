use std::fmt::{Result, Write};

use tracing::trace;

use crate::batch::{Outcome, Report, SpecificationReport};

use super::{Mode, Separators};

/// Written for an input that is accepted.
pub const ACCEPTED: &str = "Accepted";
/// Written for an input that is rejected.
pub const REJECTED: &str = "Rejected";
/// Written for every input of a specification whose automaton could not be constructed.
pub const IGNORED: &str = "Ignored";
/// Precedes the offending symbol of an input that leaves the alphabet.
pub const INVALID_INPUT: &str = "Invalid input string at";
/// Written when the automaton of a specification was constructed in [`Mode::Simulate`].
pub const DFA_CONSTRUCTED: &str = "DFA constructed";
/// Written when the automaton of a specification was constructed in [`Mode::Fallback`].
pub const FBDFA_CONSTRUCTED: &str = "FBDFA constructed";
/// The action label of an error record.
pub const ERROR_ACTION: &str = "Error";

/// Renders results in the report format. Every specification occupies one section: the
/// construction marker (or the structural failure message), one line per input and a
/// terminating blank line.
pub trait WriteReport {
    /// Writes `self` to `w`, joining the symbols of lexemes with the normal separator.
    fn write_report<W: Write>(&self, w: &mut W, separators: &Separators) -> Result;

    /// Renders `self` into a new string.
    fn to_report(&self, separators: &Separators) -> String {
        let mut out = String::new();
        self.write_report(&mut out, separators)
            .expect("writing into a string does not fail");
        out
    }
}

impl WriteReport for Outcome {
    fn write_report<W: Write>(&self, w: &mut W, separators: &Separators) -> Result {
        match self {
            Outcome::Verdict(verdict) => write!(w, "{verdict}"),
            Outcome::Extraction(extraction) => w.write_str(&extraction.render(&separators.normal)),
            Outcome::Ignored => w.write_str(IGNORED),
        }
    }
}

impl WriteReport for SpecificationReport {
    fn write_report<W: Write>(&self, w: &mut W, separators: &Separators) -> Result {
        match &self.construction {
            Ok(()) => w.write_str(match self.mode {
                Mode::Simulate => DFA_CONSTRUCTED,
                Mode::Fallback => FBDFA_CONSTRUCTED,
            })?,
            Err(e) => write!(w, "{e}")?,
        }
        w.write_char('\n')?;

        for outcome in &self.outcomes {
            outcome.write_report(w, separators)?;
            w.write_char('\n')?;
        }

        w.write_char('\n')
    }
}

impl WriteReport for Report {
    fn write_report<W: Write>(&self, w: &mut W, separators: &Separators) -> Result {
        trace!("writing report with {} sections", self.sections.len());
        for section in &self.sections {
            section.write_report(w, separators)?;
        }
        Ok(())
    }
}
