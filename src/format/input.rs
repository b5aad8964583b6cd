use std::io::BufRead;

use tracing::{debug, trace, warn};

use crate::error::FormatError;

use super::{Mode, Separators, Specification};

/// Reads [`Specification`]s one after another from a buffered reader. Every block consists of
/// exactly [`Mode::fields`] lines and is followed by an optional blank separator line, which
/// means that blank lines inside a block are read as empty fields.
///
/// If the reader ends in the middle of a block, the stream yields a
/// [`FormatError::Truncated`] and stops. Trailing blank lines are ignored.
#[derive(Debug)]
pub struct SpecificationStream<R> {
    read: R,
    mode: Mode,
    separators: Separators,
    pending: Option<String>,
    line: usize,
    done: bool,
}

impl<R: BufRead> SpecificationStream<R> {
    /// Creates a stream that reads specifications in the layout of `mode` from `read`.
    pub fn new(read: R, mode: Mode, separators: Separators) -> Self {
        Self {
            read,
            mode,
            separators,
            pending: None,
            line: 0,
            done: false,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, FormatError> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }
        let mut buf = String::new();
        if self.read.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    fn next_block(&mut self) -> Result<Option<Specification>, FormatError> {
        let expected = self.mode.fields();
        let mut lines = Vec::with_capacity(expected);
        let first_line = self.line + 1 - usize::from(self.pending.is_some());

        while lines.len() < expected {
            match self.next_line()? {
                Some(line) => lines.push(line),
                None if lines.iter().all(|l| l.trim().is_empty()) => {
                    trace!("reached end of input");
                    return Ok(None);
                }
                None => {
                    return Err(FormatError::Truncated {
                        line: first_line,
                        expected,
                        found: lines.len(),
                    })
                }
            }
        }

        match self.next_line()? {
            Some(separator) if separator.trim().is_empty() => {}
            Some(line) => {
                warn!(
                    "specification starting at line {first_line} is not followed by a blank line"
                );
                self.pending = Some(line);
            }
            None => {}
        }

        debug!("read specification starting at line {first_line}");
        Ok(Some(Specification::from_lines(
            &lines,
            self.mode,
            &self.separators,
        )))
    }
}

impl<R: BufRead> Iterator for SpecificationStream<R> {
    type Item = Result<Specification, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_block() {
            Ok(Some(spec)) => Some(Ok(spec)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Parses all specifications contained in `text`.
pub fn parse_specifications(
    text: &str,
    mode: Mode,
    separators: &Separators,
) -> Result<Vec<Specification>, FormatError> {
    SpecificationStream::new(text.as_bytes(), mode, separators.clone()).collect()
}
