use std::io::{BufRead, Lines};

use crate::errors::GenerationError;

/// Sequential, non-restartable reader over input lines.
///
/// A trailing `\r` is dropped so files saved with CRLF endings compare equal
/// to the header constants.
pub struct LineSource<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    pub fn next_line(&mut self) -> Result<Option<String>, GenerationError> {
        let Some(line) = self.lines.next() else {
            return Ok(None);
        };
        let mut line = line?;
        if line.ends_with('\r') {
            line.pop();
        }
        self.line_number += 1;
        Ok(Some(line))
    }

    /// 1-based number of the last line returned, 0 before the first read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<'a> LineSource<&'a [u8]> {
    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_carriage_returns_and_counts_lines() {
        let mut source = LineSource::from_text("first\r\nsecond\n");
        assert_eq!(source.next_line().unwrap().as_deref(), Some("first"));
        assert_eq!(source.line_number(), 1);
        assert_eq!(source.next_line().unwrap().as_deref(), Some("second"));
        assert_eq!(source.next_line().unwrap(), None);
        assert_eq!(source.line_number(), 2);
    }
}
