//! Line reading and token scanning shared by all text formats

use std::io::BufRead;
use std::str::FromStr;

use crate::error::{FormatError, Result};

/// Reads a text stream line by line, skipping comment lines
///
/// A comment line is any line whose first character is the comment marker.
/// Line numbers are 1-based and count every physical line, comments included.
pub struct LineReader<R> {
    reader: R,
    buf: String,
    line: usize,
    comment: char,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R, comment: char) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
            comment,
        }
    }

    /// Number of the last line returned (0 before the first read)
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Resets the line counter, after the underlying reader was repositioned
    pub fn set_line_number(&mut self, line: usize) {
        self.line = line;
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Reads the next physical line, comments included
    pub fn next_raw(&mut self) -> Result<Option<(usize, &str)>> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some((self.line, self.buf.trim_end_matches(['\n', '\r']))))
    }

    /// Next line that is not a comment; blank lines are returned
    pub fn next_line(&mut self) -> Result<Option<(usize, &str)>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            if !self.buf.starts_with(self.comment) {
                break;
            }
        }
        Ok(Some((self.line, self.buf.trim_end_matches(['\n', '\r']))))
    }

    /// Next line that is neither a comment nor blank
    pub fn next_data_line(&mut self) -> Result<Option<(usize, &str)>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            if !self.buf.starts_with(self.comment) && !self.buf.trim().is_empty() {
                break;
            }
        }
        Ok(Some((self.line, self.buf.trim_end_matches(['\n', '\r']))))
    }

    /// Requires that only comments and blank lines remain
    pub fn expect_end(&mut self) -> Result<()> {
        match self.next_data_line()? {
            Some((line, _)) => Err(FormatError::TrailingContent { line }),
            None => Ok(()),
        }
    }
}

/// Splits a line into whitespace-separated tokens
pub fn tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Parses a 1-based on-disk index into a 0-based one
///
/// Index 0 has no 0-based counterpart and is reported as out of range.
pub fn parse_index(token: &str, line: usize, axis: &'static str, bound: usize) -> Result<usize> {
    let index: usize = token
        .parse()
        .map_err(|_| FormatError::entry(line, token))?;
    if index == 0 {
        return Err(FormatError::out_of_range(line, axis, 0, bound));
    }
    Ok(index - 1)
}

/// Parses a count or dimension field of a header
pub fn parse_count(token: &str, line: usize, field: &str) -> Result<usize> {
    token
        .parse()
        .map_err(|_| FormatError::header(line, format!("invalid {} `{}`", field, token)))
}

/// Parses a numeric value token
pub fn parse_value<T: FromStr>(token: &str, line: usize) -> Result<T> {
    token.parse().map_err(|_| FormatError::entry(line, token))
}
