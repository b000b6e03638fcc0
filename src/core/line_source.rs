// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Forward-only cursor over raw input lines.
//!
//! The preprocessing pass owns one [`LineSource`] and lends it to whichever
//! table needs to advance it. Lines keep their terminators so output can be
//! reassembled by plain concatenation.

use std::io::{self, BufRead};

use crate::core::error::PreprocessError;

/// Iterator over the raw lines of a buffered reader, terminators included.
pub struct RawLines<R> {
    reader: R,
}

impl<R: BufRead> RawLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Iterator for RawLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(err) => Some(Err(err)),
        }
    }
}

/// Raw lines of an in-memory text, terminators included.
pub fn text_lines(text: &str) -> impl Iterator<Item = io::Result<String>> + '_ {
    text.split_inclusive('\n').map(|line| Ok(line.to_string()))
}

pub struct LineSource<I> {
    lines: I,
    line_number: u32,
}

impl<I> LineSource<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            line_number: 0,
        }
    }

    /// Advance to the next line; `Ok(None)` once input is exhausted.
    pub fn next_line(&mut self) -> Result<Option<String>, PreprocessError> {
        match self.lines.next() {
            Some(Ok(line)) => {
                self.line_number = self.line_number.saturating_add(1);
                Ok(Some(line))
            }
            Some(Err(err)) => Err(PreprocessError::Read(err)),
            None => Ok(None),
        }
    }

    /// 1-based number of the last line handed out, 0 before the first.
    pub fn line_number(&self) -> u32 {
        self.line_number
    }
}

impl<R: BufRead> LineSource<RawLines<R>> {
    pub fn from_reader(reader: R) -> Self {
        Self::new(RawLines::new(reader))
    }
}
