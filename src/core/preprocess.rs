// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// Single forward pass resolving .eqv and .macro/.end_macro directives.

use std::io::{self, BufRead, Write};

use tracing::info;

use crate::core::equivalence::EquivalenceTable;
use crate::core::error::PreprocessError;
use crate::core::line_source::{text_lines, LineSource};
use crate::core::macros::MacroTable;

/// Owns both tables for exactly one run.
#[derive(Debug, Default)]
pub struct Preprocessor {
    equivalences: EquivalenceTable,
    macros: MacroTable,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equivalences(&self) -> &EquivalenceTable {
        &self.equivalences
    }

    pub fn macros(&self) -> &MacroTable {
        &self.macros
    }

    /// Classify one line and return what it contributes to the output.
    ///
    /// Directives contribute nothing; a `.macro` line also consumes its body
    /// from `source`.
    pub fn process_line<I>(
        &mut self,
        line: &str,
        source: &mut LineSource<I>,
    ) -> Result<Vec<String>, PreprocessError>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        if self.equivalences.try_define(line) {
            return Ok(Vec::new());
        }
        if self
            .macros
            .try_define(line, source, &mut self.equivalences)?
        {
            return Ok(Vec::new());
        }
        let line_number = source.line_number();
        let substituted = self.equivalences.substitute(line)?;
        self.macros.expand(&substituted, line_number)
    }

    /// Run the pass until `source` is exhausted.
    pub fn process<I>(
        &mut self,
        source: &mut LineSource<I>,
    ) -> Result<Vec<String>, PreprocessError>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let mut out = Vec::new();
        while let Some(line) = source.next_line()? {
            out.extend(self.process_line(&line, source)?);
        }
        info!(
            input_lines = source.line_number(),
            output_lines = out.len(),
            equivalences = self.equivalences.len(),
            macros = self.macros.len(),
            "preprocessing complete"
        );
        Ok(out)
    }
}

/// Preprocess a sequence of raw lines with fresh tables.
pub fn preprocess<I>(lines: I) -> Result<Vec<String>, PreprocessError>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut source = LineSource::new(lines.into_iter());
    Preprocessor::new().process(&mut source)
}

/// Preprocess in-memory text and return the joined output.
pub fn preprocess_str(text: &str) -> Result<String, PreprocessError> {
    Ok(preprocess(text_lines(text))?.concat())
}

/// Preprocess everything `reader` yields.
pub fn preprocess_reader<R: BufRead>(reader: R) -> Result<Vec<String>, PreprocessError> {
    let mut source = LineSource::from_reader(reader);
    Preprocessor::new().process(&mut source)
}

/// Read all of `reader`, preprocess it, then write the joined output.
///
/// Nothing is written unless the whole pass succeeds.
pub fn preprocess_to<R, W>(reader: R, writer: &mut W) -> Result<usize, PreprocessError>
where
    R: BufRead,
    W: Write,
{
    let lines = preprocess_reader(reader)?;
    writer
        .write_all(lines.concat().as_bytes())
        .and_then(|()| writer.flush())
        .map_err(PreprocessError::Write)?;
    Ok(lines.len())
}
