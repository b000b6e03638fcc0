// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! `.macro NAME (%a, %b)` ... `.end_macro` definitions and line-for-line
//! expansion of their invocations.
//!
//! Bodies are flattened when the macro is defined: each body line goes through
//! equivalence substitution and then through expansion of the macros defined
//! so far. Expanding an invocation later is pure parameter substitution.

use std::collections::HashMap;
use std::io;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::equivalence::EquivalenceTable;
use crate::core::error::PreprocessError;
use crate::core::line_source::LineSource;
use crate::core::word_match::{compile_whole_words, CachedPattern};

static MACRO_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.macro (\w+)\s*\(?((?:%\w+[,\s]*)*)\)?\s*\n$")
        .expect("valid .macro directive pattern")
});

/// Everything after the macro name in an invocation line. Arguments may carry
/// `%` so a body can forward its own parameters to an earlier macro.
const INVOCATION_ARGS: &str = r"\s*\(?((?:[%\w$]+[,\s]*)*)\)?\s*\n$";

const END_MACRO: &str = ".end_macro";

/// Split a parameter or argument list; commas count as whitespace.
pub fn split_list(text: &str) -> Vec<String> {
    text.replace(',', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected} argument(s), found {found}")]
pub struct ArityMismatch {
    pub expected: usize,
    pub found: usize,
}

/// A named template. Parameters keep their sigil and bind by position.
#[derive(Debug, Clone)]
pub struct Macro {
    name: String,
    parameters: Vec<String>,
    body: Vec<String>,
    pattern: Option<Regex>,
}

impl Macro {
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<String>,
        body: Vec<String>,
    ) -> Result<Self, regex::Error> {
        let pattern = if parameters.is_empty() {
            None
        } else {
            Some(compile_whole_words(parameters.iter().map(String::as_str))?)
        };
        Ok(Self {
            name: name.into(),
            parameters,
            body,
            pattern,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Instantiate the body with `arguments`.
    ///
    /// An empty argument list returns the body untouched, even when the macro
    /// declares parameters. Any other count must equal the parameter count.
    pub fn evaluate(&self, arguments: &[String]) -> Result<Vec<String>, ArityMismatch> {
        if arguments.is_empty() {
            return Ok(self.body.clone());
        }
        if arguments.len() != self.parameters.len() {
            return Err(ArityMismatch {
                expected: self.parameters.len(),
                found: arguments.len(),
            });
        }
        let Some(pattern) = &self.pattern else {
            return Ok(self.body.clone());
        };
        let lines = self
            .body
            .iter()
            .map(|line| {
                pattern
                    .replace_all(line, |caps: &regex::Captures| {
                        let param = &caps[0];
                        self.parameters
                            .iter()
                            .position(|p| p == param)
                            .and_then(|idx| arguments.get(idx))
                            .map_or_else(|| param.to_string(), String::clone)
                    })
                    .into_owned()
            })
            .collect();
        Ok(lines)
    }
}

#[derive(Debug, Default)]
pub struct MacroTable {
    macros: HashMap<String, Macro>,
    order: Vec<String>,
    pattern: CachedPattern,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Macro> {
        self.macros.get(name)
    }

    /// Store `def`, replacing any macro of the same name.
    pub fn define(&mut self, def: Macro) {
        let name = def.name().to_string();
        if self.macros.insert(name.clone(), def).is_none() {
            self.order.push(name);
        }
        self.pattern.invalidate();
    }

    /// Consume `line` and the body that follows it if `line` opens a macro.
    ///
    /// The `.end_macro` line is consumed and dropped. Running out of input
    /// before it is an error.
    pub fn try_define<I>(
        &mut self,
        line: &str,
        source: &mut LineSource<I>,
        equivalences: &mut EquivalenceTable,
    ) -> Result<bool, PreprocessError>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let Some(caps) = MACRO_DIRECTIVE.captures(line) else {
            return Ok(false);
        };
        let name = caps[1].to_string();
        let parameters = split_list(&caps[2]);
        let start_line = source.line_number();

        let mut body = Vec::new();
        loop {
            let Some(raw) = source.next_line()? else {
                return Err(PreprocessError::UnterminatedMacro {
                    name,
                    line: start_line,
                });
            };
            if raw.starts_with(END_MACRO) {
                break;
            }
            let substituted = equivalences.substitute(&raw)?;
            body.extend(self.expand(&substituted, source.line_number())?);
        }

        debug!(
            name = name.as_str(),
            params = parameters.len(),
            body_lines = body.len(),
            line = start_line,
            "defined macro"
        );
        self.define(Macro::new(name, parameters, body)?);
        Ok(true)
    }

    /// Expand `line` if the whole line is an invocation of a known macro.
    ///
    /// Lines that are not invocations come back as the single element of the
    /// result. `line_number` is only used for error reporting.
    pub fn expand(
        &mut self,
        line: &str,
        line_number: u32,
    ) -> Result<Vec<String>, PreprocessError> {
        if self.is_empty() {
            return Ok(vec![line.to_string()]);
        }
        let order = &self.order;
        let pattern = self
            .pattern
            .get_or_build(|| invocation_pattern(order.iter().map(String::as_str)))?;
        let Some(caps) = pattern.captures(line) else {
            return Ok(vec![line.to_string()]);
        };
        let name = &caps[1];
        let arguments = split_list(&caps[2]);
        let Some(def) = self.macros.get(name) else {
            return Ok(vec![line.to_string()]);
        };
        trace!(name, args = arguments.len(), line = line_number, "expanding macro");
        def.evaluate(&arguments)
            .map_err(|ArityMismatch { expected, found }| PreprocessError::ArityMismatch {
                name: name.to_string(),
                expected,
                found,
                line: line_number,
            })
    }
}

fn invocation_pattern<'a, I>(names: I) -> Result<Regex, regex::Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<String> = names.into_iter().map(regex::escape).collect();
    Regex::new(&format!(r"^\s*\b({})\b{}", names.join("|"), INVOCATION_ARGS))
}
