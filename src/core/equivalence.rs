// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! `.eqv NAME VALUE` bindings and whole-word substitution.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::core::error::PreprocessError;
use crate::core::word_match::{compile_whole_words, CachedPattern};

static EQV_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.eqv (\w+) (.*)\n$").expect("valid .eqv directive pattern")
});

#[derive(Debug, Default)]
pub struct EquivalenceTable {
    values: HashMap<String, String>,
    // Definition order keeps rebuilt patterns identical across runs.
    order: Vec<String>,
    pattern: CachedPattern,
}

impl EquivalenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Bind `name` to `value`, replacing any earlier binding.
    pub fn define(&mut self, name: &str, value: &str) {
        if self
            .values
            .insert(name.to_string(), value.to_string())
            .is_none()
        {
            self.order.push(name.to_string());
        }
        self.pattern.invalidate();
    }

    /// Consume `line` if it is an `.eqv` directive.
    pub fn try_define(&mut self, line: &str) -> bool {
        let Some(caps) = EQV_DIRECTIVE.captures(line) else {
            return false;
        };
        let (name, value) = (&caps[1], &caps[2]);
        debug!(name, value, "defined equivalence");
        self.define(name, value);
        true
    }

    /// Replace every whole-word occurrence of a bound name with its value.
    ///
    /// Inserted values are not scanned again.
    pub fn substitute(&mut self, line: &str) -> Result<String, PreprocessError> {
        if self.is_empty() {
            return Ok(line.to_string());
        }
        let order = &self.order;
        let values = &self.values;
        let pattern = self
            .pattern
            .get_or_build(|| compile_whole_words(order.iter().map(String::as_str)))?;
        let out = pattern.replace_all(line, |caps: &regex::Captures| {
            values.get(&caps[0]).cloned().unwrap_or_default()
        });
        Ok(out.into_owned())
    }
}
