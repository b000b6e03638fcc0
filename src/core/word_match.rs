// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Whole-word alternation patterns and their invalidate-on-write cache.
//!
//! A name matches only where the characters on both sides of it are not word
//! characters. Plain `\b` gets this wrong for names that start or end with a
//! sigil such as `%`, so the assertion on each side is picked from the name's
//! own edge character: `\b` next to a word character, `\B` next to anything
//! else.

use regex::Regex;
use tracing::trace;

/// Word character in the sense of the regex `\w` class for identifier text.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn edge_assertion(c: Option<char>) -> &'static str {
    match c {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"\B",
    }
}

/// Build the pattern text for one alternative per name, in the given order.
///
/// Earlier names win when two alternatives could match at the same position.
/// Empty names are skipped.
pub fn whole_word_alternation<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let alternatives: Vec<String> = names
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(|name| {
            format!(
                "{}{}{}",
                edge_assertion(name.chars().next()),
                regex::escape(name),
                edge_assertion(name.chars().last())
            )
        })
        .collect();
    format!("(?:{})", alternatives.join("|"))
}

/// Compile a whole-word matcher over `names`.
pub fn compile_whole_words<'a, I>(names: I) -> Result<Regex, regex::Error>
where
    I: IntoIterator<Item = &'a str>,
{
    Regex::new(&whole_word_alternation(names))
}

/// A compiled pattern derived from a table's key set.
///
/// The owner calls [`CachedPattern::invalidate`] on every write and hands a
/// builder to [`CachedPattern::get_or_build`] on every read; the pattern is
/// rebuilt at most once per batch of writes.
#[derive(Debug)]
pub struct CachedPattern {
    dirty: bool,
    regex: Option<Regex>,
}

impl Default for CachedPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl CachedPattern {
    pub fn new() -> Self {
        Self {
            dirty: true,
            regex: None,
        }
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn get_or_build<F>(&mut self, build: F) -> Result<&Regex, regex::Error>
    where
        F: FnOnce() -> Result<Regex, regex::Error>,
    {
        if self.dirty {
            self.regex = None;
        }
        let regex = match self.regex.take() {
            Some(regex) => regex,
            None => {
                let regex = build()?;
                trace!(pattern = regex.as_str(), "rebuilt substitution pattern");
                regex
            }
        };
        self.dirty = false;
        Ok(self.regex.insert(regex))
    }
}
