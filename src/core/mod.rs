// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Substitution engine for `.eqv` and `.macro` directives.
//!
//! # Components
//!
//! - [`word_match`] - Whole-word alternation patterns and their rebuild cache
//! - [`line_source`] - Forward-only cursor over raw input lines
//! - [`equivalence`] - `.eqv` bindings and substitution
//! - [`macros`] - Macro templates, the macro table, and invocation expansion
//! - [`preprocess`] - The single pass tying both tables together
//! - [`error`] - Failures that abort a run

pub mod equivalence;
pub mod error;
pub mod line_source;
pub mod macros;
pub mod preprocess;
pub mod word_match;

// Re-exports for convenience
pub use equivalence::EquivalenceTable;
pub use error::PreprocessError;
pub use line_source::{text_lines, LineSource, RawLines};
pub use macros::{ArityMismatch, Macro, MacroTable};
pub use preprocess::{preprocess, preprocess_reader, preprocess_str, preprocess_to, Preprocessor};
