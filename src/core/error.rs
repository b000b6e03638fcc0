// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error types for the preprocessing pass and its I/O collaborators.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every failure aborts the current run; there is no line-level recovery.
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// Input ended while a `.macro` body was still open.
    #[error("line {line}: missing .end_macro for macro '{name}'")]
    UnterminatedMacro { name: String, line: u32 },

    /// A macro was invoked with a non-empty argument list of the wrong length.
    #[error("line {line}: macro '{name}' expects {expected} argument(s), found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        line: u32,
    },

    #[error("error reading input: {0}")]
    Read(#[source] io::Error),

    #[error("error writing output: {0}")]
    Write(#[source] io::Error),

    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot build substitution pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl PreprocessError {
    /// Input line the failure is attributed to, when there is one.
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::UnterminatedMacro { line, .. } | Self::ArityMismatch { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PreprocessError;

    #[test]
    fn unterminated_macro_message_names_macro_and_line() {
        let err = PreprocessError::UnterminatedMacro {
            name: "PUSH".to_string(),
            line: 7,
        };
        assert_eq!(err.to_string(), "line 7: missing .end_macro for macro 'PUSH'");
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn arity_mismatch_message_reports_counts() {
        let err = PreprocessError::ArityMismatch {
            name: "ADD".to_string(),
            expected: 2,
            found: 3,
            line: 12,
        };
        assert_eq!(
            err.to_string(),
            "line 12: macro 'ADD' expects 2 argument(s), found 3"
        );
    }

    #[test]
    fn io_errors_carry_no_line() {
        let err = PreprocessError::Read(std::io::Error::other("boom"));
        assert_eq!(err.line(), None);
        assert_eq!(err.to_string(), "error reading input: boom");
    }
}
