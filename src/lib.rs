// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// Library entry exposing the preprocessor engine and its CLI wrapper.
pub mod cli;
pub mod core;

pub use crate::core::{
    preprocess, preprocess_str, EquivalenceTable, LineSource, Macro, MacroTable, PreprocessError,
    Preprocessor,
};
