// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface parsing, logging setup, and the file/stream wrappers
//! around the preprocessing pass.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::core::error::PreprocessError;
use crate::core::preprocess::preprocess_reader;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const LONG_ABOUT: &str = "Preprocessor for .eqv and .macro/.end_macro directives in assembly source.

Each line is offered, in order, to the .eqv table, then to the macro table, and
otherwise has equivalences substituted and macro invocations expanded.
Input defaults to standard input and output to standard output. Output is only
written once the whole input has been processed without error.";

#[derive(Parser, Debug)]
#[command(
    name = "asmpp",
    version = VERSION,
    about = "Preprocessor for .eqv and .macro/.end_macro directives in assembly source",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "",
        long_help = "Input file. Standard input when omitted, given without FILE, or FILE is '-'."
    )]
    pub input: Option<String>,
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "",
        long_help = "Output file. Standard output when omitted, given without FILE, or FILE is '-'."
    )]
    pub output: Option<String>,
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        long_help = "Raise the log level (repeatable: info, debug, trace). RUST_LOG takes precedence."
    )]
    pub verbose: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    File(PathBuf),
}

/// Validated CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub input: InputSource,
    pub output: OutputSink,
    pub verbose: u8,
}

fn stream_path(arg: Option<&str>) -> Option<PathBuf> {
    match arg {
        None | Some("") | Some("-") => None,
        Some(path) => Some(PathBuf::from(path)),
    }
}

pub fn validate_cli(cli: &Cli) -> CliConfig {
    let input = match stream_path(cli.input.as_deref()) {
        Some(path) => InputSource::File(path),
        None => InputSource::Stdin,
    };
    let output = match stream_path(cli.output.as_deref()) {
        Some(path) => OutputSink::File(path),
        None => OutputSink::Stdout,
    };
    CliConfig {
        input,
        output,
        verbose: cli.verbose,
    }
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr log subscriber. Later calls are no-ops.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(input: &InputSource) -> Result<Vec<String>, PreprocessError> {
    match input {
        InputSource::Stdin => preprocess_reader(io::stdin().lock()),
        InputSource::File(path) => {
            let file = File::open(path).map_err(|source| PreprocessError::Open {
                path: path.clone(),
                source,
            })?;
            preprocess_reader(BufReader::new(file))
        }
    }
}

fn write_output(output: &OutputSink, text: &str) -> Result<(), PreprocessError> {
    match output {
        OutputSink::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(PreprocessError::Write)
        }
        OutputSink::File(path) => {
            let mut file = File::create(path).map_err(|source| PreprocessError::Open {
                path: path.clone(),
                source,
            })?;
            file.write_all(text.as_bytes())
                .and_then(|()| file.flush())
                .map_err(PreprocessError::Write)
        }
    }
}

/// Preprocess per `config`; returns the number of output lines.
pub fn run_with(config: &CliConfig) -> Result<usize, PreprocessError> {
    debug!(input = ?config.input, output = ?config.output, "starting run");
    let lines = read_input(&config.input)?;
    write_output(&config.output, &lines.concat())?;
    Ok(lines.len())
}

pub fn run() -> Result<usize, PreprocessError> {
    let cli = Cli::parse();
    let config = validate_cli(&cli);
    init_logging(config.verbose);
    run_with(&config)
}
