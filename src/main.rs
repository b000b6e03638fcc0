// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for asmpp.

fn main() {
    if let Err(err) = asmpp::cli::run() {
        eprintln!("asmpp: {err}");
        std::process::exit(1);
    }
}
