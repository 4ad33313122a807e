//! Command line interface for structured daily notes.
//!
//! Reads, edits and re-renders the daily notes of a vault using the
//! localized section headings of the `dailynote` library.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
