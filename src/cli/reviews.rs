use std::path::Path;

use chrono::NaiveDate;
use clap::Parser;
use dailynote::{ReviewLineKind, ReviewedNote};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "List the reviewed notes of a daily report")]
pub struct Reviews {
    /// The date of the note (defaults to today)
    #[arg(value_parser = super::parse_date)]
    date: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Reviews {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let repository = super::open_repository(root)?;
        let note = repository.load(super::date_or_today(self.date))?;
        let notes = note.daily_report().reviewed_notes();

        match self.output {
            OutputFormat::Pretty => output_pretty(notes),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(notes)?),
        }

        Ok(())
    }
}

fn output_pretty(notes: &[ReviewedNote]) {
    if notes.is_empty() {
        println!("{}", "No reviewed notes".dim());
        return;
    }

    for (i, note) in notes.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} {}", note.title, format!("[[{}]]", note.path).dim());
        for line in &note.lines {
            let marker = match line.kind {
                ReviewLineKind::Checked => "✓".success(),
                ReviewLineKind::Unchecked => "○".warning(),
                ReviewLineKind::UserComment => "💬".info(),
            };
            println!("  {marker} {}", line.text.as_str());
        }
    }
}
