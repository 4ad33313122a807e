//! Commands that change a single section of a daily note.

use std::path::Path;

use chrono::NaiveDate;
use clap::Parser;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
pub struct Memo {
    /// Text of the memo
    text: String,

    /// Add the text as a new paragraph instead of replacing the memo
    #[arg(long)]
    append: bool,

    /// The date of the note (defaults to today)
    #[arg(long, value_parser = super::parse_date)]
    date: Option<NaiveDate>,
}

impl Memo {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let repository = super::open_repository(root)?;
        let date = super::date_or_today(self.date);

        repository.update(date, |note| {
            if self.append {
                note.append_review_memo(&self.text)
            } else {
                note.update_review_memo(&self.text)
            }
        })?;

        println!("{}", format!("Updated review memo for {date}").success());
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct Kpt {
    /// Body of the KPT analysis
    body: String,

    /// Text to append after the heading label, e.g. " (evening)"
    #[arg(long)]
    suffix: Option<String>,

    /// The date of the note (defaults to today)
    #[arg(long, value_parser = super::parse_date)]
    date: Option<NaiveDate>,
}

impl Kpt {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let repository = super::open_repository(root)?;
        let date = super::date_or_today(self.date);

        repository.update(date, |note| {
            note.append_kpt(&self.body, self.suffix.as_deref())
        })?;

        println!("{}", format!("Added KPT analysis to {date}").success());
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct TaskReview {
    /// Body of the task review
    body: String,

    /// Text to append after the heading label (defaults to " (DATE)")
    #[arg(long)]
    suffix: Option<String>,

    /// The date of the note (defaults to today)
    #[arg(long, value_parser = super::parse_date)]
    date: Option<NaiveDate>,
}

impl TaskReview {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let repository = super::open_repository(root)?;
        let date = super::date_or_today(self.date);
        let suffix = self.suffix.unwrap_or_else(|| format!(" ({date})"));

        repository.update(date, |note| {
            note.append_task_review(&self.body, Some(&suffix))
        })?;

        println!("{}", format!("Added task review to {date}").success());
        Ok(())
    }
}
