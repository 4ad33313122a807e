use std::{path::Path, process};

use chrono::NaiveDate;
use clap::Parser;
use dailynote::storage::DailyNoteContentUpdater;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
pub struct Format {
    /// The date of the note (defaults to today)
    #[arg(value_parser = super::parse_date)]
    date: Option<NaiveDate>,

    /// Format every daily note in the vault
    #[arg(long, conflicts_with = "date")]
    all: bool,

    /// Report notes that would change without writing them
    ///
    /// Exits with a non-zero status if any note is not in canonical form.
    #[arg(long)]
    check: bool,
}

impl Format {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let repository = super::open_repository(root)?;
        let dates = if self.all {
            repository.dates()?
        } else {
            vec![super::date_or_today(self.date)]
        };

        let updater = DailyNoteContentUpdater::new(repository.registry());
        let mut unformatted = 0usize;

        for date in dates {
            let raw = repository.load_raw(date)?;
            let formatted = updater.normalize(&raw)?;
            if formatted == raw {
                tracing::debug!("{date} is already formatted");
                continue;
            }

            unformatted += 1;
            if self.check {
                println!("{}", format!("Would reformat {date}").warning());
            } else {
                repository.update(date, |note| note)?;
                println!("{}", format!("Formatted {date}").success());
            }
        }

        if self.check && unformatted > 0 {
            process::exit(1);
        }
        if unformatted == 0 {
            println!("{}", "Nothing to format".dim());
        }

        Ok(())
    }
}
