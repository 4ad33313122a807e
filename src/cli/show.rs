use std::path::Path;

use chrono::NaiveDate;
use clap::Parser;
use dailynote::{DailyNote, HeadingSpecRegistry, Section, SectionKey, SectionList};
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

#[derive(Debug, Default, Parser)]
#[command(about = "Display the sections of a daily note")]
pub struct Show {
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
    Markdown,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let repository = super::open_repository(root)?;
        let date = super::date_or_today(self.date);
        let note = repository.load(date)?;

        match self.output {
            OutputFormat::Pretty => {
                Self::output_pretty(repository.registry(), &note, date, &repository.path(date));
            }
            OutputFormat::Json => Self::output_json(&note, date)?,
            OutputFormat::Markdown => print!("{}", note.source()),
        }

        Ok(())
    }

    fn output_pretty(
        registry: &HeadingSpecRegistry,
        note: &DailyNote,
        date: NaiveDate,
        path: &Path,
    ) {
        println!("# {date}");
        println!("{}\n", path.display().to_string().dim());

        for section in sections(note) {
            let label = registry
                .display_label(section.key())
                .unwrap_or_else(|| section.key().as_str());
            let heading = format!("{label}{}", section.suffix().unwrap_or_default());

            if !section.is_present() {
                println!("  {} {}", "·".dim(), heading.dim());
            } else if is_narrow() {
                println!("  {} {heading}", "✓".success());
            } else {
                let lines = section.body().lines().count();
                println!(
                    "  {} {heading} {}",
                    "✓".success(),
                    format!("({lines} lines)").dim()
                );
            }
        }

        let reviewed = note.daily_report().reviewed_notes().len();
        if reviewed > 0 {
            println!("\n{}", format!("{reviewed} reviewed notes").info());
        }
    }

    fn output_json(note: &DailyNote, date: NaiveDate) -> anyhow::Result<()> {
        use serde_json::json;

        let sections: Vec<_> = sections(note)
            .iter()
            .map(|section| {
                json!({
                    "key": section.key(),
                    "present": section.is_present(),
                    "suffix": section.suffix(),
                    "body": section.body(),
                })
            })
            .collect();

        let output = json!({
            "date": date,
            "sections": sections,
            "reviewed_notes": note.daily_report().reviewed_notes(),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

/// All sections in canonical order; empty repeatable groups show as absent.
fn sections(note: &DailyNote) -> Vec<Section> {
    fn group(list: &SectionList, key: SectionKey) -> Vec<Section> {
        if list.is_empty() {
            vec![Section::absent(key)]
        } else {
            list.iter().cloned().collect()
        }
    }

    let mut sections = vec![note.planned_task().clone(), note.timelog().clone()];
    sections.extend(group(note.task_reviews(), SectionKey::TaskReview));
    sections.push(note.review_memo().clone());
    sections.push(note.daily_report().section().clone());
    sections.extend(group(note.kpts(), SectionKey::Kpt));
    sections
}
