use std::path::{Path, PathBuf};

mod edit;
mod format;
mod reviews;
mod show;
mod terminal;

use chrono::NaiveDate;
use clap::ArgAction;
use dailynote::{
    DailyNoteRepository, FsNoteStore, Language,
    storage::markdown::{CONFIG_FILE, load_config},
};
use edit::{Kpt, Memo, TaskReview};
use format::Format;
use reviews::Reviews;
use show::Show;
use tracing::instrument;

/// Parse a date argument.
///
/// Accepts `today`, `yesterday` or an ISO date such as `2026-01-03`.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let today = chrono::Local::now().date_naive();
    match s.to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => today
            .pred_opt()
            .ok_or_else(|| "date out of range".to_string()),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map_err(|e| format!("expected YYYY-MM-DD, 'today' or 'yesterday': {e}")),
    }
}

/// Resolve an optional date argument, defaulting to today.
fn date_or_today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}

fn open_repository(root: &Path) -> anyhow::Result<DailyNoteRepository<FsNoteStore>> {
    let config = load_config(root).map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(DailyNoteRepository::new(FsNoteStore::new(root), config))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The path to the root of the vault
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Show(Show::default()))
            .run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show the sections of a daily note (default)
    Show(Show),

    /// List the reviewed notes of the daily report
    Reviews(Reviews),

    /// Replace or extend the review memo
    Memo(Memo),

    /// Append a KPT analysis
    Kpt(Kpt),

    /// Append a task review under the time log
    TaskReview(TaskReview),

    /// Re-render a daily note in canonical form
    ///
    /// Sections are reordered, blank lines collapsed and headings rewritten
    /// with the active labels. Running it twice changes nothing.
    Format(Format),

    /// Show or modify configuration settings
    Config(Config),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Show(command) => command.run(root)?,
            Self::Reviews(command) => command.run(root)?,
            Self::Memo(command) => command.run(root)?,
            Self::Kpt(command) => command.run(root)?,
            Self::TaskReview(command) => command.run(root)?,
            Self::Format(command) => command.run(root)?,
            Self::Config(command) => command.run(root)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Config {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Config {
    #[instrument]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        use terminal::Colorize;

        let config_path = root.join(CONFIG_FILE);

        match self.command {
            ConfigCommand::Show => {
                let config = load_config(root).map_err(|e| anyhow::anyhow!("{e}"))?;

                println!("Configuration:");
                println!("  language: {}", config.language);
                println!("  daily_note_dir: {}", config.daily_note_dir());
                println!("  date_format: {}", config.date_format());
                if !config.labels().is_empty() {
                    println!("  labels:");
                    for (key, label) in config.labels() {
                        println!("    {key}: {label}");
                    }
                }
                if !config_path.exists() {
                    println!("\n{}", format!("{CONFIG_FILE} not found, using defaults").dim());
                }
            }
            ConfigCommand::Set { key, value } => {
                let mut config = if config_path.exists() {
                    dailynote::Config::load(&config_path).map_err(|e| anyhow::anyhow!("{e}"))?
                } else {
                    dailynote::Config::default()
                };

                match key.as_str() {
                    "language" => {
                        let language: Language =
                            value.parse().map_err(|e: String| anyhow::anyhow!(e))?;

                        if config.set_language(language) {
                            config
                                .save(&config_path)
                                .map_err(|e| anyhow::anyhow!("{e}"))?;
                            println!("{}", format!("Language: {language}").success());
                            println!(
                                "\n{}",
                                "Run `dnote format` to rewrite existing headings.".info()
                            );
                        } else {
                            println!("{}", format!("Language is already {language}").dim());
                        }
                    }
                    _ => {
                        return Err(anyhow::anyhow!(
                            "Unknown configuration key: '{key}'\nSupported keys: language",
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}
