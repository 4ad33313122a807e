use std::{
    io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tracing::instrument;

use super::{
    BuildError, DailyNoteContentUpdater, DailyNoteFactory, DailyNoteMarkdownBuilder, NoteStore,
    construct_path_from_date, parse_date_from_path,
};
use crate::domain::{Config, DailyNote, HeadingSpecRegistry};

/// The name of the configuration file in the vault root.
pub const CONFIG_FILE: &str = "dailynote.toml";

/// Loads the vault configuration.
///
/// A vault without a configuration file uses the defaults.
///
/// # Errors
///
/// Returns an error if the configuration file exists but cannot be read or
/// is invalid, e.g. has a `date_format` that cannot name a file.
pub fn load_config(root: &Path) -> Result<Config, String> {
    let path = root.join(CONFIG_FILE);
    if path.exists() {
        Config::load(&path)
    } else {
        tracing::debug!("No config at {}, using defaults", path.display());
        Ok(Config::default())
    }
}

/// Errors that can occur when loading or saving a daily note.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// There is no daily note for the requested date.
    #[error("no daily note at {}", .0.display())]
    NotFound(PathBuf),
    /// An I/O error occurred.
    #[error("failed to access daily note")]
    Io(#[from] io::Error),
    /// The note could not be rendered.
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Daily notes keyed by date.
#[derive(Debug, Clone)]
pub struct DailyNoteRepository<S> {
    store: S,
    config: Config,
    registry: HeadingSpecRegistry,
}

impl<S: NoteStore> DailyNoteRepository<S> {
    /// Creates a repository over `store`, using the labels and layout of
    /// `config`.
    #[must_use]
    pub fn new(store: S, config: Config) -> Self {
        let registry = config.registry();
        Self {
            store,
            config,
            registry,
        }
    }

    /// The registry built from the configuration.
    #[must_use]
    pub const fn registry(&self) -> &HeadingSpecRegistry {
        &self.registry
    }

    /// The configuration of the vault.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The path of the daily note for `date`.
    #[must_use]
    pub fn path(&self, date: NaiveDate) -> PathBuf {
        construct_path_from_date(
            self.store.root(),
            self.config.daily_note_dir(),
            self.config.date_format(),
            date,
        )
    }

    /// Reads the raw markdown of the daily note for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if there is no note for `date`.
    pub fn load_raw(&self, date: NaiveDate) -> Result<String, LoadError> {
        let path = self.path(date);
        self.store.read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(path),
            _ => LoadError::Io(e),
        })
    }

    /// Loads and parses the daily note for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if there is no note for `date`.
    #[instrument(skip(self))]
    pub fn load(&self, date: NaiveDate) -> Result<DailyNote, LoadError> {
        let raw = self.load_raw(date)?;
        Ok(DailyNoteFactory::new(&self.registry).from_markdown(&raw))
    }

    /// Renders `note` and writes it as the daily note for `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the note cannot be rendered or written.
    #[instrument(skip(self, note))]
    pub fn save(&self, date: NaiveDate, note: &DailyNote) -> Result<(), LoadError> {
        let text = DailyNoteMarkdownBuilder::new(&self.registry).build(note)?;
        self.store.write(&self.path(date), &text)?;
        Ok(())
    }

    /// Applies `change` to the daily note for `date` and writes the result.
    ///
    /// A missing note is treated as empty, so the first update creates it.
    /// Returns the rendered markdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the note cannot be read, rendered or written.
    #[instrument(skip(self, change))]
    pub fn update(
        &self,
        date: NaiveDate,
        change: impl FnOnce(DailyNote) -> DailyNote,
    ) -> Result<String, LoadError> {
        let raw = match self.load_raw(date) {
            Ok(raw) => raw,
            Err(LoadError::NotFound(path)) => {
                tracing::debug!("Creating {}", path.display());
                String::new()
            }
            Err(e) => return Err(e),
        };

        let text = DailyNoteContentUpdater::new(&self.registry).update(&raw, change)?;
        if text == raw {
            tracing::debug!("Daily note for {date} is unchanged");
        } else {
            self.store.write(&self.path(date), &text)?;
        }
        Ok(text)
    }

    /// The dates of all daily notes in the vault, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the vault cannot be listed.
    pub fn dates(&self) -> Result<Vec<NaiveDate>, LoadError> {
        let dir = self.store.root().join(self.config.daily_note_dir());
        let mut dates: Vec<_> = self
            .store
            .list(&dir)?
            .iter()
            .filter_map(|path| {
                parse_date_from_path(
                    path,
                    self.store.root(),
                    self.config.daily_note_dir(),
                    self.config.date_format(),
                )
            })
            .collect();
        dates.sort_unstable();
        Ok(dates)
    }
}
