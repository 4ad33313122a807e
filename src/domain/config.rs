use std::{fmt::Write, path::Path};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{HeadingSpecRegistry, LabelTable, Language};

/// Configuration for a vault of daily notes.
///
/// This struct holds settings that control which language headings are
/// written in, where daily notes live, and how they are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// The language of section headings.
    pub language: Language,

    /// Directory, relative to the vault root, that holds daily notes.
    daily_note_dir: String,

    /// `chrono` format string used to name daily note files.
    ///
    /// For example, `%Y-%m-%d` names the note for 3 January 2026
    /// `2026-01-03.md`. Only date fields are allowed; this is checked on
    /// deserialization.
    date_format: String,

    /// Per-section label overrides for the active language.
    ///
    /// Sections without an override use the built-in label.
    labels: LabelTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default(),
            daily_note_dir: default_daily_note_dir(),
            date_format: default_date_format(),
            labels: LabelTable::new(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the daily note directory, relative to the vault root.
    #[must_use]
    pub fn daily_note_dir(&self) -> &str {
        &self.daily_note_dir
    }

    /// Returns the file-name date format.
    #[must_use]
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Returns the label overrides.
    #[must_use]
    pub const fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Builds a heading registry for the configured language and labels.
    #[must_use]
    pub fn registry(&self) -> HeadingSpecRegistry {
        HeadingSpecRegistry::with_overrides(self.language, &self.labels)
    }

    /// Sets the heading language.
    ///
    /// Label overrides belong to a single language, so they are cleared when
    /// the language changes.
    ///
    /// Returns `true` if the language changed.
    pub fn set_language(&mut self, language: Language) -> bool {
        if self.language == language {
            false
        } else {
            self.language = language;
            self.labels.clear();
            true
        }
    }
}

fn default_daily_note_dir() -> String {
    "daily".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        language: Language,

        #[serde(default = "default_daily_note_dir")]
        daily_note_dir: String,

        #[serde(default = "default_date_format")]
        date_format: String,

        #[serde(default, skip_serializing_if = "LabelTable::is_empty")]
        labels: LabelTable,
    },
}

/// Checks that `format` names a file for every date.
///
/// `chrono` only reports bad specifiers (`%Q`) or time fields (`%H`) when
/// the date is formatted, so a sample date is formatted here.
fn check_date_format(format: &str) -> Result<(), String> {
    let mut stem = String::new();
    write!(stem, "{}", NaiveDate::default().format(format)).map_err(|_| {
        format!("Invalid date_format '{format}': expected chrono date fields such as %Y-%m-%d")
    })?;
    if stem.trim().is_empty() {
        return Err(format!("Invalid date_format '{format}': file names would be empty"));
    }
    Ok(())
}

impl TryFrom<Versions> for Config {
    type Error = String;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 {
                language,
                daily_note_dir,
                date_format,
                labels,
            } => {
                check_date_format(&date_format)?;
                Ok(Self {
                    language,
                    daily_note_dir,
                    date_format,
                    labels,
                })
            }
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            language: config.language,
            daily_note_dir: config.daily_note_dir,
            date_format: config.date_format,
            labels: config.labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use test_case::test_case;

    use super::*;
    use crate::domain::SectionKey;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            "_version = \"1\"\nlanguage = \"en\"\ndaily_note_dir = \"journal\"\ndate_format = \"%Y%m%d\"\n\n[labels]\n\"note.kpt\" = \"Retro\"\n"
                .as_bytes(),
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.language, Language::En);
        assert_eq!(config.daily_note_dir(), "journal");
        assert_eq!(config.date_format(), "%Y%m%d");
        assert_eq!(
            config.labels().get(&SectionKey::Kpt).map(String::as_str),
            Some("Retro")
        );
        assert_eq!(
            config.registry().display_label(SectionKey::Kpt),
            Some("Retro")
        );
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nlanguage = \"klingon\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_and_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dailynote.toml");

        let mut config = Config::default();
        config.set_language(Language::En);
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test_case("%Q"; "unknown specifier")]
    #[test_case("%Y-%m-%d %H:%M"; "time fields")]
    #[test_case(""; "empty")]
    fn invalid_date_format_is_rejected(format: &str) {
        let error = toml::from_str::<Config>(&format!("_version = \"1\"\ndate_format = \"{format}\"\n"))
            .unwrap_err();
        assert!(error.to_string().contains("Invalid date_format"));
    }

    #[test]
    fn nested_date_format_is_accepted() {
        let config: Config =
            toml::from_str("_version = \"1\"\ndate_format = \"%Y/%m/%Y-%m-%d\"\n").unwrap();
        assert_eq!(config.date_format(), "%Y/%m/%Y-%m-%d");
    }

    #[test]
    fn changing_language_clears_overrides() {
        let mut config: Config =
            toml::from_str("_version = \"1\"\n[labels]\n\"note.kpt\" = \"ふりかえり\"\n").unwrap();
        assert!(!config.set_language(Language::Ja));
        assert_eq!(config.labels().len(), 1);

        assert!(config.set_language(Language::En));
        assert!(config.labels().is_empty());
    }
}
