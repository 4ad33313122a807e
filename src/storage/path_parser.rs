//! Path utilities for daily notes
//!
//! A daily note lives at `root/<daily_note_dir>/<date>.md`, where the file
//! stem is the date formatted with the configured `chrono` format string.
//!
//! - Example: `%Y-%m-%d` → `daily/2026-01-03.md`
//! - Example: `%Y/%m/%Y-%m-%d` → `daily/2026/01/2026-01-03.md`

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// Construct the file path of the daily note for `date`.
///
/// # Arguments
///
/// * `root` - The root directory of the vault
/// * `daily_note_dir` - Directory of daily notes, relative to `root`
/// * `date_format` - `chrono` format string for the file path stem. It must
///   only use date fields; a deserialized [`crate::Config`] always does.
#[must_use]
pub fn construct_path_from_date(
    root: &Path,
    daily_note_dir: &str,
    date_format: &str,
    date: NaiveDate,
) -> PathBuf {
    let stem = date.format(date_format).to_string();
    let mut path = root.join(daily_note_dir);
    path.push(format!("{stem}.md"));
    path
}

/// Parse the date of a daily note from its path.
///
/// Returns `None` if the path is not a markdown file inside the daily note
/// directory, or if its name does not match `date_format`.
#[must_use]
pub fn parse_date_from_path(
    path: &Path,
    root: &Path,
    daily_note_dir: &str,
    date_format: &str,
) -> Option<NaiveDate> {
    let rel_path = path.strip_prefix(root.join(daily_note_dir)).ok()?;
    if rel_path.extension()? != "md" {
        return None;
    }
    let stem = rel_path.with_extension("");
    let stem = stem
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?
        .join("/");

    NaiveDate::parse_from_str(&stem, date_format).ok()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()
    }

    #[test_case("%Y-%m-%d", "vault/daily/2026-01-03.md"; "flat")]
    #[test_case("%Y/%m/%Y-%m-%d", "vault/daily/2026/01/2026-01-03.md"; "nested by month")]
    fn constructs_path(format: &str, expected: &str) {
        let path = construct_path_from_date(Path::new("vault"), "daily", format, date());
        assert_eq!(path, PathBuf::from(expected));
    }

    #[test_case("%Y-%m-%d"; "flat")]
    #[test_case("%Y/%m/%Y-%m-%d"; "nested by month")]
    fn parses_constructed_path(format: &str) {
        let root = Path::new("vault");
        let path = construct_path_from_date(root, "daily", format, date());
        assert_eq!(parse_date_from_path(&path, root, "daily", format), Some(date()));
    }

    #[test]
    fn rejects_other_files() {
        let root = Path::new("vault");
        let format = "%Y-%m-%d";
        assert_eq!(
            parse_date_from_path(Path::new("vault/daily/notes.md"), root, "daily", format),
            None
        );
        assert_eq!(
            parse_date_from_path(Path::new("vault/daily/2026-01-03.txt"), root, "daily", format),
            None
        );
        assert_eq!(
            parse_date_from_path(Path::new("vault/other/2026-01-03.md"), root, "daily", format),
            None
        );
    }
}
