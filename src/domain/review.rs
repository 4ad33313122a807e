//! Structured review data recovered from a daily report.

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

/// The classification of one review line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewLineKind {
    /// A checklist item marked done (`- [x] ...`).
    Checked,
    /// A checklist item left open (`- [ ] ...`).
    Unchecked,
    /// A bullet written by the user under the user-review sub-heading.
    #[serde(rename = "USERCOMMENT")]
    UserComment,
}

/// One classified line of review content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewLine {
    /// What kind of line this is.
    #[serde(rename = "type")]
    pub kind: ReviewLineKind,
    /// The line's text, without list or checkbox markers.
    pub text: NonEmptyString,
}

impl ReviewLine {
    /// Creates a review line, or `None` if `text` is blank.
    #[must_use]
    pub fn new(kind: ReviewLineKind, text: &str) -> Option<Self> {
        NonEmptyString::new(text.trim().to_string())
            .ok()
            .map(|text| Self { kind, text })
    }
}

/// A note reviewed in the daily report, with its lines in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewedNote {
    /// Vault path of the note (the wiki-link target, or the plain title).
    pub path: String,
    /// Display title of the note.
    pub title: String,
    /// Review lines in the order they appear.
    pub lines: Vec<ReviewLine>,
}

impl ReviewedNote {
    /// Creates a reviewed note with no lines.
    #[must_use]
    pub const fn new(path: String, title: String) -> Self {
        Self {
            path,
            title,
            lines: Vec::new(),
        }
    }

    /// Texts of the lines of `kind`, in order.
    pub fn texts(&self, kind: ReviewLineKind) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(move |line| line.kind == kind)
            .map(|line| line.text.as_str())
    }

    /// Texts of the checked checklist items.
    #[must_use]
    pub fn checked_summaries(&self) -> Vec<&str> {
        self.texts(ReviewLineKind::Checked).collect()
    }

    /// Texts of the unchecked checklist items.
    #[must_use]
    pub fn unchecked_summaries(&self) -> Vec<&str> {
        self.texts(ReviewLineKind::Unchecked).collect()
    }

    /// Texts of the user's comments.
    #[must_use]
    pub fn user_reviews(&self) -> Vec<&str> {
        self.texts(ReviewLineKind::UserComment).collect()
    }
}
