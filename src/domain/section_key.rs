use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A logical section identifier.
///
/// Section identity is language independent: the heading text of a section
/// is localized, but its key is not. Variants are declared in canonical
/// document order, which is also their [`Ord`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SectionKey {
    /// Tasks planned for the day.
    #[serde(rename = "task.planned")]
    TaskPlanned,
    /// Free-form time log and memo.
    #[serde(rename = "task.timelog")]
    TaskTimelog,
    /// A review of one time-log period. Repeatable.
    #[serde(rename = "task.review")]
    TaskReview,
    /// The human-written review memo.
    #[serde(rename = "note.review.memo")]
    ReviewMemo,
    /// The daily report of reviewed notes.
    #[serde(rename = "note.report")]
    DailyReport,
    /// Sub-heading introducing the reviewed notes inside the daily report.
    #[serde(rename = "note.report.reviewed")]
    ReviewedNotes,
    /// Sub-heading introducing a user's comments on one reviewed note.
    #[serde(rename = "note.report.user_review")]
    UserReview,
    /// Tag list inside the daily report.
    #[serde(rename = "note.report.tags")]
    TagList,
    /// Tags used in notes but not registered anywhere.
    #[serde(rename = "note.report.unregistered_tags")]
    UnregisteredTags,
    /// A Keep/Problem/Try analysis. Repeatable.
    #[serde(rename = "note.kpt")]
    Kpt,
}

impl SectionKey {
    /// Every key, in canonical order.
    pub const ALL: [Self; 10] = [
        Self::TaskPlanned,
        Self::TaskTimelog,
        Self::TaskReview,
        Self::ReviewMemo,
        Self::DailyReport,
        Self::ReviewedNotes,
        Self::UserReview,
        Self::TagList,
        Self::UnregisteredTags,
        Self::Kpt,
    ];

    /// The dotted identifier of this key, e.g. `task.planned`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskPlanned => "task.planned",
            Self::TaskTimelog => "task.timelog",
            Self::TaskReview => "task.review",
            Self::ReviewMemo => "note.review.memo",
            Self::DailyReport => "note.report",
            Self::ReviewedNotes => "note.report.reviewed",
            Self::UserReview => "note.report.user_review",
            Self::TagList => "note.report.tags",
            Self::UnregisteredTags => "note.report.unregistered_tags",
            Self::Kpt => "note.kpt",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = UnknownSectionKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSectionKey(s.to_string()))
    }
}

impl TryFrom<&str> for SectionKey {
    type Error = UnknownSectionKey;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

/// Error returned when a dotted string names no known section.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown section key '{0}'")]
pub struct UnknownSectionKey(pub String);
