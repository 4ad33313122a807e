use std::sync::Arc;

use super::{ReviewedNote, Section, SectionKey, SectionList};
use crate::storage::ReviewExtractor;

/// The task half of a daily note: the plan, the time log and the reviews of
/// each logged period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReview {
    planned_task: Section,
    timelog: Section,
    time_logs: SectionList,
}

impl TaskReview {
    /// Assembles the task half of a note.
    #[must_use]
    pub const fn new(planned_task: Section, timelog: Section, time_logs: SectionList) -> Self {
        Self {
            planned_task,
            timelog,
            time_logs,
        }
    }

    /// The planned-task section.
    #[must_use]
    pub const fn planned_task(&self) -> &Section {
        &self.planned_task
    }

    /// The time-log section.
    #[must_use]
    pub const fn timelog(&self) -> &Section {
        &self.timelog
    }

    /// The task reviews, one per logged period, in document order.
    #[must_use]
    pub const fn time_logs(&self) -> &SectionList {
        &self.time_logs
    }
}

impl Default for TaskReview {
    fn default() -> Self {
        Self::new(
            Section::absent(SectionKey::TaskPlanned),
            Section::absent(SectionKey::TaskTimelog),
            SectionList::new(),
        )
    }
}

/// The daily report section together with the review data it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    section: Section,
    reviewed_notes: Arc<[ReviewedNote]>,
}

impl DailyReport {
    /// Wraps a report section, extracting its reviewed notes.
    #[must_use]
    pub fn from_section(section: Section) -> Self {
        let reviewed_notes = ReviewExtractor::extract(section.body()).into();
        Self {
            section,
            reviewed_notes,
        }
    }

    /// The report section itself.
    #[must_use]
    pub const fn section(&self) -> &Section {
        &self.section
    }

    /// Notes reviewed in the report, in document order.
    #[must_use]
    pub fn reviewed_notes(&self) -> &[ReviewedNote] {
        &self.reviewed_notes
    }
}

impl Default for DailyReport {
    fn default() -> Self {
        Self::from_section(Section::absent(SectionKey::DailyReport))
    }
}

/// The note half of a daily note: memo, daily report and KPT analyses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteReview {
    memo: Section,
    daily_report: DailyReport,
    kpts: SectionList,
}

impl NoteReview {
    /// Assembles the note half of a note.
    #[must_use]
    pub const fn new(memo: Section, daily_report: DailyReport, kpts: SectionList) -> Self {
        Self {
            memo,
            daily_report,
            kpts,
        }
    }

    /// The review memo section.
    #[must_use]
    pub const fn memo(&self) -> &Section {
        &self.memo
    }

    /// The daily report.
    #[must_use]
    pub const fn daily_report(&self) -> &DailyReport {
        &self.daily_report
    }

    /// The KPT analyses, in document order.
    #[must_use]
    pub const fn kpts(&self) -> &SectionList {
        &self.kpts
    }
}

impl Default for NoteReview {
    fn default() -> Self {
        Self::new(
            Section::absent(SectionKey::ReviewMemo),
            DailyReport::default(),
            SectionList::new(),
        )
    }
}

/// A complete daily note.
///
/// A `DailyNote` is never mutated. Each `with`/`append`/`update` method
/// returns a sibling note that shares every unchanged branch with this one.
/// Equality is structural and ignores the raw source text.
#[derive(Debug, Clone, Default)]
pub struct DailyNote {
    source: Arc<str>,
    preamble: Arc<str>,
    task_review: Arc<TaskReview>,
    note_review: Arc<NoteReview>,
}

impl PartialEq for DailyNote {
    fn eq(&self, other: &Self) -> bool {
        self.preamble == other.preamble
            && self.task_review == other.task_review
            && self.note_review == other.note_review
    }
}

impl Eq for DailyNote {}

impl DailyNote {
    /// Assembles a note from its parts.
    ///
    /// `source` is the raw markdown the note was read from, kept for
    /// reference; `preamble` is any text before the first section heading.
    #[must_use]
    pub fn new(
        source: impl Into<Arc<str>>,
        preamble: impl Into<Arc<str>>,
        task_review: TaskReview,
        note_review: NoteReview,
    ) -> Self {
        Self {
            source: source.into(),
            preamble: preamble.into(),
            task_review: Arc::new(task_review),
            note_review: Arc::new(note_review),
        }
    }

    /// The raw markdown this note was read from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Text preceding the first section (frontmatter, title).
    #[must_use]
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// The task half of the note.
    #[must_use]
    pub fn task_review(&self) -> &TaskReview {
        &self.task_review
    }

    /// The note half of the note.
    #[must_use]
    pub fn note_review(&self) -> &NoteReview {
        &self.note_review
    }

    /// The planned-task section.
    #[must_use]
    pub fn planned_task(&self) -> &Section {
        self.task_review.planned_task()
    }

    /// The time-log section.
    #[must_use]
    pub fn timelog(&self) -> &Section {
        self.task_review.timelog()
    }

    /// The task reviews, in document order.
    #[must_use]
    pub fn task_reviews(&self) -> &SectionList {
        self.task_review.time_logs()
    }

    /// The review memo section.
    #[must_use]
    pub fn review_memo(&self) -> &Section {
        self.note_review.memo()
    }

    /// The daily report.
    #[must_use]
    pub fn daily_report(&self) -> &DailyReport {
        self.note_review.daily_report()
    }

    /// The KPT analyses, in document order.
    #[must_use]
    pub fn kpts(&self) -> &SectionList {
        self.note_review.kpts()
    }

    fn with_task_review(&self, task_review: TaskReview) -> Self {
        Self {
            source: Arc::clone(&self.source),
            preamble: Arc::clone(&self.preamble),
            task_review: Arc::new(task_review),
            note_review: Arc::clone(&self.note_review),
        }
    }

    fn with_note_review(&self, note_review: NoteReview) -> Self {
        Self {
            source: Arc::clone(&self.source),
            preamble: Arc::clone(&self.preamble),
            task_review: Arc::clone(&self.task_review),
            note_review: Arc::new(note_review),
        }
    }

    /// Returns a note with the preamble replaced.
    #[must_use]
    pub fn with_preamble(&self, preamble: &str) -> Self {
        Self {
            preamble: Arc::from(preamble),
            ..self.clone()
        }
    }

    /// Returns a note with the planned-task body replaced.
    #[must_use]
    pub fn with_planned_task(&self, text: &str) -> Self {
        self.with_task_review(TaskReview {
            planned_task: self.planned_task().replace_body(text),
            ..self.task_review().clone()
        })
    }

    /// Returns a note with the time-log body replaced.
    #[must_use]
    pub fn with_timelog(&self, text: &str) -> Self {
        self.with_task_review(TaskReview {
            timelog: self.timelog().replace_body(text),
            ..self.task_review().clone()
        })
    }

    /// Returns a note with one more task review at the end.
    #[must_use]
    pub fn append_task_review(&self, body: &str, suffix: Option<&str>) -> Self {
        let section = Section::new(SectionKey::TaskReview, body).with_suffix(suffix.unwrap_or(""));
        self.with_task_review(TaskReview {
            time_logs: self.task_reviews().append(section),
            ..self.task_review().clone()
        })
    }

    /// Returns a note with the review memo body replaced.
    #[must_use]
    pub fn update_review_memo(&self, text: &str) -> Self {
        self.with_note_review(NoteReview {
            memo: self.review_memo().replace_body(text),
            ..self.note_review().clone()
        })
    }

    /// Returns a note with `text` appended to the review memo.
    #[must_use]
    pub fn append_review_memo(&self, text: &str) -> Self {
        self.with_note_review(NoteReview {
            memo: self.review_memo().append_body(text),
            ..self.note_review().clone()
        })
    }

    /// Returns a note whose daily report has the given body and suffix.
    ///
    /// The reviewed notes are re-extracted from the new body.
    #[must_use]
    pub fn with_daily_report(&self, body: &str, suffix: Option<&str>) -> Self {
        let section = Section::new(SectionKey::DailyReport, body).with_suffix(suffix.unwrap_or(""));
        self.with_note_review(NoteReview {
            daily_report: DailyReport::from_section(section),
            ..self.note_review().clone()
        })
    }

    /// Returns a note with one more KPT analysis at the end.
    #[must_use]
    pub fn append_kpt(&self, body: &str, suffix: Option<&str>) -> Self {
        let section = Section::new(SectionKey::Kpt, body).with_suffix(suffix.unwrap_or(""));
        self.with_note_review(NoteReview {
            kpts: self.kpts().append(section),
            ..self.note_review().clone()
        })
    }
}
