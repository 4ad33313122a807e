//! Rendering the document model back to markdown.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    DailyNote, HeadingSpecRegistry, Language, ReviewLineKind, ReviewedNote, Section, SectionKey,
};

static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank line pattern is valid"));

/// Errors that can occur when rendering markdown.
///
/// These indicate a defect in the label configuration rather than in the
/// document, and should not be swallowed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BuildError {
    /// The active language has no label for a section.
    #[error("No label for section '{key}' in language '{language}'")]
    MissingLabel {
        /// The section whose heading was requested.
        key: SectionKey,
        /// The active language.
        language: Language,
    },
}

/// Collapses runs of blank lines and ends the text with exactly one newline.
fn finalize(text: &str) -> String {
    let collapsed = EXCESS_BLANK_LINES.replace_all(text, "\n\n");
    format!("{}\n", collapsed.trim_end())
}

/// Renders section headings from the registry.
#[derive(Debug, Clone, Copy)]
pub struct HeadingBuilder<'a> {
    registry: &'a HeadingSpecRegistry,
}

impl<'a> HeadingBuilder<'a> {
    /// Creates a heading builder for the active labels of `registry`.
    #[must_use]
    pub const fn new(registry: &'a HeadingSpecRegistry) -> Self {
        Self { registry }
    }

    /// Renders the heading line of `key`, e.g. `## ✅ 今日の予定タスク`.
    ///
    /// `suffix` is appended verbatim after the label.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingLabel`] if the active language has no
    /// label for `key`.
    pub fn create(&self, key: SectionKey, suffix: Option<&str>) -> Result<String, BuildError> {
        let spec = HeadingSpecRegistry::spec(key);
        let label = self
            .registry
            .display_label(key)
            .ok_or(BuildError::MissingLabel {
                key,
                language: self.registry.language(),
            })?;

        let mut heading = "#".repeat(usize::from(spec.level));
        heading.push(' ');
        if let Some(emoji) = spec.emoji {
            heading.push_str(emoji);
            heading.push(' ');
        }
        heading.push_str(label);
        heading.push_str(suffix.unwrap_or_default());
        Ok(heading)
    }

    fn section(&self, section: &Section) -> Result<String, BuildError> {
        let heading = self.create(section.key(), section.suffix())?;
        Ok(format!("{heading}\n\n{}\n", section.body().trim()))
    }
}

/// Renders a whole [`DailyNote`].
#[derive(Debug, Clone, Copy)]
pub struct DailyNoteMarkdownBuilder<'a> {
    headings: HeadingBuilder<'a>,
}

impl<'a> DailyNoteMarkdownBuilder<'a> {
    /// Creates a builder for the active labels of `registry`.
    #[must_use]
    pub const fn new(registry: &'a HeadingSpecRegistry) -> Self {
        Self {
            headings: HeadingBuilder::new(registry),
        }
    }

    /// Renders `note` in canonical section order.
    ///
    /// The preamble comes first. Absent sections are omitted entirely;
    /// present sections are rendered as heading, blank line, trimmed body.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingLabel`] if a present section has no label
    /// in the active language.
    pub fn build(&self, note: &DailyNote) -> Result<String, BuildError> {
        let sections = std::iter::once(note.planned_task())
            .chain(std::iter::once(note.timelog()))
            .chain(note.task_reviews())
            .chain(std::iter::once(note.review_memo()))
            .chain(std::iter::once(note.daily_report().section()))
            .chain(note.kpts());

        let mut parts = Vec::new();
        if !note.preamble().trim().is_empty() {
            parts.push(format!("{}\n", note.preamble().trim()));
        }
        for section in sections.filter(|section| section.is_present()) {
            parts.push(self.headings.section(section)?);
        }

        Ok(finalize(&parts.join("\n")))
    }
}

/// Options passed to [`NoteSummaries::summary_markdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Include checklist items that are still open.
    pub include_unchecked: bool,
    /// Include the user-review sub-sections.
    pub include_user_reviews: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            include_unchecked: true,
            include_user_reviews: true,
        }
    }
}

/// Source of per-note summaries and tags for the daily report.
///
/// Implemented outside this crate by whatever collects the day's notes.
pub trait NoteSummaries {
    /// Checklist-formatted summaries of the reviewed notes.
    fn summary_markdown(&self, options: &SummaryOptions) -> String;

    /// Every tag used by the reviewed notes.
    fn all_tags(&self) -> Vec<String>;

    /// Tags used by the reviewed notes that are not registered.
    fn all_unregistered_tags(&self) -> Vec<String>;
}

/// Renders [`ReviewedNote`]s in the form [`super::ReviewExtractor`] reads.
#[derive(Debug, Clone, Copy)]
pub struct ReviewedNotesMarkdownBuilder<'a> {
    headings: HeadingBuilder<'a>,
}

impl<'a> ReviewedNotesMarkdownBuilder<'a> {
    /// Creates a builder for the active labels of `registry`.
    #[must_use]
    pub const fn new(registry: &'a HeadingSpecRegistry) -> Self {
        Self {
            headings: HeadingBuilder::new(registry),
        }
    }

    /// Renders `notes`, keeping every note's lines in order.
    ///
    /// The user-review sub-heading is emitted before the first user comment
    /// of a note; checklist items after it keep their checkboxes.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingLabel`] if a note has user comments and
    /// the user-review label is missing.
    pub fn build(&self, notes: &[ReviewedNote]) -> Result<String, BuildError> {
        let mut out = String::new();
        for note in notes {
            out.push_str(&format!("##### [[{}|{}]]\n\n", note.path, note.title));

            let mut in_comments = false;
            for line in &note.lines {
                match line.kind {
                    ReviewLineKind::Checked => out.push_str(&format!("- [x] {}\n", line.text)),
                    ReviewLineKind::Unchecked => out.push_str(&format!("- [ ] {}\n", line.text)),
                    ReviewLineKind::UserComment => {
                        if !in_comments {
                            let heading = self.headings.create(SectionKey::UserReview, None)?;
                            out.push_str(&format!("\n{heading}\n\n"));
                            in_comments = true;
                        }
                        out.push_str(&format!("- {}\n", line.text));
                    }
                }
            }
            out.push('\n');
        }
        Ok(finalize(&out))
    }
}

/// Renders the tag lists of the daily report.
#[derive(Debug, Clone, Copy)]
pub struct TagListMarkdownBuilder<'a> {
    headings: HeadingBuilder<'a>,
}

impl<'a> TagListMarkdownBuilder<'a> {
    /// Creates a builder for the active labels of `registry`.
    #[must_use]
    pub const fn new(registry: &'a HeadingSpecRegistry) -> Self {
        Self {
            headings: HeadingBuilder::new(registry),
        }
    }

    /// Renders every tag, then any unregistered tags, as `- #tag` bullets.
    ///
    /// Returns an empty string when there are no tags at all.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingLabel`] if a needed label is missing.
    pub fn build(&self, summaries: &dyn NoteSummaries) -> Result<String, BuildError> {
        let mut parts = Vec::new();
        for (key, tags) in [
            (SectionKey::TagList, summaries.all_tags()),
            (SectionKey::UnregisteredTags, summaries.all_unregistered_tags()),
        ] {
            if tags.is_empty() {
                continue;
            }
            let heading = self.headings.create(key, None)?;
            let bullets: Vec<_> = tags.iter().map(|tag| tag_bullet(tag)).collect();
            parts.push(format!("{heading}\n\n{}\n", bullets.join("\n")));
        }

        if parts.is_empty() {
            return Ok(String::new());
        }
        Ok(finalize(&parts.join("\n")))
    }
}

fn tag_bullet(tag: &str) -> String {
    let tag = tag.trim();
    if tag.starts_with('#') {
        format!("- {tag}")
    } else {
        format!("- #{tag}")
    }
}

/// Renders the body of the daily report section.
#[derive(Debug, Clone, Copy)]
pub struct DailyReportMarkdownBuilder<'a> {
    headings: HeadingBuilder<'a>,
    tags: TagListMarkdownBuilder<'a>,
}

impl<'a> DailyReportMarkdownBuilder<'a> {
    /// Creates a builder for the active labels of `registry`.
    #[must_use]
    pub const fn new(registry: &'a HeadingSpecRegistry) -> Self {
        Self {
            headings: HeadingBuilder::new(registry),
            tags: TagListMarkdownBuilder::new(registry),
        }
    }

    /// Renders the reviewed-notes sub-section followed by the tag lists.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingLabel`] if a needed label is missing.
    pub fn build(
        &self,
        summaries: &dyn NoteSummaries,
        options: &SummaryOptions,
    ) -> Result<String, BuildError> {
        let heading = self.headings.create(SectionKey::ReviewedNotes, None)?;
        let summary = summaries.summary_markdown(options);
        let tags = self.tags.build(summaries)?;

        Ok(finalize(&format!(
            "{heading}\n\n{}\n\n{tags}",
            summary.trim()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{LabelTable, NoteReview, ReviewLine, SectionList, TaskReview},
        storage::ReviewExtractor,
    };

    struct FixedSummaries {
        tags: Vec<String>,
        unregistered: Vec<String>,
    }

    impl NoteSummaries for FixedSummaries {
        fn summary_markdown(&self, options: &SummaryOptions) -> String {
            if options.include_unchecked {
                "##### [[a|A]]\n\n- [x] done\n- [ ] open\n".to_string()
            } else {
                "##### [[a|A]]\n\n- [x] done\n".to_string()
            }
        }

        fn all_tags(&self) -> Vec<String> {
            self.tags.clone()
        }

        fn all_unregistered_tags(&self) -> Vec<String> {
            self.unregistered.clone()
        }
    }

    fn registry() -> HeadingSpecRegistry {
        HeadingSpecRegistry::new(Language::Ja)
    }

    #[test]
    fn heading_includes_level_emoji_label_and_suffix() {
        let registry = registry();
        let headings = HeadingBuilder::new(&registry);

        assert_eq!(
            headings.create(SectionKey::TaskPlanned, None).unwrap(),
            "## ✅ 今日の予定タスク"
        );
        assert_eq!(
            headings
                .create(SectionKey::TaskReview, Some(" (2026-01-03)"))
                .unwrap(),
            "### タスク振り返り (2026-01-03)"
        );
        assert_eq!(
            headings.create(SectionKey::UserReview, None).unwrap(),
            "###### 💬 ユーザーレビュー"
        );
    }

    #[test]
    fn missing_label_is_an_error() {
        let mut registry = registry();
        registry.rebuild_labels(
            Language::En,
            &LabelTable::from([(SectionKey::Kpt, String::new())]),
        );
        let error = HeadingBuilder::new(&registry)
            .create(SectionKey::Kpt, None)
            .unwrap_err();

        assert_eq!(
            error,
            BuildError::MissingLabel {
                key: SectionKey::Kpt,
                language: Language::En
            }
        );
        assert_eq!(
            error.to_string(),
            "No label for section 'note.kpt' in language 'en'"
        );
    }

    #[test]
    fn absent_sections_are_omitted() {
        let registry = registry();
        let note = DailyNote::default().update_review_memo("memo");

        let markdown = DailyNoteMarkdownBuilder::new(&registry).build(&note).unwrap();
        assert_eq!(markdown, "## 🙌 振り返りメモ\n\nmemo\n");
    }

    #[test]
    fn sections_render_in_canonical_order() {
        let registry = registry();
        let note = DailyNote::new(
            "",
            "# 2026-01-03",
            TaskReview::new(
                Section::new(SectionKey::TaskPlanned, "- [ ] plan"),
                Section::new(SectionKey::TaskTimelog, "\n\n09:00 start\n\n"),
                SectionList::new(),
            ),
            NoteReview::default(),
        )
        .append_kpt("K1", None)
        .update_review_memo("memo")
        .append_task_review("R1", Some(" (2026-01-03)"));

        let markdown = DailyNoteMarkdownBuilder::new(&registry).build(&note).unwrap();
        assert_eq!(
            markdown,
            "\
# 2026-01-03

## ✅ 今日の予定タスク

- [ ] plan

## 🕒 タイムログ／メモ

09:00 start

### タスク振り返り (2026-01-03)

R1

## 🙌 振り返りメモ

memo

## 🧠 KPT分析

K1
"
        );
    }

    #[test]
    fn collapses_blank_lines() {
        assert_eq!(finalize("a\n\n\n\nb\n\n\n"), "a\n\nb\n");
        assert_eq!(finalize(""), "\n");
    }

    #[test]
    fn empty_present_section_keeps_its_heading() {
        let registry = registry();
        let note = DailyNote::default().with_planned_task("");
        let markdown = DailyNoteMarkdownBuilder::new(&registry).build(&note).unwrap();
        assert_eq!(markdown, "## ✅ 今日の予定タスク\n");
    }

    #[test]
    fn reviewed_notes_round_trip_through_extractor() {
        let registry = registry();
        let mut note = ReviewedNote::new("_project/A".to_string(), "A".to_string());
        note.lines = [
            (ReviewLineKind::Checked, "done A"),
            (ReviewLineKind::UserComment, "review A"),
            (ReviewLineKind::Unchecked, "open B"),
            (ReviewLineKind::UserComment, "review B"),
        ]
        .into_iter()
        .filter_map(|(kind, text)| ReviewLine::new(kind, text))
        .collect();

        let markdown = ReviewedNotesMarkdownBuilder::new(&registry)
            .build(std::slice::from_ref(&note))
            .unwrap();

        assert_eq!(
            markdown,
            "##### [[_project/A|A]]\n\n- [x] done A\n\n###### 💬 ユーザーレビュー\n\n- review A\n- [ ] open B\n- review B\n"
        );
        assert_eq!(ReviewExtractor::extract(&markdown), vec![note]);
    }

    #[test]
    fn tag_list_renders_both_groups() {
        let registry = registry();
        let summaries = FixedSummaries {
            tags: vec!["rust".to_string(), "#daily".to_string()],
            unregistered: vec!["new".to_string()],
        };

        let markdown = TagListMarkdownBuilder::new(&registry)
            .build(&summaries)
            .unwrap();
        assert_eq!(
            markdown,
            "#### 🔖 タグ一覧\n\n- #rust\n- #daily\n\n#### 🆕 未登録タグ\n\n- #new\n"
        );
    }

    #[test]
    fn tag_list_is_empty_without_tags() {
        let registry = registry();
        let summaries = FixedSummaries {
            tags: vec![],
            unregistered: vec![],
        };
        assert_eq!(
            TagListMarkdownBuilder::new(&registry)
                .build(&summaries)
                .unwrap(),
            ""
        );
    }

    #[test]
    fn daily_report_consults_summaries() {
        let registry = registry();
        let summaries = FixedSummaries {
            tags: vec!["rust".to_string()],
            unregistered: vec![],
        };
        let options = SummaryOptions {
            include_unchecked: false,
            ..SummaryOptions::default()
        };

        let body = DailyReportMarkdownBuilder::new(&registry)
            .build(&summaries, &options)
            .unwrap();

        assert_eq!(
            body,
            "#### 📄 レビュー済みノート\n\n##### [[a|A]]\n\n- [x] done\n\n#### 🔖 タグ一覧\n\n- #rust\n"
        );
        let notes = ReviewExtractor::extract(&body);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].checked_summaries(), ["done"]);
    }
}
