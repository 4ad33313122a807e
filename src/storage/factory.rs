use super::{ParsedSection, SectionParser};
use crate::domain::{
    DailyNote, DailyReport, HeadingSpecRegistry, NoteReview, Section, SectionKey, SectionList,
    TaskReview, heading::heading_suffix,
};

/// Builds [`DailyNote`]s from raw markdown.
#[derive(Debug, Clone)]
pub struct DailyNoteFactory {
    parser: SectionParser,
}

impl DailyNoteFactory {
    /// Creates a factory for the active labels of `registry`.
    #[must_use]
    pub fn new(registry: &HeadingSpecRegistry) -> Self {
        Self {
            parser: SectionParser::new(registry),
        }
    }

    /// Parses `raw` into a [`DailyNote`].
    ///
    /// Single sections map to the first matching heading, or to an absent
    /// section when there is none. Repeatable sections collect every match
    /// in source order. The daily report is additionally split into its
    /// reviewed notes.
    #[must_use]
    pub fn from_markdown(&self, raw: &str) -> DailyNote {
        let parsed = self.parser.parse(raw);

        let task_review = TaskReview::new(
            self.single(&parsed, SectionKey::TaskPlanned),
            self.single(&parsed, SectionKey::TaskTimelog),
            self.repeated(&parsed, SectionKey::TaskReview),
        );
        let note_review = NoteReview::new(
            self.single(&parsed, SectionKey::ReviewMemo),
            DailyReport::from_section(self.single(&parsed, SectionKey::DailyReport)),
            self.repeated(&parsed, SectionKey::Kpt),
        );

        DailyNote::new(raw, SectionParser::preamble(raw), task_review, note_review)
    }

    fn single(&self, parsed: &[ParsedSection], key: SectionKey) -> Section {
        let mut matches = parsed.iter().filter(|section| section.key == key);
        let Some(first) = matches.next() else {
            return Section::absent(key);
        };
        let ignored = matches.count();
        if ignored > 0 {
            tracing::warn!("Found {} extra '{key}' sections; keeping the first", ignored);
        }
        self.section(first)
    }

    fn repeated(&self, parsed: &[ParsedSection], key: SectionKey) -> SectionList {
        parsed
            .iter()
            .filter(|section| section.key == key)
            .map(|section| self.section(section))
            .collect()
    }

    fn section(&self, parsed: &ParsedSection) -> Section {
        let suffix = self
            .parser
            .label(parsed.key)
            .and_then(|label| heading_suffix(&parsed.heading_text, label))
            .unwrap_or_default();
        Section::new(parsed.key, parsed.body.as_str()).with_suffix(suffix)
    }
}
