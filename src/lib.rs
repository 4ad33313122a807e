//! Structured Daily Notes
//!
//! A daily note is a markdown document made of conventionally ordered
//! sections (planned tasks, time logs, reviews, KPT retrospectives). This
//! crate parses those sections under a localized heading schema, exposes an
//! immutable document model, and regenerates the markdown deterministically.

pub mod domain;
pub use domain::{
    Config, DailyNote, DailyReport, HeadingSpec, HeadingSpecRegistry, Language, NoteReview,
    ReviewLine, ReviewLineKind, ReviewedNote, Section, SectionKey, SectionList, TaskReview,
};

/// Markdown parsing, rendering and persistence of daily notes.
pub mod storage;
pub use storage::{
    DailyNoteFactory, DailyNoteMarkdownBuilder, DailyNoteRepository, FsNoteStore, NoteStore,
    ReviewExtractor, SectionParser,
};
