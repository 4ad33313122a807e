//! Domain models for daily notes.
//!
//! This module contains the language-independent section identities, the
//! localized heading registry, and the immutable document model.

/// Closed set of logical section identifiers.
pub mod section_key;
pub use section_key::{SectionKey, UnknownSectionKey};

/// Heading specifications, normalization and localized labels.
pub mod heading;
pub use heading::{HeadingSpec, HeadingSpecRegistry, LabelCache, NotFoundError};

/// Supported languages and their built-in label tables.
pub mod i18n;
pub use i18n::{LabelTable, Language};

mod section;
pub use section::{Section, SectionList};

mod review;
pub use review::{ReviewLine, ReviewLineKind, ReviewedNote};

mod daily_note;
pub use daily_note::{DailyNote, DailyReport, NoteReview, TaskReview};

mod config;
pub use config::Config;
