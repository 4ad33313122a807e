mod builder;
pub mod directory;
mod factory;
/// Loading and saving daily notes by date.
pub mod markdown;
mod parser;
mod path_parser;
mod review_extractor;
mod updater;

pub use builder::{
    BuildError, DailyNoteMarkdownBuilder, DailyReportMarkdownBuilder, HeadingBuilder,
    NoteSummaries, ReviewedNotesMarkdownBuilder, SummaryOptions, TagListMarkdownBuilder,
};
pub use directory::{FsNoteStore, NoteStore};
pub use factory::DailyNoteFactory;
pub use markdown::{DailyNoteRepository, LoadError};
pub use parser::{ParsedSection, SectionParser, heading_level, is_section_boundary};
pub use path_parser::{construct_path_from_date, parse_date_from_path};
pub use review_extractor::ReviewExtractor;
pub use updater::DailyNoteContentUpdater;
