use super::{BuildError, DailyNoteFactory, DailyNoteMarkdownBuilder};
use crate::domain::{DailyNote, HeadingSpecRegistry};

/// Applies a change to the markdown of a daily note.
///
/// The markdown is parsed, changed through the immutable document model and
/// rendered again. Applying the same updater to its own output with no
/// change is a no-op.
#[derive(Debug, Clone)]
pub struct DailyNoteContentUpdater<'a> {
    factory: DailyNoteFactory,
    builder: DailyNoteMarkdownBuilder<'a>,
}

impl<'a> DailyNoteContentUpdater<'a> {
    /// Creates an updater for the active labels of `registry`.
    #[must_use]
    pub fn new(registry: &'a HeadingSpecRegistry) -> Self {
        Self {
            factory: DailyNoteFactory::new(registry),
            builder: DailyNoteMarkdownBuilder::new(registry),
        }
    }

    /// Parses `raw`, applies `change`, and renders the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a section of the changed note has no label in the
    /// active language.
    pub fn update(
        &self,
        raw: &str,
        change: impl FnOnce(DailyNote) -> DailyNote,
    ) -> Result<String, BuildError> {
        let note = change(self.factory.from_markdown(raw));
        self.builder.build(&note)
    }

    /// Renders `raw` in canonical form without changing it.
    ///
    /// # Errors
    ///
    /// Returns an error if a present section has no label in the active
    /// language.
    pub fn normalize(&self, raw: &str) -> Result<String, BuildError> {
        self.update(raw, |note| note)
    }
}
