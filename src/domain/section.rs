use std::sync::Arc;

use super::SectionKey;

/// One section of a daily note.
///
/// Sections are immutable values: every update returns a new instance, and
/// clones share their text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    key: SectionKey,
    body: Arc<str>,
    present: bool,
    suffix: Option<Arc<str>>,
}

impl Section {
    /// A section that was found in the source.
    #[must_use]
    pub fn new(key: SectionKey, body: impl Into<Arc<str>>) -> Self {
        Self {
            key,
            body: body.into(),
            present: true,
            suffix: None,
        }
    }

    /// A section that is absent from the source and is not rendered.
    #[must_use]
    pub fn absent(key: SectionKey) -> Self {
        Self {
            key,
            body: Arc::from(""),
            present: false,
            suffix: None,
        }
    }

    /// Returns a copy with the given heading suffix.
    ///
    /// The suffix is rendered verbatim after the label, e.g. `" (2026-01-03)"`.
    /// An empty suffix is the same as none.
    #[must_use]
    pub fn with_suffix(self, suffix: impl AsRef<str>) -> Self {
        let suffix = suffix.as_ref();
        Self {
            suffix: (!suffix.is_empty()).then(|| Arc::from(suffix)),
            ..self
        }
    }

    /// The section's key.
    #[must_use]
    pub const fn key(&self) -> SectionKey {
        self.key
    }

    /// The section's body, without its heading.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the section exists in the document.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.present
    }

    /// The heading suffix, if any.
    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Whether the body is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Returns a present copy of this section with its body replaced.
    #[must_use]
    pub fn replace_body(&self, text: impl Into<Arc<str>>) -> Self {
        Self {
            key: self.key,
            body: text.into(),
            present: true,
            suffix: self.suffix.clone(),
        }
    }

    /// Returns a present copy of this section with `text` appended as a new
    /// paragraph.
    #[must_use]
    pub fn append_body(&self, text: &str) -> Self {
        if self.body.is_empty() {
            self.replace_body(text)
        } else {
            self.replace_body(format!("{}\n\n{text}", self.body))
        }
    }
}

/// An ordered group of sections sharing a repeatable key.
///
/// Order is insertion order, which is also display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionList {
    sections: Arc<[Section]>,
}

impl Default for SectionList {
    fn default() -> Self {
        Self {
            sections: Arc::from(Vec::new()),
        }
    }
}

impl SectionList {
    /// An empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new list with `section` added at the end.
    #[must_use]
    pub fn append(&self, section: Section) -> Self {
        self.sections
            .iter()
            .cloned()
            .chain(std::iter::once(section))
            .collect()
    }

    /// Returns a new list with `f` applied to every section.
    #[must_use]
    pub fn map(&self, f: impl FnMut(&Section) -> Section) -> Self {
        self.sections.iter().map(f).collect()
    }

    /// Iterates over the sections in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// The section at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// The number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the list has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl FromIterator<Section> for SectionList {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SectionList {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
