//! Splitting a markdown document into typed sections.
//!
//! Only level 2 and 3 headings delimit sections. Deeper headings, and
//! anything that is not a heading, are body text of the enclosing section.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    HeadingSpecRegistry, SectionKey,
    heading::{is_boundary_level, normalize},
};

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("heading pattern is valid"));

/// Returns the level and text of a markdown heading line.
///
/// A heading needs whitespace after its `#` markers; `#tag` is body text.
#[must_use]
pub fn heading_level(line: &str) -> Option<(usize, &str)> {
    let captures = HEADING.captures(line)?;
    let level = captures.get(1)?.as_str().len();
    let text = captures.get(2)?.as_str();
    Some((level, text))
}

/// Whether `line` is a section boundary: a level 2 or 3 heading.
#[must_use]
pub fn is_section_boundary(line: &str) -> bool {
    heading_level(line).is_some_and(|(level, _)| is_boundary_level(level))
}

/// One section as found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSection {
    /// The section's key.
    pub key: SectionKey,
    /// The heading text after the `#` markers, as written.
    pub heading_text: String,
    /// The heading level.
    pub level: usize,
    /// Text between this heading and the next boundary, trimmed.
    pub body: String,
}

/// Splits markdown into [`ParsedSection`]s using localized labels.
///
/// A boundary heading opens a section when a label is a prefix of its
/// normalized text, so headings may carry dynamic suffixes such as dates.
/// When several labels match, the longest wins.
#[derive(Debug, Clone)]
pub struct SectionParser {
    labels: Vec<(SectionKey, String)>,
}

impl SectionParser {
    /// Creates a parser for the active labels of `registry`.
    #[must_use]
    pub fn new(registry: &HeadingSpecRegistry) -> Self {
        Self::from_labels(registry.boundary_labels())
    }

    /// Creates a parser from explicit labels.
    ///
    /// Labels are normalized here; labels of non-boundary sections and
    /// labels that normalize to nothing are ignored.
    #[must_use]
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = (SectionKey, S)>,
        S: AsRef<str>,
    {
        let mut labels: Vec<_> = labels
            .into_iter()
            .filter(|(key, _)| HeadingSpecRegistry::spec(*key).is_boundary())
            .map(|(key, label)| (key, normalize(label.as_ref())))
            .filter(|(_, label)| !label.is_empty())
            .collect();
        labels.sort_by(|(key_a, label_a), (key_b, label_b)| {
            label_b.len().cmp(&label_a.len()).then(key_a.cmp(key_b))
        });
        Self { labels }
    }

    /// The key whose label best matches `heading_text`, if any.
    #[must_use]
    pub fn resolve(&self, heading_text: &str) -> Option<SectionKey> {
        let normalized = normalize(heading_text);
        self.labels
            .iter()
            .find(|(_, label)| normalized.starts_with(label.as_str()))
            .map(|(key, _)| *key)
    }

    /// The normalized label this parser uses for `key`.
    #[must_use]
    pub fn label(&self, key: SectionKey) -> Option<&str> {
        self.labels
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, label)| label.as_str())
    }

    /// Splits `markdown` into sections, in source order.
    ///
    /// Repeated keys produce repeated entries. Lines outside any recognized
    /// section are dropped, as is the text of unrecognized boundary headings.
    #[must_use]
    pub fn parse(&self, markdown: &str) -> Vec<ParsedSection> {
        let mut sections = Vec::new();
        let mut current: Option<(ParsedSection, Vec<&str>)> = None;

        for line in markdown.lines() {
            match heading_level(line) {
                Some((level, text)) if is_boundary_level(level) => {
                    if let Some(open) = current.take() {
                        sections.push(close(open));
                    }
                    current = self.resolve(text).map(|key| {
                        let section = ParsedSection {
                            key,
                            heading_text: text.trim().to_string(),
                            level,
                            body: String::new(),
                        };
                        (section, Vec::new())
                    });
                    if current.is_none() {
                        tracing::trace!("Ignoring unrecognised heading '{text}'");
                    }
                }
                _ => {
                    if let Some((_, body)) = current.as_mut() {
                        body.push(line);
                    }
                }
            }
        }

        if let Some(open) = current.take() {
            sections.push(close(open));
        }

        tracing::debug!("Parsed {} sections", sections.len());
        sections
    }

    /// The text before the first boundary heading, trimmed.
    #[must_use]
    pub fn preamble(markdown: &str) -> &str {
        let mut end = 0;
        for line in markdown.split_inclusive('\n') {
            if is_section_boundary(line.trim_end_matches(['\r', '\n'])) {
                break;
            }
            end += line.len();
        }
        markdown[..end].trim()
    }
}

fn close((mut section, body): (ParsedSection, Vec<&str>)) -> ParsedSection {
    section.body = body.join("\n").trim().to_string();
    section
}
