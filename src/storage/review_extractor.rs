//! Recovering structured review data from a rendered daily report.
//!
//! The report mixes generated checklists with free-text user comments:
//!
//! ```markdown
//! ##### [[_project/A|A]]
//!
//! - [x] done A
//! - [ ] still open
//!
//! ###### 💬 ユーザーレビュー
//!
//! - review A
//! ```
//!
//! Each note heading starts a [`ReviewedNote`]; checklist items become
//! checked/unchecked lines and bullets under the level 6 sub-heading become
//! user comments, all in source order.

use std::sync::LazyLock;

use regex::Regex;

use super::parser::heading_level;
use crate::domain::{ReviewLine, ReviewLineKind, ReviewedNote};

static NOTE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#{4,6}\s+\[\[([^|\]]+)(?:\|([^\]]+))?\]\]").expect("note link pattern is valid")
});

static CHECKBOX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-\s*\[([ xX])\]\s+(.+)$").expect("checkbox pattern is valid")
});

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*]\s*(.*)$").expect("bullet pattern is valid"));

static CHECKBOX_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[^\]]?\]").expect("checkbox marker pattern is valid"));

const NOTE_LEVEL: usize = 5;
const USER_REVIEW_LEVEL: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Checklist,
    UserComment,
}

/// Extracts [`ReviewedNote`]s from daily-report markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewExtractor;

impl ReviewExtractor {
    /// Extracts the reviewed notes of `markdown`, in source order.
    ///
    /// Notes without any lines are dropped. Lines that fit no pattern are
    /// ignored rather than reported.
    #[must_use]
    pub fn extract(markdown: &str) -> Vec<ReviewedNote> {
        let mut notes = Vec::new();
        let mut current: Option<ReviewedNote> = None;
        let mut mode = Mode::Checklist;

        for line in markdown.lines() {
            if let Some((level, text)) = heading_level(line) {
                if let Some(note) = note_from_link(line) {
                    flush(&mut notes, current.replace(note));
                    mode = Mode::Checklist;
                } else if level == NOTE_LEVEL {
                    let title = text.trim().to_string();
                    flush(&mut notes, current.replace(ReviewedNote::new(title.clone(), title)));
                    mode = Mode::Checklist;
                } else if level == USER_REVIEW_LEVEL && current.is_some() {
                    mode = Mode::UserComment;
                } else {
                    flush(&mut notes, current.take());
                }
                continue;
            }

            let Some(note) = current.as_mut() else {
                continue;
            };

            if let Some(line) = checklist_line(line) {
                note.lines.push(line);
            } else if mode == Mode::UserComment {
                if let Some(line) = comment_line(line) {
                    note.lines.push(line);
                }
            }
        }
        flush(&mut notes, current);

        tracing::debug!("Extracted {} reviewed notes", notes.len());
        notes
    }
}

fn flush(notes: &mut Vec<ReviewedNote>, note: Option<ReviewedNote>) {
    if let Some(note) = note.filter(|note| !note.lines.is_empty()) {
        notes.push(note);
    }
}

fn note_from_link(line: &str) -> Option<ReviewedNote> {
    let captures = NOTE_LINK.captures(line)?;
    let path = captures.get(1)?.as_str().trim().to_string();
    let title = captures.get(2).map_or_else(
        || path.rsplit('/').next().unwrap_or(&path).to_string(),
        |title| title.as_str().trim().to_string(),
    );
    Some(ReviewedNote::new(path, title))
}

fn checklist_line(line: &str) -> Option<ReviewLine> {
    let captures = CHECKBOX.captures(line)?;
    let kind = if captures.get(1)?.as_str() == " " {
        ReviewLineKind::Unchecked
    } else {
        ReviewLineKind::Checked
    };
    ReviewLine::new(kind, captures.get(2)?.as_str())
}

// Checkbox-shaped bullets that are not valid checklist items (empty, or
// missing the space after the marker) are not comments either.
fn comment_line(line: &str) -> Option<ReviewLine> {
    let text = BULLET.captures(line)?.get(1)?.as_str();
    if CHECKBOX_MARKER.is_match(text) {
        return None;
    }
    ReviewLine::new(ReviewLineKind::UserComment, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(note: &ReviewedNote) -> Vec<(ReviewLineKind, &str)> {
        note.lines
            .iter()
            .map(|line| (line.kind, line.text.as_str()))
            .collect()
    }

    #[test]
    fn preserves_interleaved_line_order() {
        let markdown = "\
##### [[_project/A|Project A]]

- [x] first
- [ ] second
- [X] third

###### 💬 ユーザーレビュー

- comment one
- [ ] late item
- comment two
";
        let notes = ReviewExtractor::extract(markdown);

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].path, "_project/A");
        assert_eq!(notes[0].title, "Project A");
        assert_eq!(
            kinds_and_texts(&notes[0]),
            vec![
                (ReviewLineKind::Checked, "first"),
                (ReviewLineKind::Unchecked, "second"),
                (ReviewLineKind::Checked, "third"),
                (ReviewLineKind::UserComment, "comment one"),
                (ReviewLineKind::Unchecked, "late item"),
                (ReviewLineKind::UserComment, "comment two"),
            ]
        );
    }

    #[test]
    fn empty_notes_are_dropped() {
        let markdown = "\
##### [[empty|Empty]]

##### [[full|Full]]
- [x] done
";
        let notes = ReviewExtractor::extract(markdown);

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].path, "full");
    }

    #[test]
    fn placeholder_bullet_is_skipped() {
        let markdown = "##### [[a|A]]\n- [x] done\n###### ユーザーレビュー\n- \n-\n";
        let notes = ReviewExtractor::extract(markdown);

        assert_eq!(
            kinds_and_texts(&notes[0]),
            vec![(ReviewLineKind::Checked, "done")]
        );
    }

    #[test]
    fn malformed_checkboxes_are_not_comments() {
        let markdown = "##### [[a|A]]\n- [x] done\n###### ユーザーレビュー\n- [ ] \n- [x]done\n";
        let notes = ReviewExtractor::extract(markdown);

        assert_eq!(
            kinds_and_texts(&notes[0]),
            vec![(ReviewLineKind::Checked, "done")]
        );
    }

    #[test]
    fn unchecked_placeholder_under_comments_is_skipped() {
        let markdown = "\
##### [[a|A]]
###### 💬 ユーザーレビュー
- [ ]
- [-] cancelled
- real comment
";
        let notes = ReviewExtractor::extract(markdown);

        assert_eq!(
            kinds_and_texts(&notes[0]),
            vec![(ReviewLineKind::UserComment, "real comment")]
        );
    }

    #[test]
    fn plain_text_note_heading() {
        let notes = ReviewExtractor::extract("##### Meeting notes\n- [ ] follow up\n");

        assert_eq!(notes[0].path, "Meeting notes");
        assert_eq!(notes[0].title, "Meeting notes");
        assert_eq!(notes[0].unchecked_summaries(), ["follow up"]);
    }

    #[test]
    fn link_without_alias_uses_file_name() {
        let notes = ReviewExtractor::extract("##### [[_project/A]]\n- [x] done A\n");

        assert_eq!(notes[0].path, "_project/A");
        assert_eq!(notes[0].title, "A");
    }

    #[test]
    fn bullets_outside_comment_mode_are_ignored() {
        let notes = ReviewExtractor::extract("##### [[a|A]]\n- stray\n- [x] kept\n");
        assert_eq!(kinds_and_texts(&notes[0]), vec![(ReviewLineKind::Checked, "kept")]);
    }

    #[test]
    fn section_heading_closes_note() {
        let markdown = "##### [[a|A]]\n- [x] done\n#### 🔖 タグ一覧\n- [x] not a review\n";
        let notes = ReviewExtractor::extract(markdown);

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].checked_summaries(), ["done"]);
    }

    #[test]
    fn unexpected_checkbox_content_is_ignored() {
        let notes = ReviewExtractor::extract("##### [[a|A]]\n- [-] cancelled\n- [x] done\n");
        assert_eq!(notes[0].lines.len(), 1);
    }

    #[test]
    fn comment_heading_before_any_note_is_ignored() {
        assert!(ReviewExtractor::extract("###### ユーザーレビュー\n- orphan\n").is_empty());
    }
}
