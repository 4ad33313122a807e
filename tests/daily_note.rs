//! End-to-end parsing, editing and rendering of a complete daily note.

use dailynote::{
    DailyNoteFactory, DailyNoteMarkdownBuilder, HeadingSpecRegistry, Language, ReviewExtractor,
    ReviewLine, ReviewLineKind, ReviewedNote, Section,
    storage::{DailyNoteContentUpdater, ReviewedNotesMarkdownBuilder},
};

const NOTE: &str = "\
# 2026-01-03

## ✅ 今日の予定タスク

- [ ] write the report

## 🕒 タイムログ／メモ

09:00 start

### タスク振り返り (2026-01-03)

TABLE-1
ANALYSIS-1

### タスク振り返り (2026-01-03)

TABLE-2
BACKLOG-2

## 🙌 振り返りメモ

good day

## 🏷 デイリーレポート（2026-01-03)

#### 📄 レビュー済みノート

##### [[_project/A]]

- [x] done A

###### 💬 ユーザーレビュー

- review A

## 🧠 KPT分析

K: keep

## 🧠 KPT分析

P: problem
";

#[test]
fn parses_complete_note() {
    let registry = HeadingSpecRegistry::new(Language::Ja);
    let note = DailyNoteFactory::new(&registry).from_markdown(NOTE);

    assert_eq!(note.task_reviews().len(), 2);
    assert_eq!(
        note.task_reviews().get(1).map(Section::body),
        Some("TABLE-2\nBACKLOG-2")
    );

    let reviewed = note.daily_report().reviewed_notes();
    assert_eq!(reviewed.len(), 1);
    assert!(reviewed[0].checked_summaries()[0].contains("done A"));
    assert_eq!(reviewed[0].user_reviews(), ["review A"]);

    assert_eq!(note.kpts().len(), 2);
    assert_eq!(note.review_memo().body(), "good day");
    assert_eq!(note.timelog().body(), "09:00 start");
}

#[test]
fn build_then_parse_is_stable() {
    let registry = HeadingSpecRegistry::new(Language::Ja);
    let factory = DailyNoteFactory::new(&registry);
    let builder = DailyNoteMarkdownBuilder::new(&registry);

    let first = builder.build(&factory.from_markdown(NOTE)).unwrap();
    let second = builder.build(&factory.from_markdown(&first)).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, NOTE);
}

#[test]
fn edits_only_touch_their_section() {
    let registry = HeadingSpecRegistry::new(Language::Ja);
    let updater = DailyNoteContentUpdater::new(&registry);

    let updated = updater
        .update(NOTE, |note| note.append_review_memo("tomorrow: rest"))
        .unwrap();

    assert_eq!(
        updated,
        NOTE.replace("good day\n", "good day\n\ntomorrow: rest\n")
    );
}

#[test]
fn rendered_reviews_are_extracted_again() {
    let registry = HeadingSpecRegistry::new(Language::Ja);
    let mut note = ReviewedNote::new("_project/B".to_string(), "B".to_string());
    note.lines = [
        (ReviewLineKind::Checked, "shipped"),
        (ReviewLineKind::Unchecked, "docs"),
        (ReviewLineKind::UserComment, "nice"),
    ]
    .into_iter()
    .filter_map(|(kind, text)| ReviewLine::new(kind, text))
    .collect();

    let markdown = ReviewedNotesMarkdownBuilder::new(&registry)
        .build(std::slice::from_ref(&note))
        .unwrap();

    assert_eq!(ReviewExtractor::extract(&markdown), vec![note]);
}

#[test]
fn switching_language_rewrites_headings() {
    let ja = HeadingSpecRegistry::new(Language::Ja);
    let en = HeadingSpecRegistry::new(Language::En);

    let note = DailyNoteFactory::new(&ja).from_markdown(NOTE);
    let english = DailyNoteMarkdownBuilder::new(&en).build(&note).unwrap();

    assert!(english.contains("## 🙌 Review memo\n\ngood day\n"));
    assert!(english.contains("### Task review (2026-01-03)\n"));
    assert!(english.contains("## 🏷 Daily report（2026-01-03)\n"));

    let reparsed = DailyNoteFactory::new(&en).from_markdown(&english);
    assert_eq!(reparsed, note);
}
