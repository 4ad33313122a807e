use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::{LabelTable, Language, SectionKey};

static DECORATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Extended_Pictographic}\u{FE0F}\s]+").expect("decoration pattern is valid")
});

/// Normalizes heading text for comparison.
///
/// Applies NFKC, then removes pictographs, the emoji variation selector and
/// all whitespace. Headings that differ only in decoration normalize to the
/// same string.
#[must_use]
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfkc().collect();
    DECORATION.replace_all(&composed, "").into_owned()
}

/// Returns the part of `heading_text` that follows a label.
///
/// `normalized_label` must already be [`normalize`]d. The returned suffix is
/// the raw remainder (e.g. `" (2026-01-03)"`), so it can be rendered back
/// verbatim after the label. Returns `None` if the label is not a prefix of
/// the heading.
#[must_use]
pub fn heading_suffix<'a>(heading_text: &'a str, normalized_label: &str) -> Option<&'a str> {
    if normalized_label.is_empty() {
        return Some(heading_text);
    }
    heading_text
        .char_indices()
        .map(|(index, ch)| index + ch.len_utf8())
        .find(|&end| normalize(&heading_text[..end]) == normalized_label)
        .map(|end| &heading_text[end..])
}

/// How a section's heading is rendered and where it sits in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingSpec {
    /// The section this heading introduces.
    pub key: SectionKey,
    /// Markdown heading level, 2 to 6.
    pub level: u8,
    /// Decorative emoji rendered before the label.
    pub emoji: Option<&'static str>,
    /// The enclosing section, if any.
    pub parent: Option<SectionKey>,
    /// Whether the section may occur any number of times.
    pub repeatable: bool,
}

impl HeadingSpec {
    /// Whether headings of this spec terminate the previous section.
    ///
    /// Only level 2 and 3 headings are section boundaries.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        is_boundary_level(usize::from(self.level))
    }
}

/// Whether a heading of `level` is a section boundary.
#[must_use]
pub const fn is_boundary_level(level: usize) -> bool {
    matches!(level, 2 | 3)
}

const fn spec(
    key: SectionKey,
    level: u8,
    emoji: Option<&'static str>,
    parent: Option<SectionKey>,
    repeatable: bool,
) -> HeadingSpec {
    HeadingSpec {
        key,
        level,
        emoji,
        parent,
        repeatable,
    }
}

// Indexed by `SectionKey as usize`.
static SPECS: [HeadingSpec; 10] = [
    spec(SectionKey::TaskPlanned, 2, Some("✅"), None, false),
    spec(SectionKey::TaskTimelog, 2, Some("🕒"), None, false),
    spec(
        SectionKey::TaskReview,
        3,
        None,
        Some(SectionKey::TaskTimelog),
        true,
    ),
    spec(SectionKey::ReviewMemo, 2, Some("🙌"), None, false),
    spec(SectionKey::DailyReport, 2, Some("🏷"), None, false),
    spec(
        SectionKey::ReviewedNotes,
        4,
        Some("📄"),
        Some(SectionKey::DailyReport),
        false,
    ),
    spec(
        SectionKey::UserReview,
        6,
        Some("💬"),
        Some(SectionKey::ReviewedNotes),
        true,
    ),
    spec(
        SectionKey::TagList,
        4,
        Some("🔖"),
        Some(SectionKey::DailyReport),
        false,
    ),
    spec(
        SectionKey::UnregisteredTags,
        4,
        Some("🆕"),
        Some(SectionKey::DailyReport),
        false,
    ),
    spec(SectionKey::Kpt, 2, Some("🧠"), None, true),
];

/// Error returned when a dynamically named section has no heading spec.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("No heading spec registered for '{0}'")]
pub struct NotFoundError(pub String);

/// Localized labels for the active language.
///
/// Holds both the display form (used when rendering headings) and the
/// normalized form (used when matching headings in source text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCache {
    language: Language,
    display: LabelTable,
    normalized: BTreeMap<SectionKey, String>,
}

impl LabelCache {
    /// Builds a cache for `language` from `table`.
    #[must_use]
    pub fn new(language: Language, table: LabelTable) -> Self {
        let mut cache = Self {
            language,
            display: LabelTable::new(),
            normalized: BTreeMap::new(),
        };
        cache.rebuild(language, table);
        cache
    }

    /// Replaces the cached labels.
    ///
    /// Labels that normalize to the empty string are dropped, since they
    /// would match every heading.
    pub fn rebuild(&mut self, language: Language, table: LabelTable) {
        self.language = language;
        self.normalized.clear();
        self.display.clear();

        for (key, label) in table {
            let normalized = normalize(&label);
            if normalized.is_empty() {
                tracing::warn!("Ignoring empty label for {key} ({language})");
                continue;
            }
            self.normalized.insert(key, normalized);
            self.display.insert(key, label);
        }

        warn_on_prefix_overlap(&self.normalized);
        tracing::debug!(
            "Rebuilt {} heading labels for {language}",
            self.normalized.len()
        );
    }

    /// The normalized label for `key`.
    #[must_use]
    pub fn lookup(&self, key: SectionKey) -> Option<&str> {
        self.normalized.get(&key).map(String::as_str)
    }

    /// The label for `key` as it should be displayed.
    #[must_use]
    pub fn display(&self, key: SectionKey) -> Option<&str> {
        self.display.get(&key).map(String::as_str)
    }

    /// The language the labels belong to.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }
}

fn warn_on_prefix_overlap(labels: &BTreeMap<SectionKey, String>) {
    let boundary: Vec<_> = labels
        .iter()
        .filter(|(key, _)| HeadingSpecRegistry::spec(**key).is_boundary())
        .collect();
    for (key, label) in &boundary {
        for (other, other_label) in &boundary {
            if key != other && other_label.starts_with(label.as_str()) {
                tracing::warn!(
                    "Label of {key} is a prefix of the label of {other}; headings resolve to the longest match"
                );
            }
        }
    }
}

/// The single source of truth bridging section keys and localized headings.
///
/// Heading specs are static. Labels depend on the active language and are
/// cached; after switching language, callers must call
/// [`HeadingSpecRegistry::rebuild_labels`] (or
/// [`HeadingSpecRegistry::init_i18n`]) before parsing or rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingSpecRegistry {
    labels: LabelCache,
}

impl Default for HeadingSpecRegistry {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl HeadingSpecRegistry {
    /// Creates a registry using the built-in labels of `language`.
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            labels: LabelCache::new(language, language.builtin_labels()),
        }
    }

    /// Creates a registry using the built-in labels of `language`, with
    /// `overrides` taking precedence.
    #[must_use]
    pub fn with_overrides(language: Language, overrides: &LabelTable) -> Self {
        let mut registry = Self::new(language);
        registry.rebuild_labels(language, overrides);
        registry
    }

    /// The heading spec of `key`.
    #[must_use]
    pub fn spec(key: SectionKey) -> &'static HeadingSpec {
        &SPECS[key as usize]
    }

    /// The heading spec of a section named by its dotted key.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no section has that name.
    pub fn spec_by_name(name: &str) -> Result<&'static HeadingSpec, NotFoundError> {
        name.parse::<SectionKey>()
            .map(Self::spec)
            .map_err(|_| NotFoundError(name.to_string()))
    }

    /// All heading specs, in canonical order.
    #[must_use]
    pub fn specs() -> &'static [HeadingSpec] {
        &SPECS
    }

    /// The heading specs usable as section boundaries.
    pub fn section_specs() -> impl Iterator<Item = &'static HeadingSpec> {
        SPECS.iter().filter(|spec| spec.is_boundary())
    }

    /// Recomputes the label cache for `language`.
    ///
    /// Built-in labels are used for every key without an override.
    pub fn rebuild_labels(&mut self, language: Language, overrides: &LabelTable) {
        let mut table = language.builtin_labels();
        table.extend(overrides.iter().map(|(key, label)| (*key, label.clone())));
        self.labels.rebuild(language, table);
    }

    /// Switches to `language` using only its built-in labels.
    pub fn init_i18n(&mut self, language: Language) {
        self.rebuild_labels(language, &LabelTable::new());
    }

    /// The normalized label of `key` in the active language.
    #[must_use]
    pub fn label(&self, key: SectionKey) -> Option<&str> {
        self.labels.lookup(key)
    }

    /// The display label of `key` in the active language.
    #[must_use]
    pub fn display_label(&self, key: SectionKey) -> Option<&str> {
        self.labels.display(key)
    }

    /// Normalized labels of every boundary section.
    #[must_use]
    pub fn boundary_labels(&self) -> Vec<(SectionKey, String)> {
        Self::section_specs()
            .filter_map(|spec| {
                self.label(spec.key)
                    .map(|label| (spec.key, label.to_string()))
            })
            .collect()
    }

    /// The active language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.labels.language()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("✅ 今日の予定タスク", "今日の予定タスク"; "leading pictograph")]
    #[test_case("🏷️ デイリーレポート", "デイリーレポート"; "variation selector")]
    #[test_case("  Time log  /  memo ", "Timelog/memo"; "whitespace")]
    #[test_case("タイムログ／メモ", "タイムログ/メモ"; "fullwidth solidus")]
    #[test_case("ＫＰＴ分析", "KPT分析"; "fullwidth latin")]
    fn normalizes(input: &str, expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn emoji_differences_do_not_matter() {
        assert_eq!(normalize("✅ Foo"), normalize("🎯 Foo"));
        assert_ne!(normalize("✅ Foo"), normalize("✅ Bar"));
    }

    #[test]
    fn normalize_is_total_on_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("🎯 \u{FE0F}"), "");
    }

    #[test]
    fn suffix_after_label() {
        let label = normalize("タスク振り返り");
        assert_eq!(
            heading_suffix("タスク振り返り (2026-01-03)", &label),
            Some(" (2026-01-03)")
        );
        let label = normalize("デイリーレポート");
        assert_eq!(
            heading_suffix("🏷 デイリーレポート（2026-01-03)", &label),
            Some("（2026-01-03)")
        );
        assert_eq!(heading_suffix("🕒 タイムログ／メモ", &normalize("タイムログ／メモ")), Some(""));
    }

    #[test]
    fn suffix_requires_prefix_match() {
        assert_eq!(heading_suffix("Something else", &normalize("Task review")), None);
    }

    #[test]
    fn specs_are_indexed_by_key() {
        for key in SectionKey::ALL {
            assert_eq!(HeadingSpecRegistry::spec(key).key, key);
        }
    }

    #[test]
    fn only_level_two_and_three_are_boundaries() {
        let keys: Vec<_> = HeadingSpecRegistry::section_specs()
            .map(|spec| spec.key)
            .collect();
        assert_eq!(
            keys,
            vec![
                SectionKey::TaskPlanned,
                SectionKey::TaskTimelog,
                SectionKey::TaskReview,
                SectionKey::ReviewMemo,
                SectionKey::DailyReport,
                SectionKey::Kpt,
            ]
        );
    }

    #[test]
    fn repeatable_sections() {
        let repeatable: Vec<_> = HeadingSpecRegistry::specs()
            .iter()
            .filter(|spec| spec.repeatable)
            .map(|spec| spec.key)
            .collect();
        assert_eq!(
            repeatable,
            vec![SectionKey::TaskReview, SectionKey::UserReview, SectionKey::Kpt]
        );
    }

    #[test]
    fn spec_by_name_fails_for_unknown_names() {
        assert_eq!(
            HeadingSpecRegistry::spec_by_name("note.kpt").map(|spec| spec.key),
            Ok(SectionKey::Kpt)
        );
        assert_eq!(
            HeadingSpecRegistry::spec_by_name("note.missing"),
            Err(NotFoundError("note.missing".to_string()))
        );
    }

    #[test]
    fn rebuild_switches_language() {
        let mut registry = HeadingSpecRegistry::new(Language::Ja);
        assert_eq!(registry.label(SectionKey::Kpt), Some("KPT分析"));

        registry.init_i18n(Language::En);
        assert_eq!(registry.language(), Language::En);
        assert_eq!(registry.label(SectionKey::Kpt), Some("KPTanalysis"));
        assert_eq!(registry.display_label(SectionKey::Kpt), Some("KPT analysis"));
    }

    #[test]
    fn overrides_take_precedence() {
        let overrides = LabelTable::from([(SectionKey::ReviewMemo, "ふりかえり".to_string())]);
        let registry = HeadingSpecRegistry::with_overrides(Language::Ja, &overrides);
        assert_eq!(registry.display_label(SectionKey::ReviewMemo), Some("ふりかえり"));
        assert_eq!(registry.display_label(SectionKey::Kpt), Some("KPT分析"));
    }

    #[test]
    fn empty_labels_are_dropped() {
        let cache = LabelCache::new(
            Language::En,
            LabelTable::from([(SectionKey::Kpt, "🧠 ".to_string())]),
        );
        assert_eq!(cache.lookup(SectionKey::Kpt), None);
        assert_eq!(cache.display(SectionKey::Kpt), None);
    }

    #[test]
    fn overlapping_labels_keep_lookups() {
        let table = LabelTable::from([
            (SectionKey::TaskReview, "Review".to_string()),
            (SectionKey::ReviewMemo, "Review task".to_string()),
        ]);
        let cache = LabelCache::new(Language::En, table.clone());
        assert_eq!(cache.lookup(SectionKey::TaskReview), Some("Review"));
        assert_eq!(cache.lookup(SectionKey::ReviewMemo), Some("Reviewtask"));
        assert_eq!(cache.display(SectionKey::ReviewMemo), Some("Review task"));

        let registry = HeadingSpecRegistry::with_overrides(Language::En, &table);
        let parser = crate::storage::SectionParser::new(&registry);
        assert_eq!(parser.resolve("Review task (x)"), Some(SectionKey::ReviewMemo));
        assert_eq!(parser.resolve("Review (x)"), Some(SectionKey::TaskReview));
    }
}
