use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::SectionKey;

/// A language the heading labels are available in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Japanese.
    #[default]
    Ja,
    /// English.
    En,
}

impl Language {
    /// The language code, e.g. `ja`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }

    /// The built-in label table for this language.
    #[must_use]
    pub fn builtin_labels(self) -> LabelTable {
        let entries: &[(SectionKey, &str)] = match self {
            Self::Ja => &JA,
            Self::En => &EN,
        };
        entries
            .iter()
            .map(|&(key, label)| (key, label.to_string()))
            .collect()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ja" => Ok(Self::Ja),
            "en" => Ok(Self::En),
            other => Err(format!("unsupported language '{other}' (expected 'ja' or 'en')")),
        }
    }
}

/// Localized heading labels keyed by section.
///
/// Labels are stored as displayed: no emoji, no heading markers, no
/// dynamic suffix.
pub type LabelTable = BTreeMap<SectionKey, String>;

const JA: [(SectionKey, &str); 10] = [
    (SectionKey::TaskPlanned, "今日の予定タスク"),
    (SectionKey::TaskTimelog, "タイムログ／メモ"),
    (SectionKey::TaskReview, "タスク振り返り"),
    (SectionKey::ReviewMemo, "振り返りメモ"),
    (SectionKey::DailyReport, "デイリーレポート"),
    (SectionKey::ReviewedNotes, "レビュー済みノート"),
    (SectionKey::UserReview, "ユーザーレビュー"),
    (SectionKey::TagList, "タグ一覧"),
    (SectionKey::UnregisteredTags, "未登録タグ"),
    (SectionKey::Kpt, "KPT分析"),
];

const EN: [(SectionKey, &str); 10] = [
    (SectionKey::TaskPlanned, "Today's planned tasks"),
    (SectionKey::TaskTimelog, "Time log / memo"),
    (SectionKey::TaskReview, "Task review"),
    (SectionKey::ReviewMemo, "Review memo"),
    (SectionKey::DailyReport, "Daily report"),
    (SectionKey::ReviewedNotes, "Reviewed notes"),
    (SectionKey::UserReview, "User review"),
    (SectionKey::TagList, "Tags"),
    (SectionKey::UnregisteredTags, "Unregistered tags"),
    (SectionKey::Kpt, "KPT analysis"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_cover_every_key() {
        for language in [Language::Ja, Language::En] {
            let table = language.builtin_labels();
            for key in SectionKey::ALL {
                assert!(table.contains_key(&key), "{language} is missing {key}");
            }
        }
    }

    #[test]
    fn parses_language_codes() {
        assert_eq!("JA".parse::<Language>(), Ok(Language::Ja));
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert!("fr".parse::<Language>().is_err());
    }
}
