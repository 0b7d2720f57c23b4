//! Message catalog for the user-facing surface.
//!
//! Catalogs are built once and cached. Unknown keys fall back to English,
//! then to the key itself, so a missing translation never breaks output.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// UI language
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl Language {
    /// Parse a language tag, case-insensitively
    pub fn parse(s: &str) -> Option<Language> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Some(Language::En),
            "ja" | "japanese" => Some(Language::Ja),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ja => "ja",
        }
    }
}

static EN: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("meditation.heading", "Meditation"),
        ("journaling.heading", "Journaling"),
        ("journaling.phase.page", "Page {page} / {total}"),
        ("journaling.phase.break", "Break"),
        ("journaling.confirm.end", "End journaling?"),
        ("history.heading", "History"),
        ("history.empty", "No records yet"),
        ("history.confirm.delete", "Delete this record?"),
        ("history.stat.streak", "Streak"),
        ("history.type.meditation", "Meditation"),
        ("history.type.journaling", "Journaling"),
        ("stats.heading", "Daily stats"),
        ("session.logged", "Session logged"),
        ("settings.saved", "Settings saved"),
    ])
});

static JA: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("meditation.heading", "瞑想"),
        ("journaling.heading", "メモ書き"),
        ("journaling.phase.page", "ページ {page} / {total}"),
        ("journaling.phase.break", "休憩中"),
        ("journaling.confirm.end", "メモ書きを終了しますか？"),
        ("history.heading", "履歴"),
        ("history.empty", "まだ記録がありません"),
        ("history.confirm.delete", "この記録を削除しますか?"),
        ("history.stat.streak", "連続記録日数"),
        ("history.type.meditation", "瞑想"),
        ("history.type.journaling", "メモ書き"),
        ("stats.heading", "日次統計"),
        ("session.logged", "セッションを記録しました"),
        ("settings.saved", "設定を保存しました"),
    ])
});

/// Look up a message for the given language
pub fn tr(lang: Language, key: &'static str) -> &'static str {
    let catalog = match lang {
        Language::En => &*EN,
        Language::Ja => &*JA,
    };
    catalog
        .get(key)
        .or_else(|| EN.get(key))
        .copied()
        .unwrap_or(key)
}
