//! Translations for the booking screen.
//!
//! Tables are JSON files compiled into the binary. Lookup falls back to
//! English, then to the key itself.

use once_cell::sync::Lazy;
use std::collections::HashMap;

type Table = HashMap<String, String>;

const EN_JSON: &str = include_str!("locales/en.json");
const PL_JSON: &str = include_str!("locales/pl.json");
const SE_JSON: &str = include_str!("locales/se.json");

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum Language {
    #[default]
    En,
    Pl,
    Se,
}

impl Language {
    /// Code used in localStorage
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pl => "pl",
            Language::Se => "se",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Pl => "Polski",
            Language::Se => "Svenska",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "pl" => Language::Pl,
            "se" | "sv" => Language::Se,
            _ => Language::En,
        }
    }

    pub fn all() -> [Language; 3] {
        [Language::En, Language::Pl, Language::Se]
    }
}

fn parse_table(lang: Language, json: &str) -> Table {
    serde_json::from_str(json).unwrap_or_else(|e| {
        log::error!("Broken translation table {}: {}", lang.code(), e);
        Table::new()
    })
}

static TABLES: Lazy<HashMap<Language, Table>> = Lazy::new(|| {
    HashMap::from([
        (Language::En, parse_table(Language::En, EN_JSON)),
        (Language::Pl, parse_table(Language::Pl, PL_JSON)),
        (Language::Se, parse_table(Language::Se, SE_JSON)),
    ])
});

fn lookup(lang: Language, key: &str) -> Option<&'static str> {
    TABLES
        .get(&lang)
        .and_then(|table| table.get(key))
        .map(String::as_str)
}

pub fn translate(lang: Language, key: &str) -> String {
    lookup(lang, key)
        .or_else(|| lookup(Language::En, key))
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn keys(lang: Language) -> BTreeSet<String> {
        TABLES[&lang].keys().cloned().collect()
    }

    #[test]
    fn test_tables_have_same_keys() {
        let en = keys(Language::En);
        assert!(!en.is_empty());
        assert_eq!(keys(Language::Pl), en);
        assert_eq!(keys(Language::Se), en);
    }

    #[test]
    fn test_translate_and_fallback() {
        assert_eq!(translate(Language::Se, "TEMPLATE"), "Mall");
        assert_eq!(translate(Language::Pl, "DRAFT"), "Wersja robocza");
        assert_eq!(translate(Language::En, "NO_SUCH_KEY"), "NO_SUCH_KEY");
    }

    #[test]
    fn test_keys_used_by_core_exist() {
        let en = keys(Language::En);
        for key in [
            "SAVED_AS_DRAFT",
            "SAVED_AND_SENT_TO_ATLAS",
            "SAVED_AS_TEMPLATE",
            "DELETING",
            "LOADING",
            "REQUIRED_FIELD",
            "TEMPLATE_NAME_REQUIRED",
            "INVALID_TRAILER_COUNT",
            "INVALID_SLOT_TIME",
            "SLOT_IN_PAST",
            "ERROR_NETWORK",
            "ERROR_NOT_FOUND",
            "ERROR_VALIDATION",
            "ERROR_NOT_SAVED",
            "ERROR_UNEXPECTED",
        ] {
            assert!(en.contains(key), "missing {}", key);
        }
    }

    #[test]
    fn test_language_codes() {
        for lang in Language::all() {
            assert_eq!(Language::from_code(lang.code()), lang);
        }
        assert_eq!(Language::from_code("de"), Language::En);
    }
}
