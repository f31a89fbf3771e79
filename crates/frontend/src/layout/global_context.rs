use leptos::prelude::*;
use web_sys::window;

use crate::shared::i18n::{translate, Language};
use crate::shared::theme::{
    apply_theme, clear_theme, load_theme_from_storage, save_theme_to_storage, Theme,
};

const LANGUAGE_STORAGE_KEY: &str = "booking-language";

fn load_language_from_storage() -> Language {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(LANGUAGE_STORAGE_KEY).ok().flatten())
        .map(|code| Language::from_code(&code))
        .unwrap_or_default()
}

fn save_language_to_storage(language: Language) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(LANGUAGE_STORAGE_KEY, language.code());
    }
}

/// Application-wide UI preferences, provided once through Leptos context.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub language: RwSignal<Language>,
    pub theme: RwSignal<Theme>,
    pub sidebar_open: RwSignal<bool>,
}

impl AppContext {
    /// Read stored preferences and apply the theme
    pub fn init() -> Self {
        let theme = load_theme_from_storage();
        apply_theme(theme);
        let language = load_language_from_storage();
        log::debug!("App context: language={}, theme={}", language.code(), theme.as_str());
        Self {
            language: RwSignal::new(language),
            theme: RwSignal::new(theme),
            sidebar_open: RwSignal::new(true),
        }
    }

    pub fn teardown(&self) {
        clear_theme();
    }

    pub fn set_language(&self, language: Language) {
        self.language.set(language);
        save_language_to_storage(language);
    }

    pub fn toggle_theme(&self) {
        let next = self.theme.get_untracked().toggle();
        self.theme.set(next);
        save_theme_to_storage(next);
        apply_theme(next);
    }

    pub fn toggle_sidebar(&self) {
        self.sidebar_open.update(|open| *open = !*open);
    }

    /// Translation in the current language; tracks the language signal
    pub fn t(&self, key: &str) -> String {
        translate(self.language.get(), key)
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext not provided; App must call AppContext::init")
}
