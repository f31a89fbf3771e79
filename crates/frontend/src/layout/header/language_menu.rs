use crate::layout::global_context::use_app_context;
use crate::shared::i18n::Language;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Language dropdown in the header
#[component]
pub fn LanguageMenu() -> impl IntoView {
    let ctx = use_app_context();
    let is_open = RwSignal::new(false);

    let select = move |language: Language| {
        ctx.set_language(language);
        is_open.set(false);
    };

    view! {
        <div class="language-menu">
            <button
                class="button button--ghost"
                title=move || ctx.t("LANGUAGE")
                on:click=move |_| is_open.update(|v| *v = !*v)
            >
                {icon("translate")}
                <span>{move || ctx.language.get().code().to_uppercase()}</span>
            </button>

            <Show when=move || is_open.get()>
                <div class="dropdown">
                    {Language::all().into_iter().map(|language| {
                        let is_active = move || ctx.language.get() == language;
                        view! {
                            <button
                                class=move || if is_active() { "dropdown__item dropdown__item--active" } else { "dropdown__item" }
                                on:click=move |_| select(language)
                            >
                                {language.display_name()}
                            </button>
                        }
                    }).collect_view()}
                </div>
            </Show>
        </div>
    }
}
