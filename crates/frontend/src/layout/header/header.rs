use crate::layout::global_context::use_app_context;
use crate::layout::header::LanguageMenu;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                <button
                    class="button button--ghost"
                    title=move || ctx.t("TOGGLE_SIDEBAR")
                    on:click=move |_| ctx.toggle_sidebar()
                >
                    {icon("menu")}
                </button>
                <span class="header__title">{move || ctx.t("TRAILER_CAPACITY_BOOKING")}</span>
            </div>
            <div class="header__actions">
                <button
                    class="button button--ghost"
                    title=move || ctx.t("TOGGLE_THEME")
                    on:click=move |_| ctx.toggle_theme()
                >
                    {move || icon(ctx.theme.get().toggle_icon())}
                </button>
                <LanguageMenu />
            </div>
        </header>
    }
}
