use crate::domain::a001_capacity_booking::ui::BookingPage;
use crate::layout::global_context::AppContext;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Одна точка создания контекста приложения; снимается вместе с корнем
    let ctx = AppContext::init();
    provide_context(ctx);
    on_cleanup(move || ctx.teardown());

    view! {
        <BookingPage />
    }
}
