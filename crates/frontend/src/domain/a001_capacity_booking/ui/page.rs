use leptos::prelude::*;

use super::details::BookingDetails;
use super::list::BookingList;
use super::view_model::BookingViewModel;
use crate::layout::global_context::use_app_context;
use crate::layout::Shell;

/// Экран бронирования: список слева, форма по центру
#[component]
pub fn BookingPage() -> impl IntoView {
    let ctx = use_app_context();
    let vm = BookingViewModel::new();
    vm.refresh();

    let busy_label = move || {
        vm.state
            .with(|s| s.busy_reason)
            .map(|reason| ctx.t(reason.label_key()))
    };
    let error_key = move || {
        vm.state
            .with(|s| s.last_error.as_ref().map(|e| e.message_key()))
    };

    view! {
        <Shell
            left=move || view! { <BookingList vm=vm /> }.into_any()
            center=move || view! {
                <div class="booking-page">
                    {move || error_key().map(|key| view! {
                        <div class="notice notice--error">
                            <span>{ctx.t(key)}</span>
                            <button class="button button--ghost" on:click=move |_| vm.dismiss_error()>
                                {ctx.t("DISMISS")}
                            </button>
                        </div>
                    })}
                    <BookingDetails vm=vm />
                </div>
            }.into_any()
        />

        {move || busy_label().map(|label| view! {
            <div class="busy-overlay">
                <div class="busy-overlay__spinner"></div>
                <div class="busy-overlay__label">{label}</div>
            </div>
        })}
    }
}
