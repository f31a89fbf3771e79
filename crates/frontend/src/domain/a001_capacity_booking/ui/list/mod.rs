use contracts::domain::a001_capacity_booking::aggregate::BookingRecord;
use leptos::prelude::*;

use super::view_model::BookingViewModel;
use crate::layout::global_context::use_app_context;
use crate::shared::date_utils::format_created_at;
use crate::shared::icons::icon;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Draft,
    Confirmed,
    Template,
}

impl Bucket {
    fn title_key(&self) -> &'static str {
        match self {
            Bucket::Draft => "DRAFT",
            Bucket::Confirmed => "CONFIRMED",
            Bucket::Template => "TEMPLATE",
        }
    }

    fn card_class(&self) -> &'static str {
        match self {
            Bucket::Draft => "booking-card booking-card--draft",
            Bucket::Confirmed => "booking-card booking-card--confirmed",
            Bucket::Template => "booking-card booking-card--template",
        }
    }
}

/// Список бронирований: поиск, три группы, кнопки внизу
#[component]
pub fn BookingList(vm: BookingViewModel) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="booking-list">
            <div class="booking-list__title">{move || ctx.t("ORDER_LIST")}</div>
            <input
                type="search"
                class="booking-list__search"
                placeholder=move || ctx.t("SEARCH")
                prop:value=move || vm.search.get()
                on:input=move |ev| vm.search.set(event_target_value(&ev))
            />

            <div class="booking-list__groups">
                <BucketSection vm=vm bucket=Bucket::Draft />
                <BucketSection vm=vm bucket=Bucket::Confirmed />
                <BucketSection vm=vm bucket=Bucket::Template />
            </div>

            <div class="booking-list__footer">
                <button class="button button--primary" on:click=move |_| vm.create_new()>
                    {icon("plus")}
                    {move || ctx.t("CREATE_NEW")}
                </button>
                <button
                    class="button button--primary"
                    title=move || ctx.t("REFRESH")
                    disabled=move || vm.is_busy()
                    on:click=move |_| vm.refresh()
                >
                    {icon("refresh")}
                </button>
            </div>
        </div>
    }
}

#[component]
fn BucketSection(vm: BookingViewModel, bucket: Bucket) -> impl IntoView {
    let ctx = use_app_context();
    let is_open = RwSignal::new(bucket != Bucket::Template);

    let records = Memo::new(move |_| {
        let buckets = vm.visible_buckets();
        match bucket {
            Bucket::Draft => buckets.draft,
            Bucket::Confirmed => buckets.confirmed,
            Bucket::Template => buckets.template,
        }
    });

    view! {
        <section class="bucket">
            <button class="bucket__header" on:click=move |_| is_open.update(|v| *v = !*v)>
                {move || if is_open.get() { icon("chevron-down") } else { icon("chevron-right") }}
                <span>{move || ctx.t(bucket.title_key())}</span>
                <span class="bucket__count">{move || records.with(|r| r.len())}</span>
            </button>
            <Show when=move || is_open.get()>
                {move || {
                    let list = records.get();
                    if list.is_empty() {
                        view! { <div class="bucket__empty">{ctx.t("NO_DATA")}</div> }.into_any()
                    } else {
                        list.into_iter()
                            .map(|record| view! { <BookingCard vm=vm record=record class=bucket.card_class() /> })
                            .collect_view()
                            .into_any()
                    }
                }}
            </Show>
        </section>
    }
}

#[component]
fn BookingCard(vm: BookingViewModel, record: BookingRecord, class: &'static str) -> impl IntoView {
    let ctx = use_app_context();
    let id = record.to_string_id().unwrap_or_default();
    let active_id = id.clone();
    let is_active = move || {
        vm.state
            .with(|s| s.form.record().to_string_id().as_deref() == Some(active_id.as_str()))
    };
    let open_id = id.clone();
    let created_at = record.created_at.as_ref().map(format_created_at);
    let title = record.display_title();
    let consignee = record.last_consignee.clone();
    let transmission = record.transmission_number.clone().unwrap_or_default();

    view! {
        <div
            class=class
            class:booking-card--active=is_active
            on:click=move |_| vm.open(open_id.clone())
        >
            <div class="booking-card__id">{move || ctx.t("ORDER_ID")}": "{id}</div>
            <div class="booking-card__title">{title}</div>
            <div class="booking-card__line">{move || ctx.t("CUSTOMER_UNIT")}": "{consignee}</div>
            <div class="booking-card__line">{move || ctx.t("TRANSMISSION_NUMBER")}": "{transmission}</div>
            {created_at.map(|created| view! {
                <div class="booking-card__line">{move || ctx.t("CREATED_AT")}": "{created}</div>
            })}
        </div>
    }
}
