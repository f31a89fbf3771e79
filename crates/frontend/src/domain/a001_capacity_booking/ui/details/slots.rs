use leptos::prelude::*;

use crate::domain::a001_capacity_booking::form_state::SlotField;
use crate::domain::a001_capacity_booking::ui::view_model::BookingViewModel;
use crate::layout::global_context::use_app_context;
use crate::shared::date_utils::to_input_value;
use crate::shared::icons::icon;

/// Табличная часть «Трейлеры»
#[component]
pub fn TrailerSlots(vm: BookingViewModel) -> impl IntoView {
    let ctx = use_app_context();
    let row_count = Memo::new(move |_| vm.state.with(|s| s.form.slots().len()));

    view! {
        <div class="slots">
            <table class="slots__table">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>{move || ctx.t("TRAILER_COUNT")}</th>
                        <th>{move || ctx.t("SLOT_START_TIME")}</th>
                        <th>{move || ctx.t("SLOT_END_TIME")}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        (0..row_count.get())
                            .map(|index| view! { <SlotRow vm=vm index=index /> })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <button class="button button--secondary" on:click=move |_| vm.add_slot()>
                {icon("plus")}
                {move || ctx.t("ADD_ROW")}
            </button>
        </div>
    }
}

#[component]
fn SlotCell(vm: BookingViewModel, index: usize, field: SlotField) -> impl IntoView {
    let ctx = use_app_context();
    let input_type = match field {
        SlotField::TrailerCount => "number",
        SlotField::SlotStartTime | SlotField::SlotEndTime => "datetime-local",
    };
    let value = move || {
        vm.state.with(|s| {
            let raw = s.form.slots().get(index).map(|slot| field.get(slot)).unwrap_or("");
            match field {
                SlotField::TrailerCount => raw.to_string(),
                _ => to_input_value(raw),
            }
        })
    };
    let issue = move || vm.issue_for(field.name(), Some(index));

    view! {
        <td class:slots__cell--invalid=move || issue().is_some()>
            <input
                type=input_type
                name=field.name()
                min=(field == SlotField::TrailerCount).then_some("1")
                prop:value=value
                on:input=move |ev| vm.set_slot_field(index, field, event_target_value(&ev))
            />
            {move || issue().map(|key| view! { <div class="form-error">{ctx.t(key)}</div> })}
        </td>
    }
}

#[component]
fn SlotRow(vm: BookingViewModel, index: usize) -> impl IntoView {
    let ctx = use_app_context();
    let can_remove = move || vm.state.with(|s| s.form.slots().len() > 1);

    view! {
        <tr>
            <td class="slots__index">{index + 1}</td>
            <SlotCell vm=vm index=index field=SlotField::TrailerCount />
            <SlotCell vm=vm index=index field=SlotField::SlotStartTime />
            <SlotCell vm=vm index=index field=SlotField::SlotEndTime />
            <td>
                <button
                    class="button button--icon"
                    title=move || ctx.t("REMOVE_ROW")
                    disabled=move || !can_remove()
                    on:click=move |_| vm.remove_slot(index)
                >
                    {icon("trash")}
                </button>
            </td>
        </tr>
    }
}
