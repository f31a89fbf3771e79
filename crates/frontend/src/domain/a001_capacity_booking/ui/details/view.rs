use leptos::prelude::*;

use super::save_menu::SaveMenu;
use super::slots::TrailerSlots;
use crate::domain::a001_capacity_booking::form_state::BookingField;
use crate::domain::a001_capacity_booking::ui::view_model::BookingViewModel;
use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;

fn label_key(field: BookingField) -> &'static str {
    match field {
        BookingField::ShipFrom => "SHIP_FROM",
        BookingField::UnloadPoint => "UNLOAD_POINT",
        BookingField::LastConsignee => "LAST_CONSIGNEE",
        BookingField::ServiceProvider => "SERVICE_PROVIDER",
        BookingField::PickupReference => "PICKUP_REFERENCE",
        BookingField::MessageToCarrier => "MESSAGE_TO_CARRIER",
        BookingField::TemplateName => "TEMPLATE_NAME",
    }
}

const FORM_FIELDS: [BookingField; 6] = [
    BookingField::ShipFrom,
    BookingField::UnloadPoint,
    BookingField::LastConsignee,
    BookingField::ServiceProvider,
    BookingField::PickupReference,
    BookingField::MessageToCarrier,
];

/// Одно текстовое поле формы с сообщением валидации
#[component]
pub fn TextField(vm: BookingViewModel, field: BookingField) -> impl IntoView {
    let ctx = use_app_context();
    let name = field.name();
    let required = matches!(
        field,
        BookingField::ShipFrom | BookingField::UnloadPoint | BookingField::LastConsignee
    );
    let issue = move || vm.issue_for(name, None);

    view! {
        <div class="form-group" class:form-group--invalid=move || issue().is_some()>
            <label for=name>
                {move || ctx.t(label_key(field))}
                {required.then_some(" *")}
            </label>
            <input
                type="text"
                id=name
                name=name
                prop:value=move || vm.state.with(|s| field.get(s.form.record()).to_string())
                on:input=move |ev| vm.set_field(field, event_target_value(&ev))
            />
            {move || issue().map(|key| view! { <div class="form-error">{ctx.t(key)}</div> })}
        </div>
    }
}

#[component]
pub fn BookingDetails(vm: BookingViewModel) -> impl IntoView {
    let ctx = use_app_context();
    let confirm_delete = RwSignal::new(false);

    let close_confirm = Callback::new(move |_| confirm_delete.set(false));
    let do_delete = move |_| {
        confirm_delete.set(false);
        vm.delete();
    };

    view! {
        <div class="details-container booking-details">
            <div class="details-header">
                <h3>
                    {move || if vm.is_edit_mode() { ctx.t("EDIT_BOOKING") } else { ctx.t("NEW_BOOKING") }}
                </h3>
                <Show when=move || vm.is_edit_mode()>
                    <button
                        class="button button--danger"
                        disabled=move || vm.is_busy()
                        on:click=move |_| confirm_delete.set(true)
                    >
                        {icon("trash")}
                        {move || ctx.t("DELETE")}
                    </button>
                </Show>
            </div>

            {move || {
                vm.state.with(|s| s.form.record().transmission_number.clone()).map(|number| view! {
                    <div class="details-meta">{ctx.t("TRANSMISSION_NUMBER")}": "{number}</div>
                })
            }}

            <div class="details-form">
                {FORM_FIELDS
                    .into_iter()
                    .map(|field| view! { <TextField vm=vm field=field /> })
                    .collect_view()}
            </div>

            <TrailerSlots vm=vm />

            <div class="details-actions">
                <SaveMenu vm=vm />
            </div>

            <Show when=move || confirm_delete.get()>
                <Modal
                    title=Signal::derive(move || ctx.t("DELETE_XBR"))
                    on_close=close_confirm
                    footer=move || view! {
                        <button class="button button--secondary" on:click=move |_| close_confirm.run(())>
                            {move || ctx.t("CANCEL")}
                        </button>
                        <button class="button button--danger" on:click=do_delete>
                            {move || ctx.t("CONFIRM")}
                        </button>
                    }
                >
                    <p>{move || ctx.t("ARE_YOU_SURE_YOU_WANT_TO_DELETE_IT")}</p>
                </Modal>
            </Show>
        </div>
    }
}
