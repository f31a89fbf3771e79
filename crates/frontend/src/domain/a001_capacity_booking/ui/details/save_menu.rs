use leptos::prelude::*;

use crate::domain::a001_capacity_booking::controller::SaveIntent;
use crate::domain::a001_capacity_booking::form_state::BookingField;
use crate::domain::a001_capacity_booking::ui::view_model::BookingViewModel;
use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;

fn menu_key(intent: SaveIntent) -> &'static str {
    match intent {
        SaveIntent::Draft => "SAVE_AS_DRAFT",
        SaveIntent::SaveAndSend => "SAVE_AND_SEND_TO_ATLAS",
        SaveIntent::Template => "SAVE_AS_TEMPLATE",
    }
}

/// Кнопка «Сохранить» с выбором варианта; шаблон спрашивает имя в модальном окне
#[component]
pub fn SaveMenu(vm: BookingViewModel) -> impl IntoView {
    let ctx = use_app_context();
    let is_open = RwSignal::new(false);
    let ask_template_name = RwSignal::new(false);

    let choose = move |intent: SaveIntent| {
        is_open.set(false);
        if intent == SaveIntent::Template {
            ask_template_name.set(true);
        } else {
            vm.save(intent);
        }
    };

    let close_template = Callback::new(move |_| ask_template_name.set(false));
    let template_issue = move || vm.issue_for(BookingField::TemplateName.name(), None);
    // окно остаётся открытым, только пока не задано имя шаблона
    let save_template = move |_| {
        if vm.save(SaveIntent::Template) || template_issue().is_none() {
            ask_template_name.set(false);
        }
    };

    view! {
        <div class="save-menu">
            <button
                class="button button--primary"
                disabled=move || vm.is_busy()
                on:click=move |_| is_open.update(|v| *v = !*v)
            >
                {move || ctx.t("SAVE")}
                {icon("chevron-down")}
            </button>

            <Show when=move || is_open.get()>
                <div class="dropdown dropdown--up">
                    {[SaveIntent::Draft, SaveIntent::SaveAndSend, SaveIntent::Template]
                        .into_iter()
                        .map(|intent| view! {
                            <button class="dropdown__item" on:click=move |_| choose(intent)>
                                {move || ctx.t(menu_key(intent))}
                            </button>
                        })
                        .collect_view()}
                </div>
            </Show>

            <Show when=move || ask_template_name.get()>
                <Modal
                    title=Signal::derive(move || ctx.t("SAVE_AS_TEMPLATE"))
                    on_close=close_template
                    footer=move || view! {
                        <button class="button button--secondary" on:click=move |_| close_template.run(())>
                            {move || ctx.t("CANCEL")}
                        </button>
                        <button class="button button--primary" on:click=save_template>
                            {move || ctx.t("SAVE")}
                        </button>
                    }
                >
                    <div class="form-group" class:form-group--invalid=move || template_issue().is_some()>
                        <label for="templateName">{move || ctx.t("TEMPLATE_NAME")}</label>
                        <input
                            type="text"
                            id="templateName"
                            prop:value=move || vm.state.with(|s| s.form.record().template_name.clone())
                            on:input=move |ev| vm.set_field(BookingField::TemplateName, event_target_value(&ev))
                        />
                        {move || template_issue().map(|key| view! { <div class="form-error">{ctx.t(key)}</div> })}
                    </div>
                </Modal>
            </Show>
        </div>
    }
}
