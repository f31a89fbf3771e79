use contracts::domain::a001_capacity_booking::aggregate::BookingRecord;
use leptos::prelude::*;

use crate::domain::a001_capacity_booking::api::HttpBookingStore;
use crate::domain::a001_capacity_booking::controller::{BookingController, BookingState, SaveIntent};
use crate::domain::a001_capacity_booking::form_state::{BookingField, SlotField};
use crate::domain::a001_capacity_booking::partition::BookingBuckets;
use crate::domain::a001_capacity_booking::validation::{validate_for_save, ValidationIssue};
use crate::shared::date_utils::now_in_slot_zone;

type Controller = BookingController<HttpBookingStore>;

/// ViewModel экрана бронирования: контроллер плюс зеркальные сигналы
#[derive(Clone, Copy)]
pub struct BookingViewModel {
    controller: StoredValue<Controller, LocalStorage>,
    /// Mirror of the controller state, refreshed by its observer
    pub state: RwSignal<BookingState>,
    pub issues: RwSignal<Vec<ValidationIssue>>,
    pub search: RwSignal<String>,
}

impl BookingViewModel {
    pub fn new() -> Self {
        let controller = Controller::new(HttpBookingStore::new());
        let state = RwSignal::new(controller.snapshot());
        controller.set_observer(move |snapshot| state.set(snapshot.clone()));

        Self {
            controller: StoredValue::new_local(controller),
            state,
            issues: RwSignal::new(Vec::new()),
            search: RwSignal::new(String::new()),
        }
    }

    fn controller(&self) -> Controller {
        self.controller.with_value(Controller::clone)
    }

    pub fn record(&self) -> BookingRecord {
        self.state.with(|s| s.form.record().clone())
    }

    pub fn is_edit_mode(&self) -> bool {
        self.state.with(|s| s.form.is_edit_mode())
    }

    pub fn is_busy(&self) -> bool {
        self.state.with(|s| s.busy())
    }

    /// Buckets after the sidebar search
    pub fn visible_buckets(&self) -> BookingBuckets {
        let query = self.search.get();
        self.state.with(|s| s.buckets.filtered(&query))
    }

    /// Translation key of the first issue for one input
    pub fn issue_for(&self, field: &str, slot: Option<usize>) -> Option<&'static str> {
        self.issues.with(|issues| {
            issues
                .iter()
                .find(|issue| issue.is_for(field, slot))
                .map(|issue| issue.key)
        })
    }

    pub fn set_field(&self, field: BookingField, value: String) {
        self.controller().edit(|form| form.set_field(field, value));
    }

    pub fn set_slot_field(&self, index: usize, field: SlotField, value: String) {
        if let Err(e) = self
            .controller()
            .edit(|form| form.set_slot_field(index, field, value))
        {
            log::warn!("{}", e);
        }
    }

    pub fn add_slot(&self) {
        self.controller().edit(|form| form.add_slot());
    }

    pub fn remove_slot(&self, index: usize) {
        match self.controller().edit(|form| form.remove_slot(index)) {
            Ok(true) => self.issues.update(|issues| issues.retain(|i| i.slot.is_none())),
            Ok(false) => log::debug!("Last trailer slot kept"),
            Err(e) => log::warn!("{}", e),
        }
    }

    pub fn create_new(&self) {
        self.issues.set(Vec::new());
        let controller = self.controller();
        controller.clear_error();
        controller.edit(|form| form.reset());
    }

    pub fn dismiss_error(&self) {
        self.controller().clear_error();
    }

    pub fn refresh(&self) {
        let controller = self.controller();
        wasm_bindgen_futures::spawn_local(async move {
            let _ = controller.refresh().await;
        });
    }

    pub fn open(&self, id: String) {
        self.issues.set(Vec::new());
        let controller = self.controller();
        wasm_bindgen_futures::spawn_local(async move {
            let _ = controller.open(&id).await;
        });
    }

    /// Check the form first; only a clean form reaches the controller
    pub fn save(&self, intent: SaveIntent) -> bool {
        let record = self.record();
        if let Err(issues) = validate_for_save(&record, intent, now_in_slot_zone()) {
            log::debug!("Save blocked by {} validation issue(s)", issues.len());
            self.issues.set(issues);
            return false;
        }
        self.issues.set(Vec::new());

        let controller = self.controller();
        wasm_bindgen_futures::spawn_local(async move {
            let _ = controller.save(intent).await;
        });
        true
    }

    pub fn delete(&self) {
        self.issues.set(Vec::new());
        let controller = self.controller();
        wasm_bindgen_futures::spawn_local(async move {
            let _ = controller.delete().await;
        });
    }
}
