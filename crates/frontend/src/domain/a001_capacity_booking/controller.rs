use std::cell::RefCell;
use std::rc::Rc;

use contracts::domain::a001_capacity_booking::aggregate::{
    generate_transmission_number, BookingId, BookingRecord, BookingStatus,
};

use super::error::BookingError;
use super::form_state::{BookingField, BookingForm, SlotField};
use super::partition::{partition, BookingBuckets};
use super::store::BookingStore;
use super::validation::ValidationIssue;
use crate::shared::date_utils::normalize_slot_time;

/// Вариант сохранения, выбранный в меню
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveIntent {
    Draft,
    SaveAndSend,
    Template,
}

impl SaveIntent {
    pub fn status(&self) -> BookingStatus {
        match self {
            SaveIntent::Draft => BookingStatus::Draft,
            SaveIntent::SaveAndSend => BookingStatus::Confirmed,
            SaveIntent::Template => BookingStatus::Template,
        }
    }

    /// Translation key of the busy label
    pub fn label_key(&self) -> &'static str {
        match self {
            SaveIntent::Draft => "SAVED_AS_DRAFT",
            SaveIntent::SaveAndSend => "SAVED_AND_SENT_TO_ATLAS",
            SaveIntent::Template => "SAVED_AS_TEMPLATE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyReason {
    Saving(SaveIntent),
    Deleting,
    Loading,
}

impl BusyReason {
    pub fn label_key(&self) -> &'static str {
        match self {
            BusyReason::Saving(intent) => intent.label_key(),
            BusyReason::Deleting => "DELETING",
            BusyReason::Loading => "LOADING",
        }
    }
}

/// Everything the booking screen renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingState {
    pub form: BookingForm,
    pub buckets: BookingBuckets,
    /// Outstanding store requests
    pub in_flight: usize,
    /// Reason of the outermost outstanding request
    pub busy_reason: Option<BusyReason>,
    pub last_error: Option<BookingError>,
}

impl BookingState {
    pub fn busy(&self) -> bool {
        self.in_flight > 0
    }
}

type Observer = Rc<dyn Fn(&BookingState)>;

/// Контроллер сохранения: одна операция хранилища на одно намерение
/// пользователя, затем детерминированное обновление локального состояния.
///
/// Cloning is cheap and every clone drives the same state. No `RefCell`
/// borrow is held across an `.await`.
pub struct BookingController<S: BookingStore> {
    store: Rc<S>,
    state: Rc<RefCell<BookingState>>,
    observer: Rc<RefCell<Option<Observer>>>,
}

impl<S: BookingStore> Clone for BookingController<S> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
            state: Rc::clone(&self.state),
            observer: Rc::clone(&self.observer),
        }
    }
}

impl<S: BookingStore> BookingController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Rc::new(store),
            state: Rc::new(RefCell::new(BookingState::default())),
            observer: Rc::new(RefCell::new(None)),
        }
    }

    /// Called after every state change
    pub fn set_observer(&self, observer: impl Fn(&BookingState) + 'static) {
        *self.observer.borrow_mut() = Some(Rc::new(observer));
        self.notify();
    }

    pub fn snapshot(&self) -> BookingState {
        self.state.borrow().clone()
    }

    fn notify(&self) {
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(&self.state.borrow());
        }
    }

    fn begin(&self, reason: BusyReason) {
        {
            let mut state = self.state.borrow_mut();
            if state.in_flight == 0 {
                state.busy_reason = Some(reason);
            }
            state.in_flight += 1;
        }
        self.notify();
    }

    fn end(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.in_flight = state.in_flight.saturating_sub(1);
            if state.in_flight == 0 {
                state.busy_reason = None;
            }
        }
        self.notify();
    }

    fn fail<T>(&self, action: &str, error: BookingError) -> Result<T, BookingError> {
        log::error!("Booking {} failed: {}", action, error);
        self.state.borrow_mut().last_error = Some(error.clone());
        self.notify();
        Err(error)
    }

    pub fn clear_error(&self) {
        self.state.borrow_mut().last_error = None;
        self.notify();
    }

    /// Run a form mutation against the active record
    pub fn edit<R>(&self, f: impl FnOnce(&mut BookingForm) -> R) -> R {
        let result = f(&mut self.state.borrow_mut().form);
        self.notify();
        result
    }

    /// Payload for the store: status, id and transmission number finalized,
    /// slot times rewritten to the fixed format
    fn prepare(&self, intent: SaveIntent) -> Result<BookingRecord, BookingError> {
        let mut record = self.state.borrow().form.record().clone();

        if intent == SaveIntent::Template && record.template_name.trim().is_empty() {
            return Err(BookingError::Validation(vec![ValidationIssue::field(
                BookingField::TemplateName,
                "TEMPLATE_NAME_REQUIRED",
            )]));
        }

        let mut issues = Vec::new();
        for (index, slot) in record.trailer_slots.iter_mut().enumerate() {
            match normalize_slot_time(&slot.slot_start_time) {
                Ok(value) => slot.slot_start_time = value,
                Err(_) => issues.push(ValidationIssue::slot(
                    index,
                    SlotField::SlotStartTime,
                    "INVALID_SLOT_TIME",
                )),
            }
            match normalize_slot_time(&slot.slot_end_time) {
                Ok(value) => slot.slot_end_time = value,
                Err(_) => issues.push(ValidationIssue::slot(
                    index,
                    SlotField::SlotEndTime,
                    "INVALID_SLOT_TIME",
                )),
            }
        }
        if !issues.is_empty() {
            return Err(BookingError::Validation(issues));
        }

        record.status = Some(intent.status());
        record.transmission_number = Some(generate_transmission_number());
        if intent == SaveIntent::Template {
            // шаблон всегда создаётся как новая запись
            record.id = Some(BookingId::generate());
        }
        Ok(record)
    }

    /// Persist the active record. Returns the record as stored.
    pub async fn save(&self, intent: SaveIntent) -> Result<BookingRecord, BookingError> {
        let payload = match self.prepare(intent) {
            Ok(payload) => payload,
            Err(e) => return self.fail("save", e),
        };

        self.begin(BusyReason::Saving(intent));
        let result = match (intent, payload.id.as_ref()) {
            (SaveIntent::Template, _) | (_, None) => self.store.create(&payload).await,
            (_, Some(id)) => self.store.update(id.value(), &payload).await,
        };

        match result {
            Ok(saved) => {
                log::info!(
                    "Booking {} saved as {}",
                    saved.to_string_id().unwrap_or_default(),
                    intent.status().code()
                );
                {
                    let mut state = self.state.borrow_mut();
                    state.form.reset();
                    state.last_error = None;
                }
                self.notify();
                // ошибка перезагрузки списка уже записана в last_error
                let _ = self.refresh().await;
                self.end();
                Ok(saved)
            }
            Err(e) => {
                self.end();
                self.fail("save", e)
            }
        }
    }

    /// Delete the active record
    pub async fn delete(&self) -> Result<(), BookingError> {
        let id = self.state.borrow().form.record().id.clone();
        let Some(id) = id else {
            return self.fail("delete", BookingError::MissingId);
        };

        self.begin(BusyReason::Deleting);
        match self.store.delete(id.value()).await {
            Ok(()) => {
                log::info!("Booking {} deleted", id);
                {
                    let mut state = self.state.borrow_mut();
                    state.form.reset();
                    state.last_error = None;
                }
                self.notify();
                let _ = self.refresh().await;
                self.end();
                Ok(())
            }
            Err(e) => {
                self.end();
                self.fail("delete", e)
            }
        }
    }

    /// Fetch a record by id and make it the active one
    pub async fn open(&self, id: &str) -> Result<(), BookingError> {
        self.begin(BusyReason::Loading);
        let result = self.store.get(id).await;
        self.end();
        match result {
            Ok(record) => {
                self.edit(|form| form.load(record));
                Ok(())
            }
            Err(e) => self.fail("open", e),
        }
    }

    /// Reload the full list and regroup it
    pub async fn refresh(&self) -> Result<(), BookingError> {
        self.begin(BusyReason::Loading);
        let result = self.store.list().await;
        match result {
            Ok(records) => {
                self.state.borrow_mut().buckets = partition(records);
                self.end();
                Ok(())
            }
            Err(e) => {
                self.end();
                self.fail("list load", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::domain::a001_capacity_booking::aggregate::TrailerSlot;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Get(String),
        Create(BookingRecord),
        Update(String, BookingRecord),
        Delete(String),
    }

    /// In-memory store that records every call; clones share the data
    #[derive(Default, Clone)]
    struct FakeStore {
        records: Rc<RefCell<Vec<BookingRecord>>>,
        calls: Rc<RefCell<Vec<Call>>>,
        fail: Rc<Cell<bool>>,
        next_id: Rc<Cell<u32>>,
    }

    impl FakeStore {
        fn check(&self) -> Result<(), BookingError> {
            if self.fail.get() {
                Err(BookingError::Network("offline".into()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait(?Send)]
    impl BookingStore for FakeStore {
        async fn list(&self) -> Result<Vec<BookingRecord>, BookingError> {
            self.calls.borrow_mut().push(Call::List);
            self.check()?;
            Ok(self.records.borrow().clone())
        }

        async fn get(&self, id: &str) -> Result<BookingRecord, BookingError> {
            self.calls.borrow_mut().push(Call::Get(id.into()));
            self.check()?;
            self.records
                .borrow()
                .iter()
                .find(|r| r.to_string_id().as_deref() == Some(id))
                .cloned()
                .ok_or_else(|| BookingError::NotFound(id.into()))
        }

        async fn create(&self, record: &BookingRecord) -> Result<BookingRecord, BookingError> {
            self.calls.borrow_mut().push(Call::Create(record.clone()));
            self.check()?;
            let mut saved = record.clone();
            if saved.id.is_none() {
                self.next_id.set(self.next_id.get() + 1);
                saved.id = Some(BookingId::new(format!("srv-{}", self.next_id.get())));
            }
            self.records.borrow_mut().push(saved.clone());
            Ok(saved)
        }

        async fn update(
        &self,
        id: &str,
        record: &BookingRecord,
    ) -> Result<BookingRecord, BookingError> {
            self.calls
                .borrow_mut()
                .push(Call::Update(id.into(), record.clone()));
            self.check()?;
            let mut records = self.records.borrow_mut();
            let existing = records
                .iter_mut()
                .find(|r| r.to_string_id().as_deref() == Some(id))
                .ok_or_else(|| BookingError::NotFound(id.into()))?;
            *existing = record.clone();
            Ok(record.clone())
        }

        async fn delete(&self, id: &str) -> Result<(), BookingError> {
            self.calls.borrow_mut().push(Call::Delete(id.into()));
            self.check()?;
            self.records
                .borrow_mut()
                .retain(|r| r.to_string_id().as_deref() != Some(id));
            Ok(())
        }
    }

    fn stored(id: &str, status: BookingStatus) -> BookingRecord {
        BookingRecord {
            id: Some(BookingId::new(id)),
            status: Some(status),
            ship_from: "Ghent".into(),
            unload_point: "Tuve".into(),
            last_consignee: "Cab Plant".into(),
            transmission_number: Some("000000001".into()),
            trailer_slots: vec![TrailerSlot {
                trailer_count: "2".into(),
                slot_start_time: "2030-01-10 09:00".into(),
                slot_end_time: "2030-01-10 10:00".into(),
            }],
            ..BookingRecord::empty()
        }
    }

    fn fill_example(form: &mut BookingForm) {
        form.set_field(BookingField::ShipFrom, "Gothenburg");
        form.set_field(BookingField::UnloadPoint, "Malmö");
        form.set_field(BookingField::LastConsignee, "ACME");
        form.set_slot_field(0, SlotField::TrailerCount, "3").unwrap();
        form.set_slot_field(0, SlotField::SlotStartTime, "2024-01-10T09:00")
            .unwrap();
        form.set_slot_field(0, SlotField::SlotEndTime, "2024-01-10T10:00")
            .unwrap();
    }

    fn calls(store: &FakeStore) -> Vec<Call> {
        store.calls.borrow().clone()
    }

    fn controller(records: Vec<BookingRecord>) -> (BookingController<FakeStore>, FakeStore) {
        let store = FakeStore::default();
        *store.records.borrow_mut() = records;
        (BookingController::new(store.clone()), store)
    }

    #[test]
    fn test_save_and_send_new_record() {
        let (ctrl, store) = controller(Vec::new());
        ctrl.edit(fill_example);

        let saved = block_on(ctrl.save(SaveIntent::SaveAndSend)).unwrap();

        let log = calls(&store);
        assert_eq!(log.len(), 2);
        let Call::Create(sent) = &log[0] else {
            panic!("expected create, got {:?}", log[0]);
        };
        assert_eq!(log[1], Call::List);
        assert_eq!(sent.id, None);
        assert_eq!(sent.status, Some(BookingStatus::Confirmed));
        assert_eq!(sent.trailer_slots[0].slot_start_time, "2024-01-10 09:00");
        assert_eq!(sent.trailer_slots[0].slot_end_time, "2024-01-10 10:00");
        let number = sent.transmission_number.clone().unwrap();
        assert_eq!(number.len(), 9);
        assert!(number.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(saved.id, Some(BookingId::new("srv-1")));

        let state = ctrl.snapshot();
        assert_eq!(state.form, BookingForm::new());
        assert_eq!(state.form.slots().len(), 1);
        assert_eq!(state.buckets.confirmed.len(), 1);
        assert!(!state.busy());
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn test_draft_updates_existing_and_creates_new() {
        let (ctrl, store) = controller(vec![stored("17", BookingStatus::Draft)]);
        block_on(ctrl.open("17")).unwrap();
        ctrl.edit(|f| f.set_field(BookingField::PickupReference, "PU-9"));
        block_on(ctrl.save(SaveIntent::Draft)).unwrap();

        let log = calls(&store);
        assert_eq!(log[0], Call::Get("17".into()));
        let Call::Update(id, sent) = &log[1] else {
            panic!("expected update, got {:?}", log[1]);
        };
        assert_eq!(id, "17");
        assert_eq!(sent.status, Some(BookingStatus::Draft));
        assert_eq!(sent.pickup_reference, "PU-9");
        assert_ne!(sent.transmission_number.as_deref(), Some("000000001"));

        ctrl.edit(fill_example);
        block_on(ctrl.save(SaveIntent::Draft)).unwrap();
        let log = calls(&store);
        assert!(matches!(&log[3], Call::Create(r) if r.id.is_none()));
    }

    #[test]
    fn test_template_always_creates_with_new_id() {
        let (ctrl, store) = controller(vec![stored("tpl", BookingStatus::Template)]);
        block_on(ctrl.open("tpl")).unwrap();
        ctrl.edit(|f| f.set_field(BookingField::TemplateName, "Weekly"));

        block_on(ctrl.save(SaveIntent::Template)).unwrap();

        let log = calls(&store);
        let Call::Create(sent) = &log[1] else {
            panic!("expected create, got {:?}", log[1]);
        };
        let new_id = sent.id.clone().unwrap();
        assert_ne!(new_id, BookingId::new("tpl"));
        assert!(uuid::Uuid::parse_str(new_id.value()).is_ok());
        assert_eq!(sent.status, Some(BookingStatus::Template));
        assert!(!log.iter().any(|c| matches!(c, Call::Update(..))));
        // the edited template is still in the store under its old id
        assert!(store
            .records
            .borrow()
            .iter()
            .any(|r| r.id == Some(BookingId::new("tpl"))));
        assert_eq!(ctrl.snapshot().buckets.template.len(), 2);
    }

    #[test]
    fn test_template_without_name_issues_no_call() {
        let (ctrl, store) = controller(Vec::new());
        ctrl.edit(fill_example);

        let err = block_on(ctrl.save(SaveIntent::Template)).unwrap_err();

        assert!(matches!(
            &err,
            BookingError::Validation(issues) if issues[0].key == "TEMPLATE_NAME_REQUIRED"
        ));
        assert!(calls(&store).is_empty());
        let state = ctrl.snapshot();
        assert_eq!(state.last_error, Some(err));
        assert_eq!(state.form.record().ship_from, "Gothenburg");
    }

    #[test]
    fn test_unparseable_slot_time_blocks_save() {
        let (ctrl, store) = controller(Vec::new());
        ctrl.edit(fill_example);
        ctrl.edit(|f| f.set_slot_field(0, SlotField::SlotEndTime, "later"))
            .unwrap();

        let err = block_on(ctrl.save(SaveIntent::Draft)).unwrap_err();

        assert_eq!(
            err,
            BookingError::Validation(vec![ValidationIssue::slot(
                0,
                SlotField::SlotEndTime,
                "INVALID_SLOT_TIME"
            )])
        );
        assert!(calls(&store).is_empty());
    }

    #[test]
    fn test_blank_slot_times_stay_blank() {
        let (ctrl, store) = controller(Vec::new());
        ctrl.edit(|f| {
            f.set_field(BookingField::ShipFrom, "A");
            f.set_field(BookingField::UnloadPoint, "B");
            f.set_field(BookingField::LastConsignee, "C");
        });
        block_on(ctrl.save(SaveIntent::Draft)).unwrap();
        let Call::Create(sent) = &calls(&store)[0] else {
            panic!("expected create");
        };
        assert_eq!(sent.trailer_slots[0].slot_start_time, "");
    }

    #[test]
    fn test_delete_without_id_is_refused() {
        let (ctrl, store) = controller(Vec::new());
        ctrl.edit(fill_example);

        assert_eq!(block_on(ctrl.delete()), Err(BookingError::MissingId));
        assert!(calls(&store).is_empty());
        assert_eq!(ctrl.snapshot().last_error, Some(BookingError::MissingId));
        assert!(!ctrl.snapshot().busy());
    }

    #[test]
    fn test_delete_resets_and_reloads() {
        let (ctrl, store) = controller(vec![
            stored("1", BookingStatus::Draft),
            stored("2", BookingStatus::Confirmed),
        ]);
        block_on(ctrl.refresh()).unwrap();
        block_on(ctrl.open("1")).unwrap();

        block_on(ctrl.delete()).unwrap();

        let log = calls(&store);
        assert_eq!(&log[2..], &[Call::Delete("1".into()), Call::List]);
        let state = ctrl.snapshot();
        assert!(!state.form.is_edit_mode());
        assert!(state.buckets.draft.is_empty());
        assert_eq!(state.buckets.confirmed.len(), 1);
    }

    #[test]
    fn test_failed_save_clears_busy_and_keeps_form() {
        let (ctrl, store) = controller(Vec::new());
        ctrl.edit(fill_example);
        store.fail.set(true);

        let err = block_on(ctrl.save(SaveIntent::Draft)).unwrap_err();

        assert_eq!(err, BookingError::Network("offline".into()));
        let state = ctrl.snapshot();
        assert!(!state.busy());
        assert_eq!(state.busy_reason, None);
        assert_eq!(state.form.record().ship_from, "Gothenburg");
        assert_eq!(state.form.slots()[0].slot_start_time, "2024-01-10T09:00");
        assert_eq!(state.last_error, Some(err));
        // no retry, no reload
        assert_eq!(calls(&store).len(), 1);
    }

    #[test]
    fn test_open_failure_keeps_active_record() {
        let (ctrl, _store) = controller(Vec::new());
        ctrl.edit(fill_example);

        let err = block_on(ctrl.open("missing")).unwrap_err();

        assert_eq!(err, BookingError::NotFound("missing".into()));
        assert_eq!(ctrl.snapshot().form.record().ship_from, "Gothenburg");
    }

    #[test]
    fn test_busy_stays_up_until_reload_settles() {
        let (ctrl, _store) = controller(Vec::new());
        ctrl.edit(fill_example);

        let seen: Rc<RefCell<Vec<(bool, Option<BusyReason>)>>> = Rc::default();
        let sink = Rc::clone(&seen);
        ctrl.set_observer(move |state| sink.borrow_mut().push((state.busy(), state.busy_reason)));
        seen.borrow_mut().clear();

        block_on(ctrl.save(SaveIntent::SaveAndSend)).unwrap();

        let seen = seen.borrow();
        let (last, rest) = seen.split_last().unwrap();
        assert_eq!(*last, (false, None));
        assert!(!rest.is_empty());
        let saving = Some(BusyReason::Saving(SaveIntent::SaveAndSend));
        assert!(rest.iter().all(|entry| *entry == (true, saving)));
    }

    #[test]
    fn test_refresh_partitions_list() {
        let (ctrl, _store) = controller(vec![
            stored("1", BookingStatus::Draft),
            stored("2", BookingStatus::Other("ARCHIVED".into())),
            stored("3", BookingStatus::Template),
        ]);
        block_on(ctrl.refresh()).unwrap();
        let buckets = ctrl.snapshot().buckets;
        assert_eq!(buckets.draft.len(), 1);
        assert_eq!(buckets.template.len(), 1);
        assert_eq!(buckets.total(), 2);
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            BusyReason::Saving(SaveIntent::SaveAndSend).label_key(),
            "SAVED_AND_SENT_TO_ATLAS"
        );
        assert_eq!(SaveIntent::Template.status(), BookingStatus::Template);
    }
}
