use contracts::domain::a001_capacity_booking::aggregate::{BookingRecord, TrailerSlot};

use super::error::BookingError;

/// Scalar fields of the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    ShipFrom,
    UnloadPoint,
    LastConsignee,
    ServiceProvider,
    PickupReference,
    MessageToCarrier,
    TemplateName,
}

impl BookingField {
    /// Wire (camelCase) name, also used as the input `name` attribute
    pub fn name(&self) -> &'static str {
        match self {
            BookingField::ShipFrom => "shipFrom",
            BookingField::UnloadPoint => "unloadPoint",
            BookingField::LastConsignee => "lastConsignee",
            BookingField::ServiceProvider => "serviceProvider",
            BookingField::PickupReference => "pickupReference",
            BookingField::MessageToCarrier => "messageToCarrier",
            BookingField::TemplateName => "templateName",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|f| f.name() == name)
    }

    pub fn all() -> [BookingField; 7] {
        [
            BookingField::ShipFrom,
            BookingField::UnloadPoint,
            BookingField::LastConsignee,
            BookingField::ServiceProvider,
            BookingField::PickupReference,
            BookingField::MessageToCarrier,
            BookingField::TemplateName,
        ]
    }

    pub fn get<'a>(&self, record: &'a BookingRecord) -> &'a str {
        match self {
            BookingField::ShipFrom => &record.ship_from,
            BookingField::UnloadPoint => &record.unload_point,
            BookingField::LastConsignee => &record.last_consignee,
            BookingField::ServiceProvider => &record.service_provider,
            BookingField::PickupReference => &record.pickup_reference,
            BookingField::MessageToCarrier => &record.message_to_carrier,
            BookingField::TemplateName => &record.template_name,
        }
    }

    fn value_mut<'a>(&self, record: &'a mut BookingRecord) -> &'a mut String {
        match self {
            BookingField::ShipFrom => &mut record.ship_from,
            BookingField::UnloadPoint => &mut record.unload_point,
            BookingField::LastConsignee => &mut record.last_consignee,
            BookingField::ServiceProvider => &mut record.service_provider,
            BookingField::PickupReference => &mut record.pickup_reference,
            BookingField::MessageToCarrier => &mut record.message_to_carrier,
            BookingField::TemplateName => &mut record.template_name,
        }
    }
}

/// Fields of one trailer slot row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotField {
    TrailerCount,
    SlotStartTime,
    SlotEndTime,
}

impl SlotField {
    pub fn name(&self) -> &'static str {
        match self {
            SlotField::TrailerCount => "trailerCount",
            SlotField::SlotStartTime => "slotStartTime",
            SlotField::SlotEndTime => "slotEndTime",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            SlotField::TrailerCount,
            SlotField::SlotStartTime,
            SlotField::SlotEndTime,
        ]
        .into_iter()
        .find(|f| f.name() == name)
    }

    pub fn get<'a>(&self, slot: &'a TrailerSlot) -> &'a str {
        match self {
            SlotField::TrailerCount => &slot.trailer_count,
            SlotField::SlotStartTime => &slot.slot_start_time,
            SlotField::SlotEndTime => &slot.slot_end_time,
        }
    }

    fn value_mut<'a>(&self, slot: &'a mut TrailerSlot) -> &'a mut String {
        match self {
            SlotField::TrailerCount => &mut slot.trailer_count,
            SlotField::SlotStartTime => &mut slot.slot_start_time,
            SlotField::SlotEndTime => &mut slot.slot_end_time,
        }
    }
}

/// The single booking being edited.
///
/// Every operation is synchronous and only replaces in-memory state; nothing
/// here talks to the record store. `trailer_slots` never drops below one row.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    record: BookingRecord,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingForm {
    pub fn new() -> Self {
        Self {
            record: BookingRecord::empty(),
        }
    }

    pub fn record(&self) -> &BookingRecord {
        &self.record
    }

    pub fn slots(&self) -> &[TrailerSlot] {
        &self.record.trailer_slots
    }

    pub fn is_edit_mode(&self) -> bool {
        self.record.id.is_some()
    }

    /// Replace one scalar field; no validation here
    pub fn set_field(&mut self, field: BookingField, value: impl Into<String>) {
        *field.value_mut(&mut self.record) = value.into();
    }

    /// Same as [`set_field`](Self::set_field), addressed by the input's `name`
    pub fn set_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), BookingError> {
        let field =
            BookingField::from_name(name).ok_or_else(|| BookingError::UnknownField(name.into()))?;
        self.set_field(field, value);
        Ok(())
    }

    pub fn set_slot_field(
        &mut self,
        index: usize,
        field: SlotField,
        value: impl Into<String>,
    ) -> Result<(), BookingError> {
        let len = self.record.trailer_slots.len();
        let slot = self
            .record
            .trailer_slots
            .get_mut(index)
            .ok_or(BookingError::SlotIndexOutOfRange { index, len })?;
        *field.value_mut(slot) = value.into();
        Ok(())
    }

    /// Append one empty row at the end
    pub fn add_slot(&mut self) {
        self.record.trailer_slots.push(TrailerSlot::empty());
    }

    /// Remove the row at `index`, keeping the order of the rest.
    ///
    /// Returns `Ok(false)` and leaves the rows untouched when only one remains.
    pub fn remove_slot(&mut self, index: usize) -> Result<bool, BookingError> {
        let len = self.record.trailer_slots.len();
        if index >= len {
            return Err(BookingError::SlotIndexOutOfRange { index, len });
        }
        if len == 1 {
            return Ok(false);
        }
        self.record.trailer_slots.remove(index);
        Ok(true)
    }

    /// Fresh empty record: one empty slot, blank fields, no status
    pub fn reset(&mut self) {
        self.record = BookingRecord::empty();
    }

    /// Replace the active record with one fetched from the store
    pub fn load(&mut self, record: BookingRecord) {
        self.record = record;
        // a stored record without rows still has to be editable
        if self.record.trailer_slots.is_empty() {
            self.record.trailer_slots.push(TrailerSlot::empty());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_capacity_booking::aggregate::{BookingId, BookingStatus};

    fn slot(count: &str) -> TrailerSlot {
        TrailerSlot {
            trailer_count: count.into(),
            ..TrailerSlot::empty()
        }
    }

    fn form_with_counts(counts: &[&str]) -> BookingForm {
        let mut form = BookingForm::new();
        form.load(BookingRecord {
            trailer_slots: counts.iter().map(|c| slot(c)).collect(),
            ..BookingRecord::empty()
        });
        form
    }

    fn counts(form: &BookingForm) -> Vec<String> {
        form.slots().iter().map(|s| s.trailer_count.clone()).collect()
    }

    #[test]
    fn test_new_form_has_one_empty_slot() {
        let form = BookingForm::new();
        assert_eq!(form.slots(), &[TrailerSlot::empty()]);
        assert!(!form.is_edit_mode());
        assert!(form.record().status.is_none());
    }

    #[test]
    fn test_set_field() {
        let mut form = BookingForm::new();
        form.set_field(BookingField::ShipFrom, "Gothenburg");
        form.set_field_by_name("unloadPoint", "Malmö").unwrap();
        form.set_field(BookingField::TemplateName, "Weekly");
        assert_eq!(form.record().ship_from, "Gothenburg");
        assert_eq!(form.record().unload_point, "Malmö");
        assert_eq!(form.record().template_name, "Weekly");
        assert_eq!(
            form.set_field_by_name("nope", "x"),
            Err(BookingError::UnknownField("nope".into()))
        );
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in BookingField::all() {
            assert_eq!(BookingField::from_name(field.name()), Some(field));
        }
        assert_eq!(SlotField::from_name("slotEndTime"), Some(SlotField::SlotEndTime));
        assert_eq!(SlotField::from_name("slotEnd"), None);
    }

    #[test]
    fn test_set_slot_field() {
        let mut form = form_with_counts(&["1", "2"]);
        form.set_slot_field(1, SlotField::SlotStartTime, "2030-01-10T09:00")
            .unwrap();
        assert_eq!(form.slots()[1].slot_start_time, "2030-01-10T09:00");
        assert_eq!(form.slots()[0].slot_start_time, "");
        assert_eq!(
            form.set_slot_field(2, SlotField::TrailerCount, "3"),
            Err(BookingError::SlotIndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_add_then_remove_last_restores_rows() {
        let mut form = form_with_counts(&["1", "2", "3"]);
        let before = form.slots().to_vec();
        form.add_slot();
        assert_eq!(form.slots().len(), 4);
        let last = form.slots().len() - 1;
        assert!(form.remove_slot(last).unwrap());
        assert_eq!(form.slots(), before.as_slice());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut form = form_with_counts(&["a", "b", "c", "d"]);
        assert!(form.remove_slot(1).unwrap());
        assert_eq!(counts(&form), vec!["a", "c", "d"]);
        assert!(form.remove_slot(0).unwrap());
        assert_eq!(counts(&form), vec!["c", "d"]);
    }

    #[test]
    fn test_remove_last_remaining_slot_is_refused() {
        let mut form = form_with_counts(&["7"]);
        assert!(!form.remove_slot(0).unwrap());
        assert_eq!(counts(&form), vec!["7"]);
        assert_eq!(
            form.remove_slot(3),
            Err(BookingError::SlotIndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_reset_and_load() {
        let mut form = BookingForm::new();
        form.load(BookingRecord {
            id: Some(BookingId::new("17")),
            status: Some(BookingStatus::Draft),
            ship_from: "Ghent".into(),
            trailer_slots: Vec::new(),
            ..BookingRecord::empty()
        });
        assert!(form.is_edit_mode());
        assert_eq!(form.slots().len(), 1);

        form.reset();
        assert_eq!(form.record(), &BookingRecord::empty());
    }
}
