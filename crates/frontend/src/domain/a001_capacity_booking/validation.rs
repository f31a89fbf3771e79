use chrono::NaiveDateTime;
use contracts::domain::a001_capacity_booking::aggregate::BookingRecord;

use super::controller::SaveIntent;
use super::form_state::{BookingField, SlotField};
use crate::shared::date_utils::parse_slot_time;

/// One problem found in the form; `key` is a translation key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: &'static str,
    /// Row index for trailer slot fields
    pub slot: Option<usize>,
    pub key: &'static str,
}

impl ValidationIssue {
    pub(crate) fn field(field: BookingField, key: &'static str) -> Self {
        Self {
            field: field.name(),
            slot: None,
            key,
        }
    }

    pub(crate) fn slot(index: usize, field: SlotField, key: &'static str) -> Self {
        Self {
            field: field.name(),
            slot: Some(index),
            key,
        }
    }

    /// Does this issue belong to the given input
    pub fn is_for(&self, field: &str, slot: Option<usize>) -> bool {
        self.field == field && self.slot == slot
    }
}

const REQUIRED: [BookingField; 3] = [
    BookingField::ShipFrom,
    BookingField::UnloadPoint,
    BookingField::LastConsignee,
];

fn is_positive_integer(value: &str) -> bool {
    value.trim().parse::<u32>().map(|n| n > 0).unwrap_or(false)
}

/// Проверка формы перед сохранением. Вызывается из UI до `save`,
/// в хранилище ничего не отправляет.
///
/// `now` is the wall-clock time in the slot zone; past slot times are only
/// rejected for records that have never been saved.
pub fn validate_for_save(
    record: &BookingRecord,
    intent: SaveIntent,
    now: NaiveDateTime,
) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    for field in REQUIRED {
        if field.get(record).trim().is_empty() {
            issues.push(ValidationIssue::field(field, "REQUIRED_FIELD"));
        }
    }
    if intent == SaveIntent::Template && record.template_name.trim().is_empty() {
        issues.push(ValidationIssue::field(
            BookingField::TemplateName,
            "TEMPLATE_NAME_REQUIRED",
        ));
    }

    let is_new = record.id.is_none();
    for (index, slot) in record.trailer_slots.iter().enumerate() {
        if !is_positive_integer(&slot.trailer_count) {
            issues.push(ValidationIssue::slot(
                index,
                SlotField::TrailerCount,
                "INVALID_TRAILER_COUNT",
            ));
        }
        for field in [SlotField::SlotStartTime, SlotField::SlotEndTime] {
            match parse_slot_time(field.get(slot)) {
                None => issues.push(ValidationIssue::slot(index, field, "INVALID_SLOT_TIME")),
                Some(time) if is_new && time < now => {
                    issues.push(ValidationIssue::slot(index, field, "SLOT_IN_PAST"))
                }
                Some(_) => {}
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
