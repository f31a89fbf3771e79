use contracts::domain::a001_capacity_booking::aggregate::{BookingRecord, BookingStatus};

/// The three sidebar groups. Order inside each group follows the fetched list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingBuckets {
    pub draft: Vec<BookingRecord>,
    pub confirmed: Vec<BookingRecord>,
    pub template: Vec<BookingRecord>,
}

/// Split a fetched list by status.
///
/// Records with no status or an unknown one end up in no group.
pub fn partition(records: Vec<BookingRecord>) -> BookingBuckets {
    let mut buckets = BookingBuckets::default();
    for record in records {
        match record.status {
            Some(BookingStatus::Draft) => buckets.draft.push(record),
            Some(BookingStatus::Confirmed) => buckets.confirmed.push(record),
            Some(BookingStatus::Template) => buckets.template.push(record),
            Some(BookingStatus::Other(_)) | None => {}
        }
    }
    buckets
}

fn matches_query(record: &BookingRecord, needle: &str) -> bool {
    let id = record.to_string_id().unwrap_or_default();
    [
        id.as_str(),
        record.ship_from.as_str(),
        record.unload_point.as_str(),
        record.last_consignee.as_str(),
        record.template_name.as_str(),
        record.transmission_number.as_deref().unwrap_or(""),
    ]
    .iter()
    .any(|value| value.to_lowercase().contains(needle))
}

impl BookingBuckets {
    pub fn total(&self) -> usize {
        self.draft.len() + self.confirmed.len() + self.template.len()
    }

    /// Sidebar search: case-insensitive substring over id, places, consignee,
    /// template name and transmission number. Blank query keeps everything.
    pub fn filtered(&self, query: &str) -> BookingBuckets {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }
        let keep = |list: &[BookingRecord]| -> Vec<BookingRecord> {
            list.iter()
                .filter(|r| matches_query(r, &needle))
                .cloned()
                .collect()
        };
        BookingBuckets {
            draft: keep(&self.draft),
            confirmed: keep(&self.confirmed),
            template: keep(&self.template),
        }
    }
}
