use async_trait::async_trait;
use contracts::domain::a001_capacity_booking::aggregate::BookingRecord;

use super::error::BookingError;

/// Хранилище бронирований (удалённый REST сервис).
///
/// The controller is generic over this trait; the browser build uses
/// [`HttpBookingStore`](super::api::HttpBookingStore).
#[async_trait(?Send)]
pub trait BookingStore {
    async fn list(&self) -> Result<Vec<BookingRecord>, BookingError>;

    /// Fails with [`BookingError::NotFound`] when the id is unknown
    async fn get(&self, id: &str) -> Result<BookingRecord, BookingError>;

    /// The store assigns an id when the record has none
    async fn create(&self, record: &BookingRecord) -> Result<BookingRecord, BookingError>;

    async fn update(&self, id: &str, record: &BookingRecord) -> Result<BookingRecord, BookingError>;

    async fn delete(&self, id: &str) -> Result<(), BookingError>;
}
