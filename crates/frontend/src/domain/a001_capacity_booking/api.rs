use async_trait::async_trait;
use contracts::domain::a001_capacity_booking::aggregate::BookingRecord;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use super::error::BookingError;
use super::store::BookingStore;
use crate::shared::api_utils::api_url;

const API_PATH: &str = "/api/booking";

/// REST клиент к backend `/api/booking`
#[derive(Debug, Clone, Default)]
pub struct HttpBookingStore;

impl HttpBookingStore {
    pub fn new() -> Self {
        Self
    }
}

fn collection_url() -> String {
    api_url(API_PATH)
}

fn item_url(id: &str) -> String {
    api_url(&format!("{}/{}", API_PATH, urlencoding::encode(id)))
}

fn request_failed(e: gloo_net::Error) -> BookingError {
    BookingError::Network(format!("Request failed: {}", e))
}

/// Non-2xx responses become `Network`; a 404 from fetch-by-id becomes `NotFound`
fn check_status(response: &Response, id: Option<&str>) -> Result<(), BookingError> {
    if response.ok() {
        return Ok(());
    }
    match (response.status(), id) {
        (404, Some(id)) => Err(BookingError::NotFound(id.to_string())),
        (status, _) => Err(BookingError::Network(format!("HTTP error: {}", status))),
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BookingError> {
    response
        .json()
        .await
        .map_err(|e| BookingError::Network(format!("Failed to parse response: {}", e)))
}

#[async_trait(?Send)]
impl BookingStore for HttpBookingStore {
    async fn list(&self) -> Result<Vec<BookingRecord>, BookingError> {
        let response = Request::get(&collection_url())
            .send()
            .await
            .map_err(request_failed)?;
        check_status(&response, None)?;
        read_json(response).await
    }

    async fn get(&self, id: &str) -> Result<BookingRecord, BookingError> {
        let response = Request::get(&item_url(id))
            .send()
            .await
            .map_err(request_failed)?;
        check_status(&response, Some(id))?;
        read_json(response).await
    }

    async fn create(&self, record: &BookingRecord) -> Result<BookingRecord, BookingError> {
        let response = Request::post(&collection_url())
            .json(record)
            .map_err(request_failed)?
            .send()
            .await
            .map_err(request_failed)?;
        check_status(&response, None)?;
        read_json(response).await
    }

    async fn update(
        &self,
        id: &str,
        record: &BookingRecord,
    ) -> Result<BookingRecord, BookingError> {
        let response = Request::put(&item_url(id))
            .json(record)
            .map_err(request_failed)?
            .send()
            .await
            .map_err(request_failed)?;
        check_status(&response, None)?;
        read_json(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), BookingError> {
        let response = Request::delete(&item_url(id))
            .send()
            .await
            .map_err(request_failed)?;
        check_status(&response, None)
    }
}
