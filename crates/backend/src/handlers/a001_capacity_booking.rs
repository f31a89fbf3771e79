use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_capacity_booking::aggregate::BookingRecord;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a001_capacity_booking::service::{self, BookingServiceError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
}

fn status_code(err: &BookingServiceError) -> StatusCode {
    match err {
        BookingServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        BookingServiceError::Conflict(_) => StatusCode::CONFLICT,
        BookingServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        BookingServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn into_status(err: BookingServiceError) -> StatusCode {
    let code = status_code(&err);
    if code == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Booking request failed: {:#}", err);
    } else {
        tracing::warn!("Booking request rejected: {}", err);
    }
    code
}

/// GET /api/booking
pub async fn list_all(
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<BookingRecord>>, StatusCode> {
    service::list_all(params.status.as_deref())
        .await
        .map(Json)
        .map_err(into_status)
}

/// GET /api/booking/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<BookingRecord>, StatusCode> {
    service::get_by_id(&id)
        .await
        .map(Json)
        .map_err(into_status)
}

/// POST /api/booking
pub async fn create(Json(record): Json<BookingRecord>) -> Result<Json<BookingRecord>, StatusCode> {
    service::create(record).await.map(Json).map_err(into_status)
}

/// PUT /api/booking/:id
pub async fn update(
    Path(id): Path<String>,
    Json(record): Json<BookingRecord>,
) -> Result<Json<BookingRecord>, StatusCode> {
    service::update(&id, record)
        .await
        .map(Json)
        .map_err(into_status)
}

/// DELETE /api/booking/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    service::delete(&id).await.map_err(into_status)
}

/// POST /api/booking/testdata
pub async fn insert_test_data() -> Result<Json<serde_json::Value>, StatusCode> {
    service::insert_test_data()
        .await
        .map(|inserted| Json(json!({ "inserted": inserted })))
        .map_err(into_status)
}
