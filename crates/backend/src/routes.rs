use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Capacity booking
        .route(
            "/api/booking",
            get(handlers::a001_capacity_booking::list_all)
                .post(handlers::a001_capacity_booking::create),
        )
        .route(
            "/api/booking/testdata",
            post(handlers::a001_capacity_booking::insert_test_data),
        )
        .route(
            "/api/booking/:id",
            get(handlers::a001_capacity_booking::get_by_id)
                .put(handlers::a001_capacity_booking::update)
                .delete(handlers::a001_capacity_booking::delete),
        )
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
}
