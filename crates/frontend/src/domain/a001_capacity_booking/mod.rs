pub mod api;
pub mod controller;
pub mod error;
pub mod form_state;
pub mod partition;
pub mod store;
pub mod ui;
pub mod validation;
