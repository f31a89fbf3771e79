pub mod a001_capacity_booking;
pub mod common;
