pub mod a001_capacity_booking;
