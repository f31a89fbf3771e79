pub mod save_menu;
pub mod slots;
pub mod view;

pub use view::BookingDetails;
