pub mod header;
pub mod language_menu;

pub use header::Header;
pub use language_menu::LanguageMenu;
