pub mod button;
pub mod grid;
pub mod menu;
pub mod select_dialog;
