pub mod event;
pub mod keyboard;
pub mod records;
