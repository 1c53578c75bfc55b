pub mod intent;
pub mod navigation;
pub mod resolver;
pub mod router;
pub mod views;
