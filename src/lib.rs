pub mod client;
pub mod config;
pub mod domains;
pub mod error;
pub mod interfaces;
pub mod providers;
pub mod services;

pub use crate::client::CampusBot;
pub use crate::config::Config;
pub use crate::domains::event::{ChatEvent, MessageHandle};
pub use crate::error::{CampusBotError, Result};
