//! ftrack-config
//!
//! User preferences for the finance tracker shell and their on-disk persistence.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, DateStyle};
