pub mod config_updater;
pub mod error;
pub mod logger;
pub mod validation;
