#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;

pub use settings::{HarnessSettings, DEFAULT_SETTINGS_PATH};
