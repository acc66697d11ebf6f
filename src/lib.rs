pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{deployer::HardhatDeployer, http::GatewayClient, storage::LocalStorage};
pub use config::HarnessSettings;
pub use utils::config_updater::{update_setting, update_settings, SettingValue};
pub use utils::error::{HarnessError, Result};
