use crate::config::settings::{HarnessSettings, DEFAULT_SETTINGS_PATH};
use crate::utils::config_updater::SettingValue;
use crate::utils::error::{HarnessError, Result};
use crate::utils::logger;
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Options shared by every harness binary.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Path to the settings file
    #[arg(short, long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    pub settings: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl GlobalArgs {
    pub fn init_logging(&self) {
        match self.log_format {
            LogFormat::Text => logger::init_cli_logger(self.verbose),
            LogFormat::Json => logger::init_json_logger(self.verbose),
        }
    }

    /// Parses the settings file without validating it. A missing file falls back to defaults.
    pub fn read_settings(&self) -> Result<HarnessSettings> {
        if self.settings.exists() {
            tracing::info!("📁 Loading settings from: {}", self.settings.display());
            HarnessSettings::from_file(&self.settings)
        } else {
            tracing::warn!(
                "⚠️ Settings file {} not found, using defaults",
                self.settings.display()
            );
            Ok(HarnessSettings::default())
        }
    }

    /// Same as [`read_settings`](Self::read_settings), then validated.
    pub fn load_settings(&self) -> Result<HarnessSettings> {
        let settings = self.read_settings()?;
        settings.validate()?;
        tracing::debug!("Effective settings: {:?}", settings);
        Ok(settings)
    }
}

/// Logs the failure, prints a short message and exits with the severity's code.
pub fn exit_with(e: &HarnessError) -> ! {
    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code())
}

#[derive(Debug, Parser)]
#[command(name = "gateway-harness")]
#[command(about = "Demo client and test harness for the SATP gateway's oracle and transfer APIs")]
pub struct HarnessCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: HarnessCommand,
}

#[derive(Debug, Subcommand)]
pub enum HarnessCommand {
    /// Oracle task manager endpoints
    #[command(subcommand)]
    Oracle(OracleCommand),
    /// SATP asset transfer endpoints
    #[command(subcommand)]
    Satp(SatpCommand),
    /// Read or rewrite the settings file
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Debug, Subcommand)]
pub enum OracleCommand {
    /// Write on chain 1, copy chain 1 -> chain 2, then read chain 2
    ExecuteAuto {
        /// Seconds to wait before each request
        #[arg(long, default_value_t = 5)]
        delay_secs: u64,
    },
    /// One-shot UPDATE of the test contract on chain 1
    ExecuteUpdate {
        /// Payload passed to setData
        #[arg(long, default_value = crate::core::oracle::DEFAULT_LISTENED_DATA)]
        data: String,
    },
    /// Register a READ task polled every ORACLE_POLLING_INTERVAL_MS
    RegisterPoller {
        #[arg(long, default_value_t = 5)]
        delay_secs: u64,
    },
    /// Register a READ_AND_UPDATE task triggered by UpdatedData events
    RegisterListener {
        #[arg(long, default_value_t = 5)]
        delay_secs: u64,
    },
    /// Fetch task status
    Status { task_id: String },
    /// Cancel a registered task
    Unregister { task_id: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum GatewaySide {
    Source,
    #[default]
    Counterparty,
}

#[derive(Debug, Subcommand)]
pub enum SatpCommand {
    /// Start an asset transfer session
    Transact {
        /// Override SATP_AMOUNT
        #[arg(long)]
        amount: Option<String>,
    },
    /// Fetch a session's status
    Status {
        session_id: String,
        /// Which gateway to ask
        #[arg(long, value_enum, default_value_t = GatewaySide::Counterparty)]
        gateway: GatewaySide,
    },
    /// Save the audit log of every session up to now
    Audit {
        #[arg(long, default_value_t = 5)]
        delay_secs: u64,
    },
    /// Bridge approval address on both networks
    BridgeAddress,
    /// List known session IDs
    SessionIds,
    /// List network integrations of both gateways
    Integrations,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Rewrite NAME = VALUE in place
    Set {
        name: String,
        value: String,
        /// Write the value unquoted (numbers, booleans)
        #[arg(long)]
        raw: bool,
    },
    /// Print the effective settings
    Show,
}

impl SettingsCommand {
    pub fn setting_value(value: &str, raw: bool) -> SettingValue {
        if raw {
            SettingValue::Raw(value.to_string())
        } else {
            SettingValue::Str(value.to_string())
        }
    }
}
