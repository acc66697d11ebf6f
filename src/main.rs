use clap::Parser;
use gateway_harness::config::cli::{
    exit_with, GatewaySide, HarnessCli, HarnessCommand, OracleCommand, SatpCommand,
    SettingsCommand,
};
use gateway_harness::core::{load_artifact, oracle, satp};
use gateway_harness::domain::model::ContractArtifact;
use gateway_harness::utils::error::{HarnessError, Result};
use gateway_harness::utils::validation::Validate;
use gateway_harness::{update_setting, HarnessSettings, LocalStorage};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = HarnessCli::parse();

    // 初始化日誌
    cli.global.init_logging();
    tracing::info!("Starting gateway-harness");

    if let Err(e) = run(cli).await {
        exit_with(&e);
    }
}

async fn run(cli: HarnessCli) -> Result<()> {
    // settings 子命令在驗證之前執行，才能修正錯誤的設定值
    if let HarnessCommand::Settings(command) = &cli.command {
        return run_settings(&cli, command);
    }

    let settings = cli.global.load_settings()?;
    tracing::info!("✅ Settings loaded and validated");

    match cli.command {
        HarnessCommand::Oracle(command) => run_oracle(&settings, command).await,
        HarnessCommand::Satp(command) => run_satp(&settings, command).await,
        HarnessCommand::Settings(_) => Ok(()),
    }
}

async fn oracle_artifact(settings: &HarnessSettings) -> Result<ContractArtifact> {
    let storage = LocalStorage::new(".");
    load_artifact(&storage, &settings.oracle_artifact_path).await
}

async fn run_oracle(settings: &HarnessSettings, command: OracleCommand) -> Result<()> {
    let client = settings.gateway_client();

    match command {
        OracleCommand::ExecuteAuto { delay_secs } => {
            let artifact = oracle_artifact(settings).await?;
            oracle::execute_auto_read_and_write(&client, settings, &artifact, delay_secs).await?;
        }
        OracleCommand::ExecuteUpdate { data } => {
            let artifact = oracle_artifact(settings).await?;
            oracle::execute_update(&client, settings, &artifact, &data).await?;
        }
        OracleCommand::RegisterPoller { delay_secs } => {
            let artifact = oracle_artifact(settings).await?;
            oracle::register_poller(&client, settings, &artifact, delay_secs).await?;
        }
        OracleCommand::RegisterListener { delay_secs } => {
            let artifact = oracle_artifact(settings).await?;
            oracle::register_listener(&client, settings, &artifact, delay_secs).await?;
        }
        OracleCommand::Status { task_id } => {
            oracle::check_status(&client, &task_id).await?;
        }
        OracleCommand::Unregister { task_id } => {
            oracle::unregister(&client, &task_id).await?;
        }
    }

    Ok(())
}

async fn run_satp(settings: &HarnessSettings, command: SatpCommand) -> Result<()> {
    let source = settings.gateway_client();
    let counterparty = settings.counterparty_client();

    match command {
        SatpCommand::Transact { amount } => {
            satp::transact(&source, settings, amount.as_deref()).await?;
        }
        SatpCommand::Status {
            session_id,
            gateway,
        } => {
            let client = match gateway {
                GatewaySide::Source => &source,
                GatewaySide::Counterparty => &counterparty,
            };
            satp::session_status(client, &session_id).await?;
        }
        SatpCommand::Audit { delay_secs } => {
            let storage = LocalStorage::new(&settings.audit_output_dir);
            let file_name = satp::perform_audit(&source, &storage, delay_secs).await?;
            println!(
                "📁 Audit saved to: {}",
                storage.base_path().join(file_name).display()
            );
        }
        SatpCommand::BridgeAddress => {
            satp::bridge_addresses(&source, &counterparty, settings).await?;
        }
        SatpCommand::SessionIds => {
            satp::session_ids(&source).await?;
        }
        SatpCommand::Integrations => {
            satp::integrations(&[&source, &counterparty]).await?;
        }
    }

    Ok(())
}

fn run_settings(cli: &HarnessCli, command: &SettingsCommand) -> Result<()> {
    let path = &cli.global.settings;

    match command {
        SettingsCommand::Set { name, value, raw } => {
            let value = SettingsCommand::setting_value(value, *raw);
            if !update_setting(path, name, value)? {
                println!("{} not found in {}", name, path.display());
            }
        }
        SettingsCommand::Show => {
            let settings = cli.global.read_settings()?;
            let rendered = toml::to_string_pretty(&settings).map_err(|e| {
                HarnessError::ConfigValidationError {
                    field: "settings".to_string(),
                    message: e.to_string(),
                }
            })?;
            print!("{}", rendered);

            // 只警告，不中止
            if let Err(e) = settings.validate() {
                tracing::warn!("⚠️ {}", e);
            }
        }
    }

    Ok(())
}
