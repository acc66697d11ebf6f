use anyhow::Result;
use async_trait::async_trait;
use gateway_harness::adapters::http::API_PREFIX;
use gateway_harness::core::webbattles::{self, ExecutionOutcome, UpdateMethod};
use gateway_harness::domain::model::ContractArtifact;
use gateway_harness::domain::ports::ContractDeployer;
use gateway_harness::{GatewayClient, HarnessError, HarnessSettings};
use httpmock::prelude::*;
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

const SETTINGS: &str = r#"GATEWAY_BASE_URL = "http://localhost:4010"
CONTRACT_CHAIN_1 = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
CONTRACT_CHAIN_2 = "0xbdEd0D2bf404bdcBa897a74E6657f1f12e5C6fb6"
SYNC_TASK_ID = ""
REPLICATION_TASK_ID = ""
LAST_BATTLE_ID = "0x1234"
"#;

fn settings_file(dir: &TempDir) -> Result<PathBuf> {
    let path = dir.path().join("harness.toml");
    std::fs::write(&path, SETTINGS)?;
    Ok(path)
}

fn artifact() -> ContractArtifact {
    ContractArtifact {
        contract_name: "WebBattles".to_string(),
        abi: json!([]),
        bytecode: "0x60".to_string(),
    }
}

fn register_path() -> String {
    format!("{}/oracle/register", API_PREFIX)
}

#[tokio::test]
async fn test_register_tasks_records_both_ids() -> Result<()> {
    let server = MockServer::start_async().await;
    let sync = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(register_path())
                .body_contains("syncBattleData");
            then.status(200).json_body(json!({ "taskID": "sync-1" }));
        })
        .await;
    let battle = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(register_path())
                .body_contains("replicateBattle");
            then.status(200).json_body(json!({ "taskID": "battle-1" }));
        })
        .await;

    let temp_dir = TempDir::new()?;
    let path = settings_file(&temp_dir)?;
    let client = GatewayClient::new(server.base_url());

    let tasks = webbattles::register_tasks(
        &client,
        &HarnessSettings::default(),
        &artifact(),
        &path,
    )
    .await?;

    sync.assert_async().await;
    battle.assert_async().await;
    assert!(tasks.is_complete());

    let reloaded = HarnessSettings::from_file(&path)?;
    assert_eq!(reloaded.sync_task_id, "sync-1");
    assert_eq!(reloaded.replication_task_id, "battle-1");
    assert_eq!(reloaded.last_battle_id, "0x1234");
    Ok(())
}

#[tokio::test]
async fn test_partial_registration_leaves_settings_untouched() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(register_path())
                .body_contains("syncBattleData");
            then.status(200).json_body(json!({ "taskID": "sync-1" }));
        })
        .await;
    let battle = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(register_path())
                .body_contains("replicateBattle");
            then.status(500);
        })
        .await;

    let temp_dir = TempDir::new()?;
    let path = settings_file(&temp_dir)?;
    let client = GatewayClient::new(server.base_url());

    let tasks = webbattles::register_tasks(
        &client,
        &HarnessSettings::default(),
        &artifact(),
        &path,
    )
    .await?;

    battle.assert_async().await;
    assert_eq!(tasks.sync_task_id.as_deref(), Some("sync-1"));
    assert!(tasks.replication_task_id.is_none());
    assert_eq!(std::fs::read_to_string(&path)?, SETTINGS);
    Ok(())
}

#[tokio::test]
async fn test_execute_update_reports_receipt() -> Result<()> {
    let server = MockServer::start_async().await;
    let execute = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("{}/oracle/execute", API_PREFIX))
                .body_contains("\"methodName\":\"replicateBattle\"")
                .body_contains("\"0x1234\"");
            then.status(200).json_body(json!({
                "operations": [{
                    "status": "SUCCESS",
                    "output": { "transactionReceipt": { "transactionHash": "0xbeef", "gasUsed": "21000" } }
                }]
            }));
        })
        .await;

    let settings = HarnessSettings {
        last_battle_id: "1234".to_string(),
        ..HarnessSettings::default()
    };
    let client = GatewayClient::new(server.base_url());
    let outcome =
        webbattles::execute_update(&client, &settings, &artifact(), UpdateMethod::Replicate)
            .await?;

    execute.assert_async().await;
    assert_eq!(
        outcome,
        ExecutionOutcome::Success {
            transaction_hash: "0xbeef".to_string(),
            gas_used: json!("21000"),
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_check_task_status_queries_task() -> Result<()> {
    let server = MockServer::start_async().await;
    let status = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("{}/oracle/status", API_PREFIX))
                .query_param("taskID", "sync-1");
            then.status(200)
                .json_body(json!({ "success": true, "data": { "status": "ACTIVE" } }));
        })
        .await;

    let client = GatewayClient::new(server.base_url());
    let response = webbattles::check_task_status(&client, "sync-1").await?;

    status.assert_async().await;
    assert_eq!(response["data"]["status"], "ACTIVE");
    Ok(())
}

struct FakeDeployer {
    fail_on: Option<&'static str>,
}

#[async_trait]
impl ContractDeployer for FakeDeployer {
    async fn deploy(&self, network: &str) -> gateway_harness::Result<String> {
        if self.fail_on == Some(network) {
            return Err(HarnessError::DeploymentError {
                message: format!("{} unreachable", network),
            });
        }
        Ok(match network {
            "hardhat1" => "0x1111111111111111111111111111111111111111".to_string(),
            _ => "0x2222222222222222222222222222222222222222".to_string(),
        })
    }
}

#[tokio::test]
async fn test_deploy_both_chains_records_addresses() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = settings_file(&temp_dir)?;

    let (chain_1, chain_2) =
        webbattles::deploy_both_chains(&FakeDeployer { fail_on: None }, &path).await?;

    assert_eq!(chain_1, "0x1111111111111111111111111111111111111111");
    let reloaded = HarnessSettings::from_file(&path)?;
    assert_eq!(reloaded.contract_chain_1, chain_1);
    assert_eq!(reloaded.contract_chain_2, chain_2);
    Ok(())
}

#[tokio::test]
async fn test_failed_deploy_keeps_old_addresses() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = settings_file(&temp_dir)?;

    let err = webbattles::deploy_both_chains(
        &FakeDeployer {
            fail_on: Some("hardhat2"),
        },
        &path,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, HarnessError::DeploymentError { .. }));
    assert_eq!(std::fs::read_to_string(&path)?, SETTINGS);
    Ok(())
}

#[tokio::test]
async fn test_execute_update_needs_battle_id() -> Result<()> {
    let server = MockServer::start_async().await;
    let execute = server
        .mock_async(|when, then| {
            when.method(POST).path(format!("{}/oracle/execute", API_PREFIX));
            then.status(200).json_body(json!({ "operations": [] }));
        })
        .await;

    let client = GatewayClient::new(server.base_url());
    let err = webbattles::execute_update(
        &client,
        &HarnessSettings::default(),
        &artifact(),
        UpdateMethod::Sync,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, HarnessError::MissingConfigError { ref field } if field == "LAST_BATTLE_ID"));
    execute.assert_hits_async(0).await;
    Ok(())
}
