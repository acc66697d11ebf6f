//! WebBattles cross-chain demo: deploy the contract on both chains, register
//! oracle tasks that mirror chain 1 battles onto chain 2, trigger updates
//! directly, and inspect task status.

use crate::adapters::http::GatewayClient;
use crate::config::HarnessSettings;
use crate::core::oracle::UPDATED_DATA_EVENT;
use crate::core::{required_str, ContractDeployer};
use crate::domain::model::{ContractArtifact, ListeningOptions, OracleTaskRequest, TaskType};
use crate::utils::config_updater::update_settings;
use crate::utils::error::{HarnessError, Result};
use serde_json::{json, Value};
use std::fmt;
use std::path::Path;

pub const CONTRACT_NAME: &str = "WebBattles";
pub const BATTLE_CREATED_EVENT: &str = "BattleCreated(bytes32,address,uint256,string)";

/// Hardhat networks deployed to, with their node ports.
pub const DEPLOY_NETWORKS: [(&str, u16); 2] = [("hardhat1", 8545), ("hardhat2", 8546)];

const RECENT_EXECUTIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMethod {
    Sync,
    Replicate,
}

impl UpdateMethod {
    pub fn contract_method(&self) -> &'static str {
        match self {
            UpdateMethod::Sync => "syncBattleData",
            UpdateMethod::Replicate => "replicateBattle",
        }
    }
}

impl fmt::Display for UpdateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.contract_method())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleData {
    pub battle_id: String,
    pub challenger: String,
    pub bet_amount: String,
    pub battle_type: String,
}

impl BattleData {
    /// Last battle recorded in the settings, with the default challenger, bet and type.
    pub fn from_settings(settings: &HarnessSettings) -> Self {
        let battle_id = if settings.last_battle_id.starts_with("0x") {
            settings.last_battle_id.clone()
        } else {
            format!("0x{}", settings.last_battle_id)
        };

        Self {
            battle_id,
            challenger: settings.default_challenger.clone(),
            bet_amount: settings.default_bet_amount.clone(),
            battle_type: settings.default_battle_type.clone(),
        }
    }

    pub fn params_for(&self, method: UpdateMethod) -> Vec<Value> {
        match method {
            UpdateMethod::Sync => vec![json!(format!(
                "battle_created,{},{},{},{}",
                self.battle_id, self.challenger, self.bet_amount, self.battle_type
            ))],
            UpdateMethod::Replicate => vec![
                json!(self.battle_id),
                json!(self.challenger),
                json!(self.bet_amount),
                json!(self.battle_type),
            ],
        }
    }
}

fn listening_task(
    settings: &HarnessSettings,
    artifact: &ContractArtifact,
    method: UpdateMethod,
    options: ListeningOptions,
) -> OracleTaskRequest {
    OracleTaskRequest::new(TaskType::ReadAndUpdate)
        .with_source(
            settings.source_network(),
            artifact
                .descriptor(&settings.contract_chain_1)
                .named(CONTRACT_NAME)
                .without_bytecode(),
        )
        .with_destination(
            settings.destination_network(),
            artifact
                .descriptor(&settings.contract_chain_2)
                .named(CONTRACT_NAME)
                .method(method.contract_method()),
        )
        .listening(options)
}

/// Forwards the `data` field of every chain 1 `UpdatedData` event to `syncBattleData`.
pub fn sync_task_request(settings: &HarnessSettings, artifact: &ContractArtifact) -> OracleTaskRequest {
    listening_task(
        settings,
        artifact,
        UpdateMethod::Sync,
        ListeningOptions {
            event_signature: UPDATED_DATA_EVENT.to_string(),
            filter_params: vec!["data".to_string()],
        },
    )
}

/// Replays every chain 1 `BattleCreated` event through `replicateBattle`.
pub fn battle_task_request(
    settings: &HarnessSettings,
    artifact: &ContractArtifact,
) -> OracleTaskRequest {
    listening_task(
        settings,
        artifact,
        UpdateMethod::Replicate,
        ListeningOptions {
            event_signature: BATTLE_CREATED_EVENT.to_string(),
            filter_params: ["battleId", "challenger", "betAmount", "battleType"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
        },
    )
}

/// Direct UPDATE of the chain 2 contract, bypassing registered tasks.
pub fn update_request(
    settings: &HarnessSettings,
    artifact: &ContractArtifact,
    method: UpdateMethod,
    battle: &BattleData,
) -> OracleTaskRequest {
    OracleTaskRequest::new(TaskType::Update).with_destination(
        settings.destination_network(),
        artifact
            .descriptor(&settings.contract_chain_2)
            .named(CONTRACT_NAME)
            .method(method.contract_method())
            .params(battle.params_for(method)),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    Success {
        transaction_hash: String,
        gas_used: Value,
    },
    Failed {
        reason: String,
    },
}

impl ExecutionOutcome {
    /// Reads the first entry of `operations` in an `/oracle/execute` answer.
    pub fn from_response(response: &Value) -> Self {
        let Some(operation) = response
            .get("operations")
            .and_then(Value::as_array)
            .and_then(|ops| ops.first())
        else {
            return ExecutionOutcome::Failed {
                reason: response.to_string(),
            };
        };

        let status = operation.get("status").and_then(Value::as_str).unwrap_or("");
        let output = operation.get("output");

        if status == "SUCCESS" {
            let receipt = output.and_then(|o| o.get("transactionReceipt"));
            ExecutionOutcome::Success {
                transaction_hash: receipt
                    .and_then(|r| r.get("transactionHash"))
                    .and_then(Value::as_str)
                    .unwrap_or("N/A")
                    .to_string(),
                gas_used: receipt
                    .and_then(|r| r.get("gasUsed"))
                    .cloned()
                    .unwrap_or_else(|| json!("N/A")),
            }
        } else {
            ExecutionOutcome::Failed {
                reason: output
                    .and_then(|o| o.get("output"))
                    .map(display_value)
                    .unwrap_or_else(|| "Unknown error".to_string()),
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success { .. })
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn field_or_unknown(value: &Value, field: &str) -> String {
    value
        .get(field)
        .filter(|v| !v.is_null())
        .map(display_value)
        .unwrap_or_else(|| "Unknown".to_string())
}

pub async fn execute_update(
    client: &GatewayClient,
    settings: &HarnessSettings,
    artifact: &ContractArtifact,
    method: UpdateMethod,
) -> Result<ExecutionOutcome> {
    if settings.last_battle_id.trim().is_empty() {
        return Err(HarnessError::MissingConfigError {
            field: "LAST_BATTLE_ID".to_string(),
        });
    }
    let battle = BattleData::from_settings(settings);

    println!("Battle data:");
    println!("  Battle ID: {}", battle.battle_id);
    println!("  Challenger: {}", battle.challenger);
    println!("  Bet Amount: {} wei", battle.bet_amount);
    println!("  Battle Type: {}", battle.battle_type);

    println!("\nExecuting {} via direct oracle execution", method);
    println!("Target contract: {}", settings.contract_chain_2);

    let response = client
        .oracle_execute(&update_request(settings, artifact, method, &battle))
        .await?;
    tracing::debug!("execute response: {}", response);

    let outcome = ExecutionOutcome::from_response(&response);
    match &outcome {
        ExecutionOutcome::Success {
            transaction_hash,
            gas_used,
        } => {
            println!("\nOracle execution successful!");
            println!("Method: {}", method);
            println!("Transaction: {}", transaction_hash);
            println!("Gas Used: {}", display_value(gas_used));
        }
        ExecutionOutcome::Failed { reason } => {
            println!("Oracle execution failed: {}", reason);
        }
    }

    Ok(outcome)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisteredTasks {
    pub sync_task_id: Option<String>,
    pub replication_task_id: Option<String>,
}

impl RegisteredTasks {
    pub fn is_complete(&self) -> bool {
        self.sync_task_id.is_some() && self.replication_task_id.is_some()
    }
}

async fn register_one(
    client: &GatewayClient,
    label: &str,
    request: &OracleTaskRequest,
) -> Option<String> {
    let registered = match client.oracle_register(request).await {
        Ok(response) => required_str(&response, "taskID").map(str::to_string),
        Err(e) => Err(e),
    };

    match registered {
        Ok(task_id) => {
            println!("{} task registered: {}", label, task_id);
            Some(task_id)
        }
        Err(e) => {
            tracing::error!("{} task registration failed: {}", label, e);
            println!("{} task failed: {}", label, e);
            None
        }
    }
}

/// Registers both tasks. A failure of one does not stop the other; the
/// settings file is only rewritten when both task IDs are known.
pub async fn register_tasks(
    client: &GatewayClient,
    settings: &HarnessSettings,
    artifact: &ContractArtifact,
    settings_path: &Path,
) -> Result<RegisteredTasks> {
    println!("Chain 1 Contract: {}", settings.contract_chain_1);
    println!("Chain 2 Contract: {}", settings.contract_chain_2);

    let tasks = RegisteredTasks {
        sync_task_id: register_one(client, "Sync", &sync_task_request(settings, artifact)).await,
        replication_task_id: register_one(
            client,
            "Battle",
            &battle_task_request(settings, artifact),
        )
        .await,
    };

    if let (Some(sync_id), Some(battle_id)) = (&tasks.sync_task_id, &tasks.replication_task_id) {
        println!("\nAll tasks registered successfully!");
        update_settings(
            settings_path,
            &[
                ("SYNC_TASK_ID", sync_id.as_str().into()),
                ("REPLICATION_TASK_ID", battle_id.as_str().into()),
            ],
        )?;
        println!("Settings updated with new task IDs");
    } else {
        println!("\nRegistration failed - not all tasks were registered");
    }

    Ok(tasks)
}

/// Human-readable view of an `/oracle/status` answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatusReport {
    pub lines: Vec<String>,
}

impl TaskStatusReport {
    pub fn from_response(response: &Value) -> Self {
        let mut lines = Vec::new();

        if response.get("success").and_then(Value::as_bool) == Some(true) {
            let empty = json!({});
            let data = response.get("data").unwrap_or(&empty);

            lines.push(format!("Status: {}", field_or_unknown(data, "status")));
            lines.push(format!("Task Type: {}", field_or_unknown(data, "taskType")));
            lines.push(format!("Created: {}", field_or_unknown(data, "createdAt")));
            lines.push(format!("Updated: {}", field_or_unknown(data, "lastUpdated")));

            if let Some(executions) = data.get("executions").and_then(Value::as_array) {
                if !executions.is_empty() {
                    lines.push(format!(
                        "Execution History ({} entries):",
                        executions.len()
                    ));
                    let recent = &executions[executions.len().saturating_sub(RECENT_EXECUTIONS)..];
                    for (i, execution) in recent.iter().enumerate() {
                        lines.push(format!(
                            "  {}. {} - {}",
                            i + 1,
                            field_or_unknown(execution, "timestamp"),
                            field_or_unknown(execution, "status")
                        ));
                    }
                }
            }
        } else {
            lines.push(format!(
                "Failed to get oracle status: {}",
                response
                    .get("message")
                    .map(display_value)
                    .unwrap_or_else(|| "Unknown error".to_string())
            ));
        }

        Self { lines }
    }
}

pub async fn check_task_status(client: &GatewayClient, task_id: &str) -> Result<Value> {
    let response = client.oracle_status(task_id).await?;

    println!("Oracle Task Status: {}", task_id);
    println!("{}", "-".repeat(60));
    for line in TaskStatusReport::from_response(&response).lines {
        println!("{}", line);
    }

    Ok(response)
}

/// Status of both task IDs recorded in the settings. Errors are reported per task.
pub async fn check_registered_tasks(client: &GatewayClient, settings: &HarnessSettings) {
    for (label, task_id) in [
        ("Sync", &settings.sync_task_id),
        ("Replication", &settings.replication_task_id),
    ] {
        println!("\n{} Oracle Task:", label);
        if task_id.is_empty() {
            println!("No task ID recorded, run `webbattles register` first");
            continue;
        }
        if let Err(e) = check_task_status(client, task_id).await {
            tracing::error!("Error checking {} task {}: {}", label, task_id, e);
            println!("Error checking oracle status: {}", e);
        }
    }
}

/// Deploys to both hardhat networks and records the addresses, only if both succeed.
pub async fn deploy_both_chains<D: ContractDeployer + ?Sized>(
    deployer: &D,
    settings_path: &Path,
) -> Result<(String, String)> {
    let mut addresses = Vec::with_capacity(DEPLOY_NETWORKS.len());
    let mut failures = Vec::new();

    for (network, port) in DEPLOY_NETWORKS {
        println!("\nDeploying to {} (port {})", network, port);
        match deployer.deploy(network).await {
            Ok(address) => {
                println!("{} deployment successful: {}", network, address);
                addresses.push(address);
            }
            Err(e) => {
                tracing::error!("Deployment to {} failed: {}", network, e);
                failures.push(e.to_string());
            }
        }
    }

    if !failures.is_empty() {
        return Err(HarnessError::DeploymentError {
            message: failures.join("; "),
        });
    }

    let (chain_1, chain_2) = match addresses.as_slice() {
        [chain_1, chain_2] => (chain_1.clone(), chain_2.clone()),
        _ => {
            return Err(HarnessError::DeploymentError {
                message: format!("expected 2 addresses, got {}", addresses.len()),
            })
        }
    };

    update_settings(
        settings_path,
        &[
            ("CONTRACT_CHAIN_1", chain_1.as_str().into()),
            ("CONTRACT_CHAIN_2", chain_2.as_str().into()),
        ],
    )?;

    println!("\nDEPLOYMENT COMPLETE");
    println!("Chain 1: {}", chain_1);
    println!("Chain 2: {}", chain_2);

    Ok((chain_1, chain_2))
}
