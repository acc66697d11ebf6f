//! Oracle demo scenarios against the OracleTestContract deployed on both test chains.
//!
//! Chain 1 is the network named by `SOURCE_NETWORK_ID`, chain 2 the one named
//! by `DESTINATION_NETWORK_ID`.

use crate::adapters::http::GatewayClient;
use crate::config::HarnessSettings;
use crate::core::{pause, print_response, required_str};
use crate::domain::model::{ContractArtifact, ListeningOptions, OracleTaskRequest, TaskType};
use crate::utils::error::Result;
use serde_json::{json, Value};

pub const UPDATED_DATA_EVENT: &str = "UpdatedData(bytes32,string,uint256)";
pub const DEFAULT_LISTENED_DATA: &str = "DATA TO BE LISTENED";

const WRITE_METHOD: &str = "setData";
const READ_METHOD: &str = "getData";

/// UPDATE: `setData(data)` on chain 1.
pub fn update_request(
    settings: &HarnessSettings,
    artifact: &ContractArtifact,
    data: &str,
) -> OracleTaskRequest {
    OracleTaskRequest::new(TaskType::Update).with_destination(
        settings.source_network(),
        artifact
            .descriptor(&settings.oracle_contract_chain_1)
            .method(WRITE_METHOD)
            .params(vec![json!(data)]),
    )
}

/// READ_AND_UPDATE: `getData(hash)` on chain 1, result written with `setData` on chain 2.
pub fn read_and_update_request(
    settings: &HarnessSettings,
    artifact: &ContractArtifact,
) -> OracleTaskRequest {
    // destination params left unset: the gateway forwards what the source read returned
    OracleTaskRequest::new(TaskType::ReadAndUpdate)
        .with_source(
            settings.source_network(),
            artifact
                .descriptor(&settings.oracle_contract_chain_1)
                .method(READ_METHOD)
                .params(vec![json!(settings.oracle_data_hash)]),
        )
        .with_destination(
            settings.destination_network(),
            artifact
                .descriptor(&settings.oracle_contract_chain_2)
                .method(WRITE_METHOD),
        )
}

/// READ: `getData(hash)` on chain 2.
pub fn read_request(settings: &HarnessSettings, artifact: &ContractArtifact) -> OracleTaskRequest {
    OracleTaskRequest::new(TaskType::Read).with_source(
        settings.destination_network(),
        artifact
            .descriptor(&settings.oracle_contract_chain_2)
            .method(READ_METHOD)
            .params(vec![json!(settings.oracle_data_hash)]),
    )
}

/// Registration of a READ on chain 1 repeated every `ORACLE_POLLING_INTERVAL_MS`.
pub fn polling_read_request(
    settings: &HarnessSettings,
    artifact: &ContractArtifact,
) -> OracleTaskRequest {
    OracleTaskRequest::new(TaskType::Read)
        .with_source(
            settings.source_network(),
            artifact
                .descriptor(&settings.oracle_contract_chain_1)
                .method(READ_METHOD)
                .params(vec![json!(settings.oracle_data_hash)]),
        )
        .polling(settings.oracle_polling_interval_ms)
}

/// Registration of a READ_AND_UPDATE fired by every `UpdatedData` event on chain 1.
pub fn listener_request(
    settings: &HarnessSettings,
    artifact: &ContractArtifact,
) -> OracleTaskRequest {
    OracleTaskRequest::new(TaskType::ReadAndUpdate)
        .with_source(
            settings.source_network(),
            artifact
                .descriptor(&settings.oracle_contract_chain_1)
                .without_bytecode(),
        )
        .with_destination(
            settings.destination_network(),
            artifact
                .descriptor(&settings.oracle_contract_chain_2)
                .method(WRITE_METHOD),
        )
        .listening(ListeningOptions {
            event_signature: UPDATED_DATA_EVENT.to_string(),
            // the event carries several fields; only `data` is forwarded
            filter_params: vec!["data".to_string()],
        })
}

/// Write, copy across chains, then read back. Returns the three responses in order.
pub async fn execute_auto_read_and_write(
    client: &GatewayClient,
    settings: &HarnessSettings,
    artifact: &ContractArtifact,
    delay_secs: u64,
) -> Result<Vec<Value>> {
    let mut responses = Vec::with_capacity(3);

    println!(
        "First request will write '{}' to the blockchain...",
        settings.oracle_test_data
    );
    pause(delay_secs).await;
    let response = client
        .oracle_execute(&update_request(settings, artifact, &settings.oracle_test_data))
        .await?;
    print_response(&response);
    responses.push(response);

    println!(
        "Waiting for {} seconds before reading and updating target chain...",
        delay_secs
    );
    pause(delay_secs).await;
    let response = client
        .oracle_execute(&read_and_update_request(settings, artifact))
        .await?;
    print_response(&response);
    responses.push(response);

    println!("Waiting for {} seconds before reading target chain...", delay_secs);
    pause(delay_secs).await;
    let response = client
        .oracle_execute(&read_request(settings, artifact))
        .await?;
    print_response(&response);
    responses.push(response);

    Ok(responses)
}

pub async fn execute_update(
    client: &GatewayClient,
    settings: &HarnessSettings,
    artifact: &ContractArtifact,
    data: &str,
) -> Result<Value> {
    let response = client
        .oracle_execute(&update_request(settings, artifact, data))
        .await?;
    print_response(&response);
    Ok(response)
}

/// Registers `request` and returns the new task ID.
pub async fn register_task(client: &GatewayClient, request: &OracleTaskRequest) -> Result<String> {
    let response = client.oracle_register(request).await?;
    print_response(&response);

    let task_id = required_str(&response, "taskID")?.to_string();
    println!("Task ID: {}", task_id);
    tracing::info!("Registered oracle task {}", task_id);
    Ok(task_id)
}

pub async fn register_poller(
    client: &GatewayClient,
    settings: &HarnessSettings,
    artifact: &ContractArtifact,
    delay_secs: u64,
) -> Result<String> {
    println!(
        "Registering a polling task, executed every {} ms...",
        settings.oracle_polling_interval_ms
    );
    pause(delay_secs).await;
    register_task(client, &polling_read_request(settings, artifact)).await
}

pub async fn register_listener(
    client: &GatewayClient,
    settings: &HarnessSettings,
    artifact: &ContractArtifact,
    delay_secs: u64,
) -> Result<String> {
    println!(
        "Registering an event-listening task, executed on every {} event...",
        UPDATED_DATA_EVENT
    );
    pause(delay_secs).await;
    register_task(client, &listener_request(settings, artifact)).await
}

pub async fn check_status(client: &GatewayClient, task_id: &str) -> Result<Value> {
    let response = client.oracle_status(task_id).await?;
    print_response(&response);
    Ok(response)
}

pub async fn unregister(client: &GatewayClient, task_id: &str) -> Result<Value> {
    let response = client.oracle_unregister(task_id).await?;
    print_response(&response);
    Ok(response)
}
