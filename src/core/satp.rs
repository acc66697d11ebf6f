use crate::adapters::http::GatewayClient;
use crate::config::HarnessSettings;
use crate::core::{pause, print_response, Storage};
use crate::domain::model::{Asset, TokenType, TransactRequest};
use crate::utils::error::{HarnessError, Result};
use serde_json::{json, Value};

/// Transfer of `amount` tokens from the source owner on chain 1 to the receiver on chain 2.
pub fn transact_request(settings: &HarnessSettings, amount: &str) -> TransactRequest {
    let asset = |owner: &str, contract: &str, network| Asset {
        id: settings.satp_asset_id.clone(),
        reference_id: settings.satp_reference_id.clone(),
        owner: owner.to_string(),
        contract_name: settings.satp_contract_name.clone(),
        contract_address: contract.to_string(),
        network_id: network,
        token_type: TokenType::Erc20,
        amount: amount.to_string(),
    };

    TransactRequest {
        context_id: settings.satp_context_id.clone(),
        source_asset: asset(
            &settings.satp_source_owner,
            &settings.satp_source_contract,
            settings.source_network(),
        ),
        receiver_asset: asset(
            &settings.satp_receiver_owner,
            &settings.satp_receiver_contract,
            settings.destination_network(),
        ),
    }
}

/// One-line JSON summary of a `/transact` answer: only `SESSION_ID` when present.
pub fn transact_summary(response: &Value) -> Value {
    match response.get("SESSION_ID") {
        Some(session_id) => json!({ "SESSION_ID": session_id }),
        None => response.clone(),
    }
}

/// Starts a transfer and prints a single line of JSON, `{"error": ...}` on failure.
pub async fn transact(
    client: &GatewayClient,
    settings: &HarnessSettings,
    amount: Option<&str>,
) -> Result<Value> {
    let amount = amount.unwrap_or(&settings.satp_amount);
    tracing::info!("Starting SATP transfer of {} {}", amount, settings.satp_asset_id);

    match client.transact(&transact_request(settings, amount)).await {
        Ok(response) => {
            println!("{}", transact_summary(&response));
            Ok(response)
        }
        Err(e) => {
            println!("{}", json!({ "error": e.to_string() }));
            Err(e)
        }
    }
}

pub async fn session_status(client: &GatewayClient, session_id: &str) -> Result<Value> {
    let response = client.session_status(session_id).await?;
    print_response(&response);
    Ok(response)
}

/// Parses sessions the gateway returns as JSON-encoded strings; other entries are kept.
pub fn normalize_audit(mut response: Value) -> Result<Value> {
    let sessions = response
        .get_mut("sessions")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| HarnessError::MissingFieldError {
            field: "sessions".to_string(),
        })?;

    for session in sessions.iter_mut() {
        if let Value::String(encoded) = session {
            let parsed: Value = serde_json::from_str(encoded)?;
            *session = parsed;
        }
    }

    Ok(response)
}

pub fn audit_file_name(end_timestamp: u64) -> String {
    format!("audit-{}.json", end_timestamp)
}

/// Fetches the audit of every session up to now and saves it; returns the file name.
pub async fn perform_audit<S: Storage>(
    client: &GatewayClient,
    storage: &S,
    delay_secs: u64,
) -> Result<String> {
    let now_ms = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
    println!("Performing audit at {}...", now_ms);
    pause(delay_secs).await;

    let response = normalize_audit(client.audit(0, now_ms).await?)?;

    let file_name = audit_file_name(now_ms);
    let data = serde_json::to_vec_pretty(&response)?;
    storage.write_file(&file_name, &data).await?;

    tracing::info!("Audit with {} bytes written", data.len());
    Ok(file_name)
}

/// Bridge approval address for fungible tokens on both networks, each from its own gateway.
pub async fn bridge_addresses(
    source: &GatewayClient,
    counterparty: &GatewayClient,
    settings: &HarnessSettings,
) -> Result<(Value, Value)> {
    let source_response = source
        .approve_address(&settings.source_network(), TokenType::NonstandardFungible)
        .await?;
    print_response(&source_response);

    let target_response = counterparty
        .approve_address(
            &settings.destination_network(),
            TokenType::NonstandardFungible,
        )
        .await?;
    print_response(&target_response);

    Ok((source_response, target_response))
}

pub async fn session_ids(client: &GatewayClient) -> Result<Value> {
    let response = client.session_ids().await?;
    print_response(&response);
    Ok(response)
}

pub async fn integrations(clients: &[&GatewayClient]) -> Result<Vec<Value>> {
    let mut responses = Vec::with_capacity(clients.len());
    for client in clients {
        tracing::debug!("Listing integrations of {}", client.base_url());
        let response = client.integrations().await?;
        print_response(&response);
        responses.push(response);
    }
    Ok(responses)
}
