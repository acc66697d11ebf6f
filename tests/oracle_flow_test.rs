use anyhow::Result;
use gateway_harness::adapters::http::API_PREFIX;
use gateway_harness::core::oracle;
use gateway_harness::domain::model::ContractArtifact;
use gateway_harness::{GatewayClient, HarnessError, HarnessSettings};
use httpmock::prelude::*;
use serde_json::json;

fn artifact() -> ContractArtifact {
    ContractArtifact {
        contract_name: "OracleTestContract".to_string(),
        abi: json!([]),
        bytecode: "0x6080".to_string(),
    }
}

fn execute_path() -> String {
    format!("{}/oracle/execute", API_PREFIX)
}

#[tokio::test]
async fn test_execute_auto_runs_write_copy_read() -> Result<()> {
    let server = MockServer::start_async().await;
    let write = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(execute_path())
                .body_contains("\"taskType\":\"UPDATE\"")
                .body_contains("DATA WRITTEN TO THE BLOCKCHAIN");
            then.status(200).json_body(json!({ "step": "write" }));
        })
        .await;
    let copy = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(execute_path())
                .body_contains("\"taskType\":\"READ_AND_UPDATE\"");
            then.status(200).json_body(json!({ "step": "copy" }));
        })
        .await;
    let read = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(execute_path())
                .body_contains("\"taskType\":\"READ\"");
            then.status(200).json_body(json!({ "step": "read" }));
        })
        .await;

    let settings = HarnessSettings::default();
    let client = GatewayClient::new(server.base_url());
    let responses = oracle::execute_auto_read_and_write(&client, &settings, &artifact(), 0).await?;

    write.assert_async().await;
    copy.assert_async().await;
    read.assert_async().await;
    let steps: Vec<_> = responses.iter().map(|r| r["step"].clone()).collect();
    assert_eq!(steps, vec![json!("write"), json!("copy"), json!("read")]);
    Ok(())
}

#[tokio::test]
async fn test_execute_auto_stops_on_first_failure() -> Result<()> {
    let server = MockServer::start_async().await;
    let execute = server
        .mock_async(|when, then| {
            when.method(POST).path(execute_path());
            then.status(503);
        })
        .await;

    let settings = HarnessSettings::default();
    let client = GatewayClient::new(server.base_url());
    let result = oracle::execute_auto_read_and_write(&client, &settings, &artifact(), 0).await;

    assert!(matches!(result, Err(HarnessError::HttpError(_))));
    execute.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_register_listener_returns_task_id() -> Result<()> {
    let server = MockServer::start_async().await;
    let register = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("{}/oracle/register", API_PREFIX))
                .body_contains("\"taskMode\":\"EVENT_LISTENING\"")
                .body_contains("UpdatedData(bytes32,string,uint256)");
            then.status(200).json_body(json!({ "taskID": "listener-1" }));
        })
        .await;

    let settings = HarnessSettings::default();
    let client = GatewayClient::new(server.base_url());
    let task_id = oracle::register_listener(&client, &settings, &artifact(), 0).await?;

    register.assert_async().await;
    assert_eq!(task_id, "listener-1");
    Ok(())
}

#[tokio::test]
async fn test_register_poller_without_task_id_fails() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("{}/oracle/register", API_PREFIX))
                .body_contains("\"pollingInterval\":5000");
            then.status(200).json_body(json!({ "status": "ACTIVE" }));
        })
        .await;

    let settings = HarnessSettings::default();
    let client = GatewayClient::new(server.base_url());
    let err = oracle::register_poller(&client, &settings, &artifact(), 0)
        .await
        .unwrap_err();

    assert!(matches!(err, HarnessError::MissingFieldError { ref field } if field == "taskID"));
    Ok(())
}
