use anyhow::Result;
use gateway_harness::adapters::http::API_PREFIX;
use gateway_harness::domain::model::{NetworkId, OracleTaskRequest, TaskType, TokenType};
use gateway_harness::{GatewayClient, HarnessError, HarnessSettings};
use httpmock::prelude::*;
use serde_json::json;

fn path(endpoint: &str) -> String {
    format!("{}{}", API_PREFIX, endpoint)
}

#[tokio::test]
async fn test_oracle_execute_posts_json() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path("/oracle/execute"))
                .header("content-type", "application/json")
                .body_contains("\"taskType\":\"READ\"");
            then.status(200).json_body(json!({ "taskID": "t-1", "operations": [] }));
        })
        .await;

    let client = GatewayClient::new(server.base_url());
    let response = client
        .oracle_execute(&OracleTaskRequest::new(TaskType::Read))
        .await?;

    mock.assert_async().await;
    assert_eq!(response["taskID"], "t-1");
    Ok(())
}

#[tokio::test]
async fn test_oracle_register_status_and_unregister() -> Result<()> {
    let server = MockServer::start_async().await;
    let register = server
        .mock_async(|when, then| {
            when.method(POST).path(path("/oracle/register"));
            then.status(200).json_body(json!({ "taskID": "t-2" }));
        })
        .await;
    let status = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(path("/oracle/status"))
                .query_param("taskID", "t-2");
            then.status(200).json_body(json!({ "status": "ACTIVE" }));
        })
        .await;
    let unregister = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path("/oracle/unregister"))
                .query_param("taskID", "t-2");
            then.status(200).json_body(json!({ "status": "INACTIVE" }));
        })
        .await;

    let client = GatewayClient::new(format!("{}/", server.base_url()));
    client
        .oracle_register(&OracleTaskRequest::new(TaskType::Read).polling(1000))
        .await?;
    let current = client.oracle_status("t-2").await?;
    let cancelled = client.oracle_unregister("t-2").await?;

    register.assert_async().await;
    status.assert_async().await;
    unregister.assert_async().await;
    assert_eq!(current["status"], "ACTIVE");
    assert_eq!(cancelled["status"], "INACTIVE");
    Ok(())
}

#[tokio::test]
async fn test_satp_query_endpoints() -> Result<()> {
    let server = MockServer::start_async().await;
    let status = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(path("/status"))
                .query_param("SessionID", "s-1");
            then.status(200).json_body(json!({ "stage": "stage3" }));
        })
        .await;
    let audit = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(path("/audit"))
                .query_param("startTimestamp", "0")
                .query_param("endTimestamp", "1700000000000");
            then.status(200).json_body(json!({ "sessions": [] }));
        })
        .await;
    let approve = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(path("/approve-address"))
                .query_param("networkId.id", "HardhatTestNetwork1")
                .query_param("networkId.ledgerType", "ETHEREUM")
                .query_param("tokenType", "NONSTANDARD_FUNGIBLE");
            then.status(200).json_body(json!({ "approveAddress": "0xabc" }));
        })
        .await;
    let ids = server
        .mock_async(|when, then| {
            when.method(GET).path(path("/get-sessions-ids"));
            then.status(200).json_body(json!(["s-1", "s-2"]));
        })
        .await;
    let integrations = server
        .mock_async(|when, then| {
            when.method(GET).path(path("/integrations"));
            then.status(200).json_body(json!({ "integrations": [] }));
        })
        .await;

    let client = GatewayClient::new(server.base_url());
    assert_eq!(client.session_status("s-1").await?["stage"], "stage3");
    client.audit(0, 1_700_000_000_000).await?;
    let approval = client
        .approve_address(
            &NetworkId::ethereum("HardhatTestNetwork1"),
            TokenType::NonstandardFungible,
        )
        .await?;
    assert_eq!(approval["approveAddress"], "0xabc");
    assert_eq!(client.session_ids().await?, json!(["s-1", "s-2"]));
    client.integrations().await?;

    status.assert_async().await;
    audit.assert_async().await;
    approve.assert_async().await;
    ids.assert_async().await;
    integrations.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_transact_posts_context_id() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path("/transact"))
                .body_contains("\"contextID\":\"mockContext\"");
            then.status(200).json_body(json!({ "SESSION_ID": "s-9" }));
        })
        .await;

    let settings = HarnessSettings::default();
    let client = GatewayClient::new(server.base_url());
    let response = client
        .transact(&gateway_harness::core::satp::transact_request(&settings, "1"))
        .await?;

    mock.assert_async().await;
    assert_eq!(response["SESSION_ID"], "s-9");
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_is_http_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(path("/oracle/status"));
            then.status(500).json_body(json!({ "message": "boom" }));
        })
        .await;

    let client = GatewayClient::new(server.base_url());
    let err = client.oracle_status("t-1").await.unwrap_err();

    assert!(matches!(err, HarnessError::HttpError(_)));
    assert_eq!(err.exit_code(), 2);
    Ok(())
}
