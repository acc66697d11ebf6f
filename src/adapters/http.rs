use crate::domain::model::{NetworkId, OracleTaskRequest, TokenType, TransactRequest};
use crate::utils::error::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

/// Path prefix every gateway endpoint lives under.
pub const API_PREFIX: &str = "/api/v1/@hyperledger/cactus-plugin-satp-hermes";

/// Thin client over the gateway's oracle and SATP endpoints.
///
/// Any non-2xx status becomes an error. There is no retry and no timeout.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: String,
    client: Client,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    // ---- oracle ----

    pub async fn oracle_execute(&self, request: &OracleTaskRequest) -> Result<Value> {
        self.post_json("/oracle/execute", request).await
    }

    pub async fn oracle_register(&self, request: &OracleTaskRequest) -> Result<Value> {
        self.post_json("/oracle/register", request).await
    }

    pub async fn oracle_status(&self, task_id: &str) -> Result<Value> {
        self.get_json("/oracle/status", &[("taskID", task_id)]).await
    }

    pub async fn oracle_unregister(&self, task_id: &str) -> Result<Value> {
        self.post_query("/oracle/unregister", &[("taskID", task_id)]).await
    }

    // ---- SATP ----

    pub async fn transact(&self, request: &TransactRequest) -> Result<Value> {
        self.post_json("/transact", request).await
    }

    pub async fn session_status(&self, session_id: &str) -> Result<Value> {
        self.get_json("/status", &[("SessionID", session_id)]).await
    }

    pub async fn audit(&self, start_timestamp: u64, end_timestamp: u64) -> Result<Value> {
        let start = start_timestamp.to_string();
        let end = end_timestamp.to_string();
        self.get_json(
            "/audit",
            &[("startTimestamp", start.as_str()), ("endTimestamp", end.as_str())],
        )
        .await
    }

    pub async fn approve_address(
        &self,
        network_id: &NetworkId,
        token_type: TokenType,
    ) -> Result<Value> {
        self.get_json(
            "/approve-address",
            &[
                ("networkId.id", network_id.id.as_str()),
                ("networkId.ledgerType", network_id.ledger_type.as_str()),
                ("tokenType", token_type.as_str()),
            ],
        )
        .await
    }

    pub async fn session_ids(&self) -> Result<Value> {
        self.get_json("/get-sessions-ids", &[]).await
    }

    pub async fn integrations(&self) -> Result<Value> {
        self.get_json("/integrations", &[]).await
    }

    // ---- plumbing ----

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = self.endpoint(path);
        tracing::debug!("GET {} {:?}", url, query);

        let mut request = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }

        Self::send(request).await
    }

    async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value> {
        let url = self.endpoint(path);
        tracing::debug!("POST {}", url);

        Self::send(self.client.post(&url).json(body)).await
    }

    async fn post_query(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = self.endpoint(path);
        tracing::debug!("POST {} {:?}", url, query);

        let request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .query(query);

        Self::send(request).await
    }

    async fn send(request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        tracing::debug!("Gateway response status: {}", response.status());

        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }
}
