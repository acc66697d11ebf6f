use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerType {
    #[serde(rename = "ETHEREUM")]
    Ethereum,
    #[serde(rename = "BESU_2X")]
    Besu2x,
    #[serde(rename = "FABRIC_2")]
    Fabric2,
}

impl LedgerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerType::Ethereum => "ETHEREUM",
            LedgerType::Besu2x => "BESU_2X",
            LedgerType::Fabric2 => "FABRIC_2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkId {
    pub id: String,
    pub ledger_type: LedgerType,
}

impl NetworkId {
    pub fn ethereum(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ledger_type: LedgerType::Ethereum,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    Read,
    Update,
    ReadAndUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskMode {
    Polling,
    EventListening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    Erc20,
    Erc721,
    NonstandardFungible,
    NonstandardNonfungible,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Erc20 => "ERC20",
            TokenType::Erc721 => "ERC721",
            TokenType::NonstandardFungible => "NONSTANDARD_FUNGIBLE",
            TokenType::NonstandardNonfungible => "NONSTANDARD_NONFUNGIBLE",
        }
    }
}

/// Contract the gateway reads from or writes to.
///
/// `method_name` and `params` are optional: a READ_AND_UPDATE destination
/// without `params` receives whatever the source read produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDescriptor {
    pub contract_name: String,
    pub contract_abi: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_bytecode: Option<String>,
    pub contract_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeningOptions {
    pub event_signature: String,
    pub filter_params: Vec<String>,
}

/// Body of `/oracle/execute` and `/oracle/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_network_id: Option<NetworkId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_contract: Option<ContractDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_network_id: Option<NetworkId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_contract: Option<ContractDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listening_options: Option<ListeningOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_mode: Option<TaskMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polling_interval: Option<u64>,
    pub task_type: TaskType,
}

impl OracleTaskRequest {
    pub fn new(task_type: TaskType) -> Self {
        Self {
            source_network_id: None,
            source_contract: None,
            destination_network_id: None,
            destination_contract: None,
            listening_options: None,
            task_mode: None,
            polling_interval: None,
            task_type,
        }
    }

    pub fn with_source(mut self, network: NetworkId, contract: ContractDescriptor) -> Self {
        self.source_network_id = Some(network);
        self.source_contract = Some(contract);
        self
    }

    pub fn with_destination(mut self, network: NetworkId, contract: ContractDescriptor) -> Self {
        self.destination_network_id = Some(network);
        self.destination_contract = Some(contract);
        self
    }

    pub fn polling(mut self, interval_ms: u64) -> Self {
        self.task_mode = Some(TaskMode::Polling);
        self.polling_interval = Some(interval_ms);
        self
    }

    pub fn listening(mut self, options: ListeningOptions) -> Self {
        self.task_mode = Some(TaskMode::EventListening);
        self.listening_options = Some(options);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub reference_id: String,
    pub owner: String,
    pub contract_name: String,
    pub contract_address: String,
    pub network_id: NetworkId,
    pub token_type: TokenType,
    pub amount: String,
}

/// Body of `/transact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactRequest {
    #[serde(rename = "contextID")]
    pub context_id: String,
    pub source_asset: Asset,
    pub receiver_asset: Asset,
}

/// Hardhat compilation artifact (`artifacts/contracts/<Name>.sol/<Name>.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: Value,
    pub bytecode: String,
}

impl ContractArtifact {
    pub fn from_slice(data: &[u8]) -> crate::utils::error::Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Descriptor for this contract at `address`, without method or params.
    pub fn descriptor(&self, address: &str) -> ContractDescriptor {
        ContractDescriptor {
            contract_name: self.contract_name.clone(),
            contract_abi: self.abi.clone(),
            contract_bytecode: Some(self.bytecode.clone()),
            contract_address: address.to_string(),
            method_name: None,
            params: None,
        }
    }
}

impl ContractDescriptor {
    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.method_name = Some(name.into());
        self
    }

    pub fn params(mut self, params: Vec<Value>) -> Self {
        self.params = Some(params);
        self
    }

    pub fn without_bytecode(mut self) -> Self {
        self.contract_bytecode = None;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.contract_name = name.into();
        self
    }
}
