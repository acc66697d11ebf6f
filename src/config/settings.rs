use crate::adapters::http::GatewayClient;
use crate::domain::model::NetworkId;
use crate::utils::error::{HarnessError, Result};
use crate::utils::validation::{
    validate_evm_address, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_SETTINGS_PATH: &str = "harness.toml";

/// Settings file of `NAME = value` assignments.
///
/// Several keys are rewritten in place by the harness itself (deployed
/// contract addresses, registered task IDs), see `utils::config_updater`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct HarnessSettings {
    // gateways
    pub gateway_base_url: String,
    pub counterparty_gateway_url: String,

    // chains
    pub chain_1_rpc: String,
    pub chain_2_rpc: String,
    pub source_network_id: String,
    pub destination_network_id: String,

    // oracle test contract
    pub oracle_artifact_path: String,
    pub oracle_contract_chain_1: String,
    pub oracle_contract_chain_2: String,
    pub oracle_test_data: String,
    pub oracle_data_hash: String,
    pub oracle_polling_interval_ms: u64,

    // webbattles
    pub contract_artifacts_path: String,
    pub evm_project_dir: String,
    pub contract_chain_1: String,
    pub contract_chain_2: String,
    pub default_bet_amount: String,
    pub default_battle_type: String,
    pub default_challenger: String,
    pub sync_task_id: String,
    pub replication_task_id: String,
    pub last_battle_id: String,

    // satp transfer
    pub satp_context_id: String,
    pub satp_asset_id: String,
    pub satp_reference_id: String,
    pub satp_contract_name: String,
    pub satp_source_owner: String,
    pub satp_source_contract: String,
    pub satp_receiver_owner: String,
    pub satp_receiver_contract: String,
    pub satp_amount: String,
    pub audit_output_dir: String,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self {
            gateway_base_url: "http://localhost:4010".to_string(),
            counterparty_gateway_url: "http://localhost:4110".to_string(),
            chain_1_rpc: "http://localhost:8545".to_string(),
            chain_2_rpc: "http://localhost:8546".to_string(),
            source_network_id: "HardhatTestNetwork1".to_string(),
            destination_network_id: "HardhatTestNetwork2".to_string(),
            oracle_artifact_path:
                "../EVM/artifacts/contracts/OracleTestContract.sol/OracleTestContract.json"
                    .to_string(),
            oracle_contract_chain_1: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            oracle_contract_chain_2: "0xbded0d2bf404bdcba897a74e6657f1f12e5c6fb6".to_string(),
            oracle_test_data: "DATA WRITTEN TO THE BLOCKCHAIN".to_string(),
            oracle_data_hash: "0xd2a21947eed980d6266fd60e26f24379032c4fa65ed8c63b323e040ea2b57536"
                .to_string(),
            oracle_polling_interval_ms: 5000,
            contract_artifacts_path: "../EVM/artifacts/contracts/WebBattles.sol/WebBattles.json"
                .to_string(),
            evm_project_dir: "../EVM".to_string(),
            contract_chain_1: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            contract_chain_2: "0xbdEd0D2bf404bdcBa897a74E6657f1f12e5C6fb6".to_string(),
            default_bet_amount: "100000000000000000".to_string(), // 0.1 ETH in wei
            default_battle_type: "Football Freestyle".to_string(),
            default_challenger: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
            sync_task_id: String::new(),
            replication_task_id: String::new(),
            last_battle_id: String::new(),
            satp_context_id: "mockContext".to_string(),
            satp_asset_id: "ExampleAsset".to_string(),
            satp_reference_id: "SATP-ERC20-ETHEREUM".to_string(),
            satp_contract_name: "SATPTokenContract".to_string(),
            satp_source_owner: "0x70997970c51812dc3a010c7d01b50e0d17dc79c8".to_string(),
            satp_source_contract: "0xe7f1725e7734ce288f8367e1bb143e90bb3f0512".to_string(),
            satp_receiver_owner: "0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc".to_string(),
            satp_receiver_contract: "0xbded0d2bf404bdcba897a74e6657f1f12e5c6fb6".to_string(),
            satp_amount: "100".to_string(),
            audit_output_dir: "audits".to_string(),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl HarnessSettings {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HarnessError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| HarnessError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GATEWAY_HOST})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("GATEWAY_BASE_URL", &self.gateway_base_url)?;
        validate_url("COUNTERPARTY_GATEWAY_URL", &self.counterparty_gateway_url)?;
        validate_url("CHAIN_1_RPC", &self.chain_1_rpc)?;
        validate_url("CHAIN_2_RPC", &self.chain_2_rpc)?;

        validate_non_empty_string("SOURCE_NETWORK_ID", &self.source_network_id)?;
        validate_non_empty_string("DESTINATION_NETWORK_ID", &self.destination_network_id)?;

        validate_path("ORACLE_ARTIFACT_PATH", &self.oracle_artifact_path)?;
        validate_path("CONTRACT_ARTIFACTS_PATH", &self.contract_artifacts_path)?;
        validate_path("EVM_PROJECT_DIR", &self.evm_project_dir)?;
        validate_path("AUDIT_OUTPUT_DIR", &self.audit_output_dir)?;

        for (field, address) in [
            ("ORACLE_CONTRACT_CHAIN_1", &self.oracle_contract_chain_1),
            ("ORACLE_CONTRACT_CHAIN_2", &self.oracle_contract_chain_2),
            ("CONTRACT_CHAIN_1", &self.contract_chain_1),
            ("CONTRACT_CHAIN_2", &self.contract_chain_2),
            ("SATP_SOURCE_CONTRACT", &self.satp_source_contract),
            ("SATP_RECEIVER_CONTRACT", &self.satp_receiver_contract),
        ] {
            validate_evm_address(field, address)?;
        }

        validate_positive_number(
            "ORACLE_POLLING_INTERVAL_MS",
            self.oracle_polling_interval_ms,
            1,
        )?;

        Ok(())
    }

    pub fn source_network(&self) -> NetworkId {
        NetworkId::ethereum(&self.source_network_id)
    }

    pub fn destination_network(&self) -> NetworkId {
        NetworkId::ethereum(&self.destination_network_id)
    }

    /// Client for the gateway serving the source network.
    pub fn gateway_client(&self) -> GatewayClient {
        GatewayClient::new(&self.gateway_base_url)
    }

    /// Client for the gateway serving the destination network.
    pub fn counterparty_client(&self) -> GatewayClient {
        GatewayClient::new(&self.counterparty_gateway_url)
    }
}

impl Validate for HarnessSettings {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
