use crate::domain::ports::ContractDeployer;
use crate::utils::error::{HarnessError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

const DEPLOY_SCRIPT: &str = "scripts/deploy-webbattles.js";
const DEPLOYED_MARKER: &str = "WebBattles deployed to:";

/// Runs `npx hardhat run scripts/deploy-webbattles.js --network <net>` inside the EVM project.
#[derive(Debug, Clone)]
pub struct HardhatDeployer {
    evm_dir: PathBuf,
}

impl HardhatDeployer {
    pub fn new(evm_dir: impl Into<PathBuf>) -> Self {
        Self {
            evm_dir: evm_dir.into(),
        }
    }
}

/// Pulls the contract address out of the deploy script's stdout.
pub fn parse_deployed_address(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .find(|line| line.contains(DEPLOYED_MARKER))
        .and_then(|line| line.split(": ").nth(1))
        .map(|address| address.trim().to_string())
        .filter(|address| !address.is_empty())
}

#[async_trait]
impl ContractDeployer for HardhatDeployer {
    async fn deploy(&self, network: &str) -> Result<String> {
        tracing::info!(
            "Deploying WebBattles to {} from {}",
            network,
            self.evm_dir.display()
        );

        let output = Command::new("npx")
            .args(["hardhat", "run", DEPLOY_SCRIPT, "--network", network])
            .current_dir(&self.evm_dir)
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            return Err(HarnessError::DeploymentError {
                message: format!(
                    "{} ({}): {}",
                    network,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        tracing::debug!("hardhat output for {}:\n{}", network, stdout);

        parse_deployed_address(&stdout).ok_or_else(|| HarnessError::DeploymentError {
            message: format!("could not extract contract address from {} output", network),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deployed_address() {
        let stdout = "Compiled 1 Solidity file\nWebBattles deployed to: 0x5FbDB2315678afecb367f032d93F642f64180aa3\nDone\n";
        assert_eq!(
            parse_deployed_address(stdout).as_deref(),
            Some("0x5FbDB2315678afecb367f032d93F642f64180aa3")
        );
    }

    #[test]
    fn test_parse_deployed_address_missing_marker() {
        assert_eq!(parse_deployed_address("Nothing to compile\n"), None);
        assert_eq!(parse_deployed_address("WebBattles deployed to: \n"), None);
    }
}
