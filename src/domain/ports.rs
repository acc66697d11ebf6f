use crate::domain::model::ContractArtifact;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Loads a Hardhat artifact through any [`Storage`].
pub async fn load_artifact<S: Storage>(storage: &S, path: &str) -> Result<ContractArtifact> {
    tracing::debug!("Loading contract artifact from {}", path);
    let data = storage.read_file(path).await?;
    ContractArtifact::from_slice(&data)
}

/// Deploys a contract to a named network and returns its address.
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    async fn deploy(&self, network: &str) -> Result<String>;
}
