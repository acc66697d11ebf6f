// Adapters layer: concrete implementations for external systems (gateway http, filesystem, hardhat).

pub mod deployer;
pub mod http;
pub mod storage;
