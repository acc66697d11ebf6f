pub mod oracle;
pub mod satp;
pub mod webbattles;

pub use crate::domain::model::{ContractArtifact, OracleTaskRequest, TransactRequest};
pub use crate::domain::ports::{load_artifact, ContractDeployer, Storage};
pub use crate::utils::error::Result;

use crate::utils::error::HarnessError;
use serde_json::Value;
use std::time::Duration;

/// Reads a string field of a gateway response, failing if it is absent.
pub fn required_str<'a>(value: &'a Value, field: &str) -> Result<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| HarnessError::MissingFieldError {
            field: field.to_string(),
        })
}

pub fn print_response(response: &Value) {
    println!("Response: {}", response);
}

/// Sleeps between demo steps so the chains have time to mine.
pub async fn pause(secs: u64) {
    if secs > 0 {
        tokio::time::sleep(Duration::from_secs(secs)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_str() {
        let response = json!({ "taskID": "abc", "count": 3 });
        assert_eq!(required_str(&response, "taskID").unwrap(), "abc");
        assert!(matches!(
            required_str(&response, "count"),
            Err(HarnessError::MissingFieldError { .. })
        ));
        assert!(required_str(&response, "missing").is_err());
    }
}
