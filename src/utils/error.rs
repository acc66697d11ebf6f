use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Gateway request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Settings parsing error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required setting: {field}")]
    MissingConfigError { field: String },

    #[error("Response is missing field '{field}'")]
    MissingFieldError { field: String },

    #[error("Deployment failed: {message}")]
    DeploymentError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    FileSystem,
    Data,
    Deployment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HarnessError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HarnessError::HttpError(_) => ErrorCategory::Network,
            HarnessError::IoError(_) => ErrorCategory::FileSystem,
            HarnessError::SerializationError(_) | HarnessError::MissingFieldError { .. } => {
                ErrorCategory::Data
            }
            HarnessError::ConfigValidationError { .. }
            | HarnessError::InvalidConfigValueError { .. }
            | HarnessError::MissingConfigError { .. } => ErrorCategory::Configuration,
            HarnessError::DeploymentError { .. } => ErrorCategory::Deployment,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Deployment => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::FileSystem => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HarnessError::HttpError(e) if e.is_connect() => {
                "Make sure the gateway is running and GATEWAY_BASE_URL points at it"
            }
            HarnessError::HttpError(e) if e.is_status() => {
                "The gateway rejected the request; check the gateway logs for details"
            }
            HarnessError::HttpError(_) => "Retry the command once the gateway is reachable",
            HarnessError::IoError(_) => "Check that the file exists and is readable/writable",
            HarnessError::SerializationError(_) => {
                "Check that the contract artifact and gateway responses are valid JSON"
            }
            HarnessError::ConfigValidationError { .. }
            | HarnessError::InvalidConfigValueError { .. }
            | HarnessError::MissingConfigError { .. } => {
                "Fix the settings file (default: harness.toml) and run again"
            }
            HarnessError::MissingFieldError { .. } => {
                "The gateway answered with an unexpected payload; inspect the response with --verbose"
            }
            HarnessError::DeploymentError { .. } => {
                "Make sure both hardhat nodes are running and `npx hardhat` works in EVM_PROJECT_DIR"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HarnessError::HttpError(e) => match e.status() {
                Some(status) => format!("Gateway returned {}", status),
                None => format!("Could not reach the gateway: {}", e),
            },
            other => other.to_string(),
        }
    }

    /// Process exit code for the CLI binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_critical() {
        let err = HarnessError::MissingConfigError {
            field: "GATEWAY_BASE_URL".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_missing_field_message() {
        let err = HarnessError::MissingFieldError {
            field: "taskID".to_string(),
        };
        assert_eq!(err.to_string(), "Response is missing field 'taskID'");
        assert_eq!(err.exit_code(), 1);
    }
}
