use crate::utils::error::{HarnessError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> HarnessError {
    HarnessError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Gateway and RPC endpoints: absolute http(s) URLs with a host.
pub fn validate_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| invalid(field, value, format!("not a URL ({})", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            value,
            format!("gateways and nodes are reached over http(s), not {}", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field, value, "missing host"));
    }
    Ok(())
}

/// Artifact, project and output locations. Existence is checked when used.
pub fn validate_path(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "path is empty"));
    }
    if value.contains('\0') {
        return Err(invalid(field, value.escape_debug(), "path contains a NUL byte"));
    }
    Ok(())
}

pub fn validate_positive_number(field: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(field, value, format!("must be at least {}", min_value)));
    }
    Ok(())
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "must not be blank"));
    }
    Ok(())
}

/// Checks for a `0x`-prefixed, 20-byte hex address. Checksum casing is not verified.
pub fn validate_evm_address(field: &str, value: &str) -> Result<()> {
    let digits = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"));

    match digits {
        Some(hex) if hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()) => Ok(()),
        _ => Err(invalid(field, value, "expected 0x followed by 40 hex digits")),
    }
}
