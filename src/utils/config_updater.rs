//! In-place rewriting of `NAME = value` assignments in the settings file.
//!
//! Only the literal of the first matching assignment changes; every other
//! byte of the file is preserved, comments and layout included.

use crate::utils::error::{HarnessError, Result};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

/// A value written back into the settings file.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    /// Written quoted; only replaces an existing quoted literal.
    Str(String),
    Int(i64),
    Bool(bool),
    /// Written verbatim, unquoted.
    Raw(String),
}

impl SettingValue {
    pub fn is_string(&self) -> bool {
        matches!(self, SettingValue::Str(_))
    }

    /// TOML literal for the value. Strings are escaped; nothing may span lines.
    fn literal(&self, name: &str) -> Result<String> {
        let text = self.to_string();
        if text.contains(|c| c == '\r' || c == '\n') {
            return Err(HarnessError::InvalidConfigValueError {
                field: name.to_string(),
                value: text.escape_debug().to_string(),
                reason: "Setting values must fit on a single line".to_string(),
            });
        }

        Ok(match self {
            SettingValue::Str(s) => toml::Value::String(s.clone()).to_string(),
            _ => text,
        })
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Str(s) | SettingValue::Raw(s) => f.write_str(s),
            SettingValue::Int(n) => write!(f, "{}", n),
            SettingValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Str(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Str(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

fn assignment_pattern(name: &str, value: &SettingValue) -> Result<Regex> {
    // [ \t] rather than \s so a match never spans lines
    let pattern = if value.is_string() {
        format!(r#"(?m)^({}[ \t]*=[ \t]*)["'][^\r\n]*["']"#, regex::escape(name))
    } else {
        format!(r"(?m)^({}[ \t]*=[ \t]*)[^\r\n]*", regex::escape(name))
    };

    Regex::new(&pattern).map_err(|e| HarnessError::ConfigValidationError {
        field: name.to_string(),
        message: format!("Cannot build assignment pattern: {}", e),
    })
}

/// Replaces the literal of the first `name = ...` line in `content`.
///
/// Returns `Cow::Borrowed` when nothing matched, so callers can tell a
/// rewrite from a no-op without comparing strings.
pub fn rewrite_assignment<'a>(
    content: &'a str,
    name: &str,
    value: &SettingValue,
) -> Result<Cow<'a, str>> {
    let re = assignment_pattern(name, value)?;
    let literal = value.literal(name)?;

    Ok(re.replace(content, |caps: &Captures| format!("{}{}", &caps[1], literal)))
}

/// Rewrites one assignment in the settings file at `path`.
///
/// Returns `false` (and leaves the file untouched) when `name` is not found.
pub fn update_setting<P: AsRef<Path>>(
    path: P,
    name: &str,
    value: impl Into<SettingValue>,
) -> Result<bool> {
    let path = path.as_ref();
    let value = value.into();
    let content = std::fs::read_to_string(path)?;

    match rewrite_assignment(&content, name, &value)? {
        Cow::Owned(updated) => {
            std::fs::write(path, updated)?;
            tracing::info!("Updated {} = {}", name, value);
            Ok(true)
        }
        Cow::Borrowed(_) => {
            tracing::warn!("{} not found in {}, nothing updated", name, path.display());
            Ok(false)
        }
    }
}

/// Applies several rewrites in order.
pub fn update_settings<P: AsRef<Path>>(path: P, updates: &[(&str, SettingValue)]) -> Result<()> {
    for (name, value) in updates {
        update_setting(path.as_ref(), name, value.clone())?;
    }
    Ok(())
}
