//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Strings without `${` are returned unchanged.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    if let Some(var_name) = first_unset_required(value) {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var_name}}} not set"),
        });
    }

    Ok(shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok()).into_owned())
}

/// Name of the first `${VAR}` reference without a default whose variable is unset.
fn first_unset_required(value: &str) -> Option<&str> {
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let end = after.find('}')?;
        let reference = &after[..end];
        if !reference.contains(":-") && std::env::var(reference).is_err() {
            return Some(reference);
        }
        rest = &after[end + 1..];
    }
    None
}
