//! `${VAR}` expansion for string settings.
//!
//! - `${VAR}` is replaced by the value of `VAR` and fails when it is unset
//! - `${VAR:-fallback}` uses `fallback` when `VAR` is unset
//!
//! Bare `$VAR` is left untouched so URLs containing `$` survive.

use crate::ConfigError;

/// Expand `${...}` references in `value`.
///
/// `field` names the setting (e.g. `edit_link.base_url`) for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let mut unset: Vec<String> = Vec::new();
    let expanded = shellexpand::env_with_context_no_errors(value, |name| {
        std::env::var(name).map_or_else(
            |_| {
                unset.push(name.to_owned());
                None
            },
            Some,
        )
    })
    .into_owned();

    // An unset variable is only fatal when it was referenced without a fallback.
    if let Some(name) = unset
        .iter()
        .find(|name| value.contains(&format!("${{{name}}}")))
    {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{name}}} not set"),
        });
    }

    Ok(expanded)
}
