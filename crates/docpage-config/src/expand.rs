//! `${VAR}` substitution in config values.

use crate::ConfigError;

/// Substitute `${VAR}` and `${VAR:-fallback}` in `value`.
///
/// Values without `${` are returned untouched, so a literal `$` in a URL
/// survives. `field` names the setting in the error.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, Unset> {
        std::env::var(var).map(Some).map_err(|_| Unset(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that has no value.
struct Unset(String);
