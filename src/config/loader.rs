//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable carrying the gateway bearer credential.
pub const ENV_API_TOKEN: &str = "GATEWAY_API_TOKEN";
/// Environment variable overriding `gateway.account_id`.
pub const ENV_ACCOUNT_ID: &str = "GATEWAY_ACCOUNT_ID";
/// Environment variable overriding `gateway.gateway_name`.
pub const ENV_GATEWAY_NAME: &str = "GATEWAY_NAME";
/// Environment variable overriding `gateway.dynamic_route_name`.
pub const ENV_DYNAMIC_ROUTE: &str = "GATEWAY_DYNAMIC_ROUTE";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, then the environment.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RouterConfig = toml::from_str(&content)?;
    finish(config)
}

/// Build configuration from defaults and the environment only.
pub fn load_from_env() -> Result<RouterConfig, ConfigError> {
    finish(RouterConfig::default())
}

fn finish(mut config: RouterConfig) -> Result<RouterConfig, ConfigError> {
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay environment-provided values onto a parsed configuration.
///
/// Empty values are ignored so an exported-but-blank variable cannot wipe a
/// value from the file.
pub fn apply_env_overrides<F>(config: &mut RouterConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(token) = get(ENV_API_TOKEN) {
        config.gateway.api_token = Some(token);
    }
    if let Some(account) = get(ENV_ACCOUNT_ID) {
        config.gateway.account_id = account;
    }
    if let Some(name) = get(ENV_GATEWAY_NAME) {
        config.gateway.gateway_name = name;
    }
    if let Some(route) = get(ENV_DYNAMIC_ROUTE) {
        config.gateway.dynamic_route_name = route;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            (ENV_API_TOKEN, "token-123"),
            (ENV_ACCOUNT_ID, "acct-env"),
            (ENV_DYNAMIC_ROUTE, ""),
        ]
        .into_iter()
        .collect();

        let mut config = RouterConfig::default();
        config.gateway.dynamic_route_name = "from_file".into();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.gateway.api_token.as_deref(), Some("token-123"));
        assert_eq!(config.gateway.account_id, "acct-env");
        // Blank variable leaves the file value alone
        assert_eq!(config.gateway.dynamic_route_name, "from_file");
        assert_eq!(config.gateway.gateway_name, "");
    }

    #[test]
    fn test_example_config_loads() {
        let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/router.example.toml"));
        let config = load_config(path).unwrap();
        assert_eq!(config.chat.max_tokens, 1024);
        assert_eq!(config.assets.directory, "public");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here/router.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_validation_error_lists_every_problem() {
        let err = ConfigError::Validation(vec![
            ValidationError::ZeroMaxTokens,
            ValidationError::Empty { field: "gateway.account_id" },
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: chat.max_tokens must be greater than zero, gateway.account_id must not be empty"
        );
    }
}
