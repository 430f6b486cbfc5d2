//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::BridgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment keys overlaid onto the file configuration.
pub const ENV_DOWNSTREAM_URL: &str = "LIS_BRIDGING";
pub const ENV_SIGN: &str = "X_SIGN";
pub const ENV_CONS: &str = "X_CONS";
pub const ENV_PORT: &str = "PORT";
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const ENV_MAX_BODY_SIZE: &str = "MAX_BODY_SIZE";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("invalid value '{value}' for {key}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a `.env` file into the process environment.
///
/// An explicit path must exist; the default `.env` is optional. Variables
/// already set in the environment are not overridden.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)?;
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(ConfigError::EnvFile(e)),
        },
    }
}

/// Load, overlay, and validate configuration.
///
/// `lookup` resolves environment keys; pass `|k| std::env::var(k).ok()` in
/// production.
pub fn load_config<F>(path: Option<&Path>, lookup: F) -> Result<BridgeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content)?
        }
        None => BridgeConfig::default(),
    };

    apply_env(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values onto `config`. Empty values are ignored.
pub fn apply_env<F>(config: &mut BridgeConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(url) = get(ENV_DOWNSTREAM_URL) {
        config.downstream.url = url;
    }
    if let Some(sign) = get(ENV_SIGN) {
        config.downstream.sign = sign;
    }
    if let Some(cons) = get(ENV_CONS) {
        config.downstream.cons = cons;
    }
    if let Some(port) = get(ENV_PORT) {
        let port: u16 = port.parse().map_err(|_| ConfigError::InvalidEnv {
            key: ENV_PORT,
            value: port.clone(),
        })?;
        config.server.bind_address = format!("0.0.0.0:{}", port);
    }
    if let Some(addr) = get(ENV_BIND_ADDRESS) {
        config.server.bind_address = addr;
    }
    if let Some(size) = get(ENV_MAX_BODY_SIZE) {
        config.server.max_body_size = size.parse().map_err(|_| ConfigError::InvalidEnv {
            key: ENV_MAX_BODY_SIZE,
            value: size.clone(),
        })?;
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.observability.log_level = level;
    }
    if let Some(format) = get(ENV_LOG_FORMAT) {
        config.observability.log_format = format.parse().map_err(|_| ConfigError::InvalidEnv {
            key: ENV_LOG_FORMAT,
            value: format.clone(),
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogFormat;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overlay() {
        let config = load_config(
            None,
            env(&[
                ("LIS_BRIDGING", "http://lis.local/api/order"),
                ("X_SIGN", "sign-1"),
                ("X_CONS", "cons-1"),
                ("PORT", "8111"),
                ("LOG_FORMAT", "json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.downstream.url, "http://lis.local/api/order");
        assert_eq!(config.downstream.sign, "sign-1");
        assert_eq!(config.downstream.cons, "cons-1");
        assert_eq!(config.server.bind_address, "0.0.0.0:8111");
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_bind_address_overrides_port() {
        let config = load_config(
            None,
            env(&[
                ("LIS_BRIDGING", "http://lis.local"),
                ("PORT", "9000"),
                ("BIND_ADDRESS", "127.0.0.1:7000"),
            ]),
        )
        .unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:7000");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = BridgeConfig::default();
        config.downstream.sign = "from-file".into();
        apply_env(&mut config, env(&[("X_SIGN", "")])).unwrap();
        assert_eq!(config.downstream.sign, "from-file");
    }

    #[test]
    fn test_missing_downstream_url_is_fatal() {
        let err = load_config(None, env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("LIS_BRIDGING"));
    }

    #[test]
    fn test_control_character_in_sign_is_fatal() {
        let err = load_config(
            None,
            env(&[("LIS_BRIDGING", "http://lis"), ("X_SIGN", "abc\u{7}def")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("X_SIGN"));
        assert!(!err.to_string().contains("abc"));
    }

    #[test]
    fn test_bad_port() {
        let err = load_config(None, env(&[("LIS_BRIDGING", "http://lis"), ("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key: "PORT", .. }));
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(Some(Path::new("/nonexistent/lis-bridge.toml")), env(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_missing_explicit_env_file() {
        let err = load_env_file(Some(Path::new("/nonexistent/.env"))).unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile(_)));
    }
}
