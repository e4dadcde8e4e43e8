//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ChainConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ChainConfig, ConfigError> {
    let config: ChainConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ChainConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&content)?;

    tracing::debug!(path = ?path, stages = config.pipeline.stages.len(), "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::StageKind;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [pipeline]
            stages = ["cancellation", "authenticator", "authorizer"]

            [authenticator]
            expected_credential = "M - letmein"
            issued_token = "M"

            [authorizer]
            accepted_tokens = ["007", "M"]

            [observability]
            log_level = "debug"
            json_logs = true
            "#,
        )
        .unwrap();

        assert_eq!(config.pipeline.stages[0], StageKind::Cancellation);
        assert_eq!(config.authenticator.issued_token, "M");
        assert!(config.observability.json_logs);
    }

    #[test]
    fn test_unknown_stage_is_parse_error() {
        let err = parse_config("[pipeline]\nstages = [\"firewall\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_display() {
        let err = parse_config("[pipeline]\nstages = []\n").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: pipeline.stages is empty");
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/stage-chain.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_bundled_sample() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("chain.toml");
        let config = load_config(&path).unwrap();
        assert_eq!(config, ChainConfig::default());
    }
}
