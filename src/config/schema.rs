//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

/// Root configuration for a handler chain.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ChainConfig {
    /// Stage order.
    pub pipeline: PipelineConfig,

    /// Credential check settings.
    pub authenticator: AuthenticatorConfig,

    /// Token check settings.
    pub authorizer: AuthorizerConfig,

    /// Input inspection settings.
    pub sanitizer: SanitizerConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Kinds of stage that can be named in `pipeline.stages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Sanitizer,
    Authenticator,
    Authorizer,
    Cancellation,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Sanitizer => "sanitizer",
            StageKind::Authenticator => "authenticator",
            StageKind::Authorizer => "authorizer",
            StageKind::Cancellation => "cancellation",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sanitizer" => Ok(StageKind::Sanitizer),
            "authenticator" => Ok(StageKind::Authenticator),
            "authorizer" => Ok(StageKind::Authorizer),
            "cancellation" => Ok(StageKind::Cancellation),
            other => Err(format!("unknown stage kind '{}'", other)),
        }
    }
}

/// Pipeline layout.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Stages in execution order; the first is the entry stage.
    pub stages: Vec<StageKind>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stages: vec![
                StageKind::Sanitizer,
                StageKind::Authenticator,
                StageKind::Authorizer,
            ],
        }
    }
}

/// Authenticator configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AuthenticatorConfig {
    /// The only credential that is accepted.
    pub expected_credential: String,

    /// Token stored in the context on success.
    pub issued_token: String,
}

impl Default for AuthenticatorConfig {
    fn default() -> Self {
        Self {
            // WARNING: demo credential. Override in any real deployment.
            expected_credential: "J.Bond - MySolidPassword".to_string(),
            issued_token: "007".to_string(),
        }
    }
}

/// Authorizer configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AuthorizerConfig {
    /// Tokens that unlock the request.
    pub accepted_tokens: Vec<String>,
}

impl Default for AuthorizerConfig {
    fn default() -> Self {
        Self {
            accepted_tokens: vec!["007".to_string()],
        }
    }
}

/// Sanitizer configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Case-insensitive substrings that trigger a warning.
    pub suspicious_patterns: Vec<String>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            suspicious_patterns: vec![
                "<script".to_string(),
                "' or 1=1".to_string(),
                ";--".to_string(),
            ],
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
