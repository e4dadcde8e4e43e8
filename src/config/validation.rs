//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that the pipeline can ever succeed (token issued before it is checked)
//! - Validate value ranges (non-empty credentials, known log levels)
//!
//! Returns every problem found, not just the first.

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{ChainConfig, StageKind};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A semantic problem in a [`ChainConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("pipeline.stages is empty")]
    EmptyPipeline,

    #[error("stage '{0}' appears more than once in pipeline.stages")]
    DuplicateStage(StageKind),

    #[error("authenticator.expected_credential must not be empty")]
    EmptyCredential,

    #[error("authenticator.issued_token must not be empty")]
    EmptyIssuedToken,

    #[error("authorizer.accepted_tokens must not be empty")]
    NoAcceptedTokens,

    #[error("authorizer runs before authenticator, so no token can exist yet")]
    AuthorizerBeforeAuthenticator,

    #[error("authorizer is configured but no authenticator issues a token")]
    MissingAuthenticator,

    #[error("issued token is not in authorizer.accepted_tokens")]
    IssuedTokenNotAccepted,

    #[error("unknown log level '{0}'")]
    InvalidLogLevel(String),
}

/// Validate `config`, collecting all errors.
pub fn validate_config(config: &ChainConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let stages = &config.pipeline.stages;

    if stages.is_empty() {
        errors.push(ValidationError::EmptyPipeline);
    }

    let mut seen = HashSet::new();
    for kind in stages {
        if !seen.insert(*kind) {
            errors.push(ValidationError::DuplicateStage(*kind));
        }
    }

    let position = |kind: StageKind| stages.iter().position(|k| *k == kind);
    let authenticator = position(StageKind::Authenticator);
    let authorizer = position(StageKind::Authorizer);

    if authenticator.is_some() {
        if config.authenticator.expected_credential.is_empty() {
            errors.push(ValidationError::EmptyCredential);
        }
        if config.authenticator.issued_token.is_empty() {
            errors.push(ValidationError::EmptyIssuedToken);
        }
    }

    if let Some(authz) = authorizer {
        if config.authorizer.accepted_tokens.is_empty() {
            errors.push(ValidationError::NoAcceptedTokens);
        }
        match authenticator {
            Some(authn) if authn > authz => {
                errors.push(ValidationError::AuthorizerBeforeAuthenticator);
            }
            None => errors.push(ValidationError::MissingAuthenticator),
            Some(_) => {
                let issued = &config.authenticator.issued_token;
                if !config.authorizer.accepted_tokens.is_empty()
                    && !config.authorizer.accepted_tokens.contains(issued)
                {
                    errors.push(ValidationError::IssuedTokenNotAccepted);
                }
            }
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
