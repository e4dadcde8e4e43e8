//! Token check that releases the request.

use tracing::debug;

use crate::chain::{ChainError, Outcome, RequestContext, Stage};
use crate::config::AuthorizerConfig;

pub const NAME: &str = "authorizer";

/// Passes requests whose token is one of the accepted tokens.
#[derive(Debug, Clone)]
pub struct Authorizer {
    accepted_tokens: Vec<String>,
}

impl Authorizer {
    pub fn new<I, T>(accepted_tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            accepted_tokens: accepted_tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &AuthorizerConfig) -> Self {
        Self::new(config.accepted_tokens.iter().cloned())
    }
}

impl Stage for Authorizer {
    fn name(&self) -> &str {
        NAME
    }

    fn process(&self, ctx: &mut RequestContext) -> Outcome {
        let token = ctx.token().ok_or_else(|| ChainError::AuthorizationDenied {
            reason: "no authorization token".to_string(),
        })?;

        if !self.accepted_tokens.iter().any(|t| t == token) {
            return Err(ChainError::AuthorizationDenied {
                reason: "token not accepted".to_string(),
            });
        }

        debug!("Token accepted");
        ctx.note(NAME, "Here is the requested data");
        Ok(())
    }
}
