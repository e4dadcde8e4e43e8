//! Credential check that derives an authorization token.

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::chain::{ChainError, Outcome, RequestContext, Stage};
use crate::config::AuthenticatorConfig;

pub const NAME: &str = "authenticator";

/// Accepts one configured credential and stores the configured token.
#[derive(Clone)]
pub struct Authenticator {
    expected_credential: String,
    issued_token: String,
}

impl Authenticator {
    pub fn new(expected_credential: impl Into<String>, issued_token: impl Into<String>) -> Self {
        Self {
            expected_credential: expected_credential.into(),
            issued_token: issued_token.into(),
        }
    }

    pub fn from_config(config: &AuthenticatorConfig) -> Self {
        Self::new(&config.expected_credential, &config.issued_token)
    }

    fn verify(&self, credential: &str) -> bool {
        credential
            .as_bytes()
            .ct_eq(self.expected_credential.as_bytes())
            .into()
    }
}

// Keeps the credential out of logs.
impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator").finish_non_exhaustive()
    }
}

impl Stage for Authenticator {
    fn name(&self) -> &str {
        NAME
    }

    fn process(&self, ctx: &mut RequestContext) -> Outcome {
        if !self.verify(ctx.credential()) {
            return Err(ChainError::AuthenticationFailed);
        }
        ctx.note(NAME, "Greetings, Mr.Bond. What can I do for you?");
        ctx.set_token(&self.issued_token);
        debug!("Credential accepted, token issued");
        Ok(())
    }
}
