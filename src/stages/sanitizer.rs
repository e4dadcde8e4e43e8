//! Input inspection that never halts the chain.

use tracing::warn;

use crate::chain::{Outcome, RequestContext, Stage};
use crate::config::SanitizerConfig;

pub const NAME: &str = "sanitizer";

/// Logs requests whose credential contains a suspicious pattern.
///
/// Never fails and never changes request fields.
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    // Lowercased; matching is case-insensitive.
    suspicious_patterns: Vec<String>,
}

impl Sanitizer {
    pub fn new<I, T>(patterns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            suspicious_patterns: patterns
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &SanitizerConfig) -> Self {
        Self::new(&config.suspicious_patterns)
    }

    /// Patterns found in `input`.
    pub fn findings(&self, input: &str) -> Vec<&str> {
        let haystack = input.to_lowercase();
        self.suspicious_patterns
            .iter()
            .filter(|p| haystack.contains(p.as_str()))
            .map(String::as_str)
            .collect()
    }
}

impl Stage for Sanitizer {
    fn name(&self) -> &str {
        NAME
    }

    fn process(&self, ctx: &mut RequestContext) -> Outcome {
        let findings = self.findings(ctx.credential());
        if !findings.is_empty() {
            warn!(request_id = %ctx.id(), patterns = ?findings, "Suspicious input detected");
        }
        ctx.note(NAME, "Not injecting anything, are you?");
        Ok(())
    }
}
