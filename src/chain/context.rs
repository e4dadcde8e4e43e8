//! Per-invocation request context.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Unique identifier for one chain invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a new random request ID (UUID v4).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A note a stage left while processing a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    pub stage: String,
    pub message: String,
}

/// Mutable state carried through the chain for a single request.
///
/// The caller owns the context. Stages only borrow it mutably while they
/// run. Fields set by one stage stay visible to every later stage unless a
/// later stage overwrites them.
///
/// The journal and the visited list are diagnostics: writing to them does
/// not count as changing the request's fields.
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    id: RequestId,
    #[serde(skip_serializing)]
    credential: String,
    token: Option<String>,
    attributes: BTreeMap<String, String>,
    journal: Vec<JournalEntry>,
    visited: Vec<String>,
}

impl RequestContext {
    /// Create a context for a request presenting `credential`.
    pub fn new(credential: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            credential: credential.into(),
            token: None,
            attributes: BTreeMap::new(),
            journal: Vec::new(),
            visited: Vec::new(),
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Authorization token derived by an earlier stage, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) -> Option<String> {
        self.token.take()
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Set a field, returning the previous value when it was overwritten.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.attributes.insert(key.into(), value.into())
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Append a diagnostic note on behalf of `stage`.
    pub fn note(&mut self, stage: &str, message: impl Into<String>) {
        self.journal.push(JournalEntry {
            stage: stage.to_string(),
            message: message.into(),
        });
    }

    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    /// Journal messages only, in the order they were written.
    pub fn journal_messages(&self) -> Vec<&str> {
        self.journal.iter().map(|e| e.message.as_str()).collect()
    }

    /// Names of the stages entered so far, in execution order.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub(crate) fn record_visit(&mut self, stage: &str) {
        self.visited.push(stage.to_string());
    }
}
