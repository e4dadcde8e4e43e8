//! The stage abstraction.

use std::fmt;

use crate::chain::context::RequestContext;
use crate::chain::error::ChainError;

/// Result of running one stage: `Ok` forwards to the successor, `Err` halts.
pub type Outcome = Result<(), ChainError>;

/// A unit of processing in a [`HandlerChain`](crate::chain::HandlerChain).
///
/// Stages never call their successor; the chain does that after `process`
/// returns `Ok`. A stage keeps no reference to the context once it returns.
pub trait Stage: Send + Sync + fmt::Debug {
    /// Name used for lookup, logging and metrics.
    fn name(&self) -> &str;

    /// Inspect or mutate the context and decide whether the chain continues.
    fn process(&self, ctx: &mut RequestContext) -> Outcome;
}

/// A stage backed by a closure.
pub struct FnStage<F> {
    name: String,
    f: F,
}

impl<F> FnStage<F>
where
    F: Fn(&mut RequestContext) -> Outcome + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> fmt::Debug for FnStage<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStage").field("name", &self.name).finish()
    }
}

impl<F> Stage for FnStage<F>
where
    F: Fn(&mut RequestContext) -> Outcome + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, ctx: &mut RequestContext) -> Outcome {
        (self.f)(ctx)
    }
}
