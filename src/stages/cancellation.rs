//! Cooperative cancellation as a chain stage.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::chain::{ChainError, Outcome, RequestContext, Stage};

pub const NAME: &str = "cancellation";

/// Shared flag set from outside the chain to cancel requests.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Halts the chain with [`ChainError::Cancelled`] once its flag is set.
#[derive(Debug, Clone)]
pub struct CancellationGuard {
    flag: CancelFlag,
}

impl CancellationGuard {
    pub fn new(flag: CancelFlag) -> Self {
        Self { flag }
    }

    pub fn flag(&self) -> &CancelFlag {
        &self.flag
    }
}

impl Stage for CancellationGuard {
    fn name(&self) -> &str {
        NAME
    }

    fn process(&self, _ctx: &mut RequestContext) -> Outcome {
        if self.flag.is_cancelled() {
            return Err(ChainError::Cancelled {
                stage: NAME.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_follows_flag() {
        let flag = CancelFlag::new();
        let guard = CancellationGuard::new(flag.clone());
        let mut ctx = RequestContext::new("x");

        assert!(guard.process(&mut ctx).is_ok());

        flag.cancel();
        assert_eq!(
            guard.process(&mut ctx),
            Err(ChainError::Cancelled { stage: NAME.into() })
        );

        flag.reset();
        assert!(guard.process(&mut ctx).is_ok());
    }
}
