//! Shared stages for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use stage_chain::chain::{ChainError, Outcome, RequestContext, Stage};

/// A stage that counts its calls, records how many fields it saw on entry,
/// then adds one field of its own.
#[derive(Debug, Clone)]
pub struct Probe {
    name: String,
    fail: bool,
    calls: Arc<AtomicUsize>,
    observed: Arc<Mutex<Vec<usize>>>,
}

impl Probe {
    pub fn passing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
            observed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            fail: true,
            ..Self::passing(name)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Field counts seen on entry, one per call.
    pub fn observed(&self) -> Vec<usize> {
        self.observed.lock().unwrap().clone()
    }

    pub fn error(&self) -> ChainError {
        ChainError::stage_failed(self.name.clone(), "probe failure")
    }
}

impl Stage for Probe {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, ctx: &mut RequestContext) -> Outcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.observed.lock().unwrap().push(ctx.attributes().len());
        let position = ctx.visited().len();
        ctx.set_attribute(format!("seen.{}", self.name), position.to_string());
        if self.fail {
            return Err(self.error());
        }
        Ok(())
    }
}

/// Probes named `s0..s{n-1}`; the one at `fail_at` (if any) fails.
#[allow(dead_code)]
pub fn probes(n: usize, fail_at: Option<usize>) -> Vec<Probe> {
    (0..n)
        .map(|i| {
            let name = format!("s{}", i);
            if Some(i) == fail_at {
                Probe::failing(name)
            } else {
                Probe::passing(name)
            }
        })
        .collect()
}
