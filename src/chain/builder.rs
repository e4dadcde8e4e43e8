//! Fluent construction of a linked chain.

use std::sync::Arc;

use crate::chain::handler::HandlerChain;
use crate::chain::stage::Stage;

/// Collects stages in execution order and links them into a [`HandlerChain`].
#[derive(Default)]
pub struct ChainBuilder {
    stages: Vec<Arc<dyn Stage>>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn shared(mut self, stage: Arc<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn push(&mut self, stage: Arc<dyn Stage>) {
        self.stages.push(stage);
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Link the collected stages; the first one becomes the entry.
    pub fn build(self) -> HandlerChain {
        HandlerChain::from_stages(self.stages)
    }
}
