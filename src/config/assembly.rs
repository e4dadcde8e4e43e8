//! Chain assembly from configuration.

use std::sync::Arc;

use crate::chain::{ChainBuilder, HandlerChain, Stage};
use crate::config::schema::{ChainConfig, StageKind};
use crate::stages::{Authenticator, Authorizer, CancelFlag, CancellationGuard, Sanitizer};

/// A chain built from configuration plus the handles it was wired with.
#[derive(Debug)]
pub struct AssembledChain {
    pub chain: HandlerChain,
    /// Flag observed by every `cancellation` stage in the chain.
    pub cancel: CancelFlag,
}

/// Create one stage of `kind` configured from `config`.
pub fn build_stage(kind: StageKind, config: &ChainConfig, cancel: &CancelFlag) -> Arc<dyn Stage> {
    match kind {
        StageKind::Sanitizer => Arc::new(Sanitizer::from_config(&config.sanitizer)),
        StageKind::Authenticator => Arc::new(Authenticator::from_config(&config.authenticator)),
        StageKind::Authorizer => Arc::new(Authorizer::from_config(&config.authorizer)),
        StageKind::Cancellation => Arc::new(CancellationGuard::new(cancel.clone())),
    }
}

/// Link the stages named in `pipeline.stages`, entry first.
///
/// Expects a validated config; an empty pipeline yields a chain without an
/// entry stage.
pub fn assemble(config: &ChainConfig) -> AssembledChain {
    let cancel = CancelFlag::new();
    let mut builder = ChainBuilder::new();
    for kind in &config.pipeline.stages {
        builder.push(build_stage(*kind, config, &cancel));
    }

    let chain = builder.build();
    tracing::info!(order = ?chain.stage_names(), "Chain assembled");
    AssembledChain { chain, cancel }
}
