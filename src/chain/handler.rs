//! Stage registry and successor links.
//!
//! # Responsibilities
//! - Own every registered stage and its successor link
//! - Rewire links (`set_next`, splicing helpers) while rejecting cycles
//! - Run a request through the linked stages, halting on the first failure
//!
//! # Layout
//! ```text
//! links:  [#0 sanitizer] [#1 authenticator] [#2 authorizer]
//!               │  next=#1        │  next=#2         │  next=None
//! entry ────────┘
//! ```
//! Stages are addressed by [`StageId`] (an index into the registry), so
//! rewiring never aliases a stage mutably.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::chain::context::RequestContext;
use crate::chain::error::{ChainError, LinkError};
use crate::chain::stage::Stage;
use crate::observability::metrics;

static NEXT_CHAIN_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a stage registered in a [`HandlerChain`].
///
/// Only valid for the chain that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StageId {
    chain: u64,
    index: usize,
}

impl StageId {
    pub(crate) fn new(chain: u64, index: usize) -> Self {
        Self { chain, index }
    }

    /// Registration position within the issuing chain.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

struct Link {
    stage: Arc<dyn Stage>,
    next: Option<StageId>,
}

/// An ordered, acyclic chain of stages.
///
/// Registering a stage does not link it. Links are set with
/// [`set_next`](Self::set_next) and [`set_entry`](Self::set_entry), or with
/// the splicing helpers ([`prepend`](Self::prepend), [`append`](Self::append),
/// [`insert_before`](Self::insert_before), [`insert_after`](Self::insert_after)).
///
/// `process` borrows the chain immutably and every link mutation needs
/// `&mut self`, so links cannot change under an in-flight invocation.
pub struct HandlerChain {
    id: u64,
    links: Vec<Link>,
    entry: Option<StageId>,
}

impl Default for HandlerChain {
    fn default() -> Self {
        Self {
            id: NEXT_CHAIN_ID.fetch_add(1, Ordering::Relaxed),
            links: Vec::new(),
            entry: None,
        }
    }
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link `stages` in order; the first becomes the entry.
    pub(crate) fn from_stages(stages: Vec<Arc<dyn Stage>>) -> Self {
        let mut chain = Self::new();
        let id = chain.id;
        let count = stages.len();
        chain.links = stages
            .into_iter()
            .enumerate()
            .map(|(index, stage)| Link {
                stage,
                next: (index + 1 < count).then(|| StageId::new(id, index + 1)),
            })
            .collect();
        if count > 0 {
            chain.entry = Some(StageId::new(id, 0));
        }
        chain
    }

    /// Register a stage without linking it.
    pub fn add<S: Stage + 'static>(&mut self, stage: S) -> StageId {
        self.add_shared(Arc::new(stage))
    }

    /// Register an already shared stage. The same stage may be registered
    /// at several positions.
    pub fn add_shared(&mut self, stage: Arc<dyn Stage>) -> StageId {
        let id = StageId::new(self.id, self.links.len());
        self.links.push(Link { stage, next: None });
        id
    }

    /// Number of registered stages, linked or not.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn stage(&self, id: StageId) -> Option<&dyn Stage> {
        self.links.get(id.index).map(|l| l.stage.as_ref())
    }

    /// First registered stage with the given name.
    pub fn find(&self, name: &str) -> Option<StageId> {
        self.links
            .iter()
            .position(|l| l.stage.name() == name)
            .map(|index| StageId::new(self.id, index))
    }

    pub fn entry(&self) -> Option<StageId> {
        self.entry
    }

    pub fn next_of(&self, id: StageId) -> Option<StageId> {
        self.links.get(id.index).and_then(|l| l.next)
    }

    pub fn set_entry(&mut self, id: StageId) -> Result<(), LinkError> {
        self.check(id)?;
        self.entry = Some(id);
        Ok(())
    }

    /// Rewrite the successor of `id`. `None` makes it the terminal stage.
    ///
    /// Affects every later invocation whose traversal passes through `id`.
    pub fn set_next(&mut self, id: StageId, next: Option<StageId>) -> Result<(), LinkError> {
        self.check(id)?;
        if let Some(to) = next {
            self.check(to)?;
            if self.walk(to).any(|s| s == id) {
                return Err(LinkError::Cycle { from: id, to });
            }
        }
        self.links[id.index].next = next;
        debug!(stage = %id, next = ?next.map(|n| n.index), "Relinked stage");
        Ok(())
    }

    /// Stage ids in traversal order, starting at the entry.
    pub fn order(&self) -> Vec<StageId> {
        match self.entry {
            Some(entry) => self.walk(entry).collect(),
            None => Vec::new(),
        }
    }

    pub fn order_from(&self, start: StageId) -> Result<Vec<StageId>, LinkError> {
        self.check(start)?;
        Ok(self.walk(start).collect())
    }

    /// Stage names in traversal order, starting at the entry.
    pub fn stage_names(&self) -> Vec<&str> {
        self.order()
            .into_iter()
            .map(|id| self.links[id.index].stage.name())
            .collect()
    }

    /// Register `stage`, link it to the current entry and make it the entry.
    pub fn prepend<S: Stage + 'static>(&mut self, stage: S) -> StageId {
        self.prepend_shared(Arc::new(stage))
    }

    pub fn prepend_shared(&mut self, stage: Arc<dyn Stage>) -> StageId {
        let id = self.add_shared(stage);
        // A fresh stage cannot be reachable from the old entry.
        self.links[id.index].next = self.entry;
        self.entry = Some(id);
        id
    }

    /// Register `stage` after the current terminal stage.
    pub fn append<S: Stage + 'static>(&mut self, stage: S) -> StageId {
        self.append_shared(Arc::new(stage))
    }

    pub fn append_shared(&mut self, stage: Arc<dyn Stage>) -> StageId {
        let tail = self.order().last().copied();
        let id = self.add_shared(stage);
        match tail {
            Some(tail) => self.links[tail.index].next = Some(id),
            None => self.entry = Some(id),
        }
        id
    }

    /// Register `stage` between `anchor` and its current successor.
    pub fn insert_after<S: Stage + 'static>(
        &mut self,
        anchor: StageId,
        stage: S,
    ) -> Result<StageId, LinkError> {
        self.check(anchor)?;
        let id = self.add(stage);
        self.links[id.index].next = self.links[anchor.index].next;
        self.links[anchor.index].next = Some(id);
        Ok(id)
    }

    /// Register `stage` in front of `anchor` on the traversal from the entry.
    pub fn insert_before<S: Stage + 'static>(
        &mut self,
        anchor: StageId,
        stage: S,
    ) -> Result<StageId, LinkError> {
        self.check(anchor)?;
        if self.entry == Some(anchor) {
            return Ok(self.prepend(stage));
        }
        let order = self.order();
        let pos = order
            .iter()
            .position(|&s| s == anchor)
            .ok_or(LinkError::Unreachable(anchor))?;
        // pos > 0: the entry case returned above.
        let predecessor = order[pos - 1];
        let id = self.add(stage);
        self.links[id.index].next = Some(anchor);
        self.links[predecessor.index].next = Some(id);
        Ok(id)
    }

    /// Run `ctx` through the chain starting at the entry stage.
    pub fn process(&self, ctx: &mut RequestContext) -> Result<(), ChainError> {
        let entry = self.entry.ok_or(ChainError::NoEntryStage)?;
        self.process_from(entry, ctx)
    }

    /// Run `ctx` through the chain starting at `start`.
    ///
    /// Each stage runs at most once, in link order. The first error stops
    /// the traversal and is returned unchanged.
    pub fn process_from(&self, start: StageId, ctx: &mut RequestContext) -> Result<(), ChainError> {
        self.check(start)?;
        let span = tracing::info_span!("chain", request_id = %ctx.id());
        let _guard = span.enter();

        let mut cursor = Some(start);
        let mut executed = 0usize;
        while let Some(id) = cursor {
            let link = &self.links[id.index];
            let name = link.stage.name();
            ctx.record_visit(name);
            debug!(stage = name, position = executed, "Entering stage");

            if let Err(err) = link.stage.process(ctx) {
                warn!(stage = name, reason = err.label(), error = %err, "Chain halted");
                metrics::record_stage_halted(name, err.label());
                metrics::record_invocation("halted");
                return Err(err);
            }

            metrics::record_stage_executed(name);
            executed += 1;
            cursor = link.next;
        }

        info!(stages = executed, "Chain completed");
        metrics::record_invocation("completed");
        Ok(())
    }

    fn check(&self, id: StageId) -> Result<(), LinkError> {
        if id.chain == self.id && id.index < self.links.len() {
            Ok(())
        } else {
            Err(LinkError::UnknownStage(id))
        }
    }

    /// Follows links from `start`. Terminates because links stay acyclic.
    fn walk(&self, start: StageId) -> impl Iterator<Item = StageId> + '_ {
        std::iter::successors(Some(start), move |id| self.links[id.index].next)
    }
}

impl fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerChain")
            .field("stages", &self.links.len())
            .field("entry", &self.entry)
            .field("order", &self.stage_names())
            .finish()
    }
}
