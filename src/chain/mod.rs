//! Handler chain core.
//!
//! # Data Flow
//! ```text
//! caller builds RequestContext
//!     → HandlerChain::process (entry stage)
//!         → stage.process(&mut ctx)
//!             Ok  → follow successor link
//!             Err → halt, return error to caller
//!     → Ok(()) once the terminal stage accepts
//! ```
//!
//! # Invariants
//! - Links are acyclic; `set_next` refuses a link that closes a loop
//! - A stage never runs after an earlier stage failed in the same invocation
//! - Links cannot change while `process` holds the chain

pub mod builder;
pub mod context;
pub mod error;
pub mod handler;
pub mod stage;

pub use builder::ChainBuilder;
pub use context::{JournalEntry, RequestContext, RequestId};
pub use error::{ChainError, LinkError};
pub use handler::{HandlerChain, StageId};
pub use stage::{FnStage, Outcome, Stage};
