//! Ordered handler chain for in-process request processing.
//!
//! A [`HandlerChain`] runs a [`RequestContext`] through linked stages. Each
//! stage either forwards the context or halts the chain with a
//! [`ChainError`]. Links can be rewritten between invocations to splice
//! stages in without touching existing ones.
//!
//! ```
//! use stage_chain::{ChainBuilder, RequestContext};
//! use stage_chain::stages::{Authenticator, Authorizer, Sanitizer};
//!
//! let mut chain = ChainBuilder::new()
//!     .stage(Authenticator::new("J.Bond - MySolidPassword", "007"))
//!     .stage(Authorizer::new(["007"]))
//!     .build();
//!
//! // Later, a new stage is introduced in front.
//! chain.prepend(Sanitizer::default());
//!
//! let mut ctx = RequestContext::new("J.Bond - MySolidPassword");
//! chain.process(&mut ctx).unwrap();
//! assert_eq!(ctx.visited(), ["sanitizer", "authenticator", "authorizer"]);
//! ```

pub mod chain;
pub mod config;
pub mod observability;
pub mod stages;

pub use chain::{ChainBuilder, ChainError, HandlerChain, LinkError, RequestContext, Stage, StageId};
pub use config::ChainConfig;
