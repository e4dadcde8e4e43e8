//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HandlerChain::process
//!     → logging.rs (span per invocation carrying the request id,
//!                   events per stage and on halt/completion)
//!     → metrics.rs (counters per stage and per invocation)
//! ```

pub mod logging;
pub mod metrics;
