//! Built-in stages.
//!
//! # Typical Order
//! ```text
//! sanitizer → authenticator → authorizer
//! ```
//! `cancellation` can sit anywhere; it halts once its flag is set.

pub mod authenticator;
pub mod authorizer;
pub mod cancellation;
pub mod sanitizer;

pub use authenticator::Authenticator;
pub use authorizer::Authorizer;
pub use cancellation::{CancelFlag, CancellationGuard};
pub use sanitizer::Sanitizer;
