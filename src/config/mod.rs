//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ChainConfig (validated)
//!     → assembly.rs (stages built and linked in configured order)
//!     → HandlerChain
//! ```
//!
//! All fields have defaults; an empty file yields the
//! sanitizer → authenticator → authorizer chain.

pub mod assembly;
pub mod loader;
pub mod schema;
pub mod validation;

pub use assembly::{assemble, build_stage, AssembledChain};
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AuthenticatorConfig, AuthorizerConfig, ChainConfig, ObservabilityConfig, PipelineConfig,
    SanitizerConfig, StageKind,
};
pub use validation::{validate_config, ValidationError};
