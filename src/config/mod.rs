//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → handed by value to HttpServer / Forwarder at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Secrets come from the environment and are redacted in Debug output
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{
    AssetsConfig, ChatConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, RouterConfig,
};
pub use validation::{validate_config, ValidationError};
