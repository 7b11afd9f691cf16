//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (classify)
//!     → Return: Asset | Chat | MethodNotAllowed | NotFound
//! ```
//!
//! # Design Decisions
//! - Routes are fixed at compile time, immutable at runtime
//! - Prefix and exact matching only, no regex
//! - Deterministic: same input always yields the same disposition

pub mod router;

pub use router::{classify, Disposition, API_PREFIX, CHAT_PATH};
