//! Chat conversation model.
//!
//! # Design Decisions
//! - Malformed input is recovered locally as an empty conversation
//! - Message elements are kept as raw JSON and forwarded verbatim
//! - Every conversation sent upstream starts with a system message when the
//!   caller supplied none

pub mod message;

pub use message::{ChatMessage, ConversationRequest, Role};
