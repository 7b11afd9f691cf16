//! Forwarding failure kinds.

use reqwest::StatusCode;
use thiserror::Error;

/// Why a chat request could not be relayed.
///
/// Carries full upstream detail for server-side logs; the HTTP boundary maps
/// each kind to a fixed, generic client response.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The gateway answered with a non-success status.
    #[error("gateway rejected request with status {status}")]
    Rejected { status: StatusCode, body: String },

    /// No HTTP response was obtained at all.
    #[error("gateway unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
}

impl ForwardError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::Rejected { .. } => "rejected",
            ForwardError::Unreachable(_) => "unreachable",
        }
    }
}
