//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the gateway route identifiers are usable as URL path segments
//! - Validate value ranges (max_tokens > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RouterConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be a single path segment, got '{value}'")]
    NotPathSegment { field: &'static str, value: String },

    #[error("gateway.base_url '{0}' is not an http(s) URL")]
    InvalidBaseUrl(String),

    #[error("chat.max_tokens must be greater than zero")]
    ZeroMaxTokens,

    #[error("{field} '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let gateway = &config.gateway;

    check_segment("gateway.account_id", &gateway.account_id, &mut errors);
    check_segment("gateway.gateway_name", &gateway.gateway_name, &mut errors);
    check_segment("gateway.dynamic_route_name", &gateway.dynamic_route_name, &mut errors);

    match url::Url::parse(&gateway.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(gateway.base_url.clone())),
    }

    if config.chat.max_tokens == 0 {
        errors.push(ValidationError::ZeroMaxTokens);
    }

    check_address("listener.bind_address", &config.listener.bind_address, &mut errors);
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_segment(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Empty { field });
    } else if value.contains('/') || value.contains('?') || value.contains('#') {
        errors.push(ValidationError::NotPathSegment {
            field,
            value: value.to_string(),
        });
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
