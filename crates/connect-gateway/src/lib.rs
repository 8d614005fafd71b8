//! # Connect Gateway
//!
//! HTTP transport for the TON Connect proof verification core: a single
//! POST verification endpoint plus challenge issuance and a health probe.
//!
//! The gateway owns environment configuration, error-to-status mapping,
//! and request metadata capture (client IP, user agent). All verification
//! semantics live in the `ton-proof` crate.

#![warn(clippy::all)]

pub mod domain;
pub mod service;

pub use domain::config::GatewayConfig;
pub use domain::error::ApiError;
pub use service::build_router;
