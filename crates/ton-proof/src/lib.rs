//! # TON Connect Proof Verification Core
//!
//! Validates a wallet's proof-of-ownership ("ton-proof") and issues an
//! authenticated session on success.
//!
//! ## Components
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `domain` | Address parsing, challenge reconstruction, Ed25519 verification, session tokens |
//! | `ports` | Outbound `WalletStore` trait (persistence collaborator) |
//! | `adapters` | REST store client and in-memory store for tests |
//! | `service` | Request validation, domain binding, verification, persistence orchestration |
//!
//! ## Security Properties
//!
//! - Domain-separated challenge: proofs signed for one host never verify
//!   against another.
//! - Length-prefix integrity: the declared domain byte length must match
//!   the encoded length before any hashing happens.
//! - Single collapsed failure message at the HTTP edge; the tagged error
//!   variant is only ever logged server-side.
//! - Session tokens come from the OS CSPRNG, 32 bytes, fresh per call.

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::entities::{ClientMeta, ConnectAuthorization, ConnectRequest, TonProof};
pub use domain::errors::{ProofError, ValidationError};
pub use ports::outbound::{StoreError, WalletStore};
pub use service::{ConnectError, ProofVerificationService, VerifierConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
