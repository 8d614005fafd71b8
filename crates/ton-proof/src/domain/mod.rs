//! Domain layer: pure verification logic, no I/O.

pub mod address;
pub mod entities;
pub mod errors;
pub mod message;
pub mod session;
pub mod verify;

pub use address::TonAddress;
pub use errors::{ProofError, ValidationError};
