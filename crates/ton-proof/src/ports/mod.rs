//! Ports layer: traits this subsystem depends on.

pub mod outbound;

pub use outbound::{StoreError, WalletStore};
