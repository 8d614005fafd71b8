//! Adapters layer: concrete implementations of the store port.

pub mod memory;
pub mod rest;

pub use memory::MemoryWalletStore;
pub use rest::RestWalletStore;
