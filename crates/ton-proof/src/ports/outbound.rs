//! # Outbound Ports (Driven Ports / SPI)
//!
//! The persistence collaborator this core requires. Exactly two
//! operations: an idempotent connection upsert and a session insert.
//! Everything else about the backing store (schema ownership, row-level
//! policies, session lifecycle) belongs to the collaborator.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{ConnectionFields, NewSession, SessionRecord};

/// Error from wallet store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or the request failed in transit.
    #[error("store request failed: {0}")]
    Request(String),

    /// The store answered but the response could not be interpreted.
    #[error("store response malformed: {0}")]
    Decode(String),

    /// The store rejected the write.
    #[error("store rejected write (status {status}): {body}")]
    Rejected {
        /// HTTP-ish status code from the store.
        status: u16,
        /// Raw error body, logged server-side only.
        body: String,
    },
}

/// Gateway to the wallet connection / session store.
///
/// Implementations must be thread-safe (`Send + Sync`). The upsert must
/// resolve conflicts atomically on `(tenant_id, address)` at the storage
/// layer; callers do no application-level locking.
#[async_trait::async_trait]
pub trait WalletStore: Send + Sync {
    /// Insert or refresh the connection row for `(tenant_id, address)`
    /// and return its identifier. Never creates a duplicate row for the
    /// same pair.
    async fn upsert_connection(
        &self,
        tenant_id: &str,
        address: &str,
        fields: ConnectionFields,
    ) -> Result<Uuid, StoreError>;

    /// Insert a fresh session row. Called at most once per verification,
    /// and only after the connection upsert succeeded.
    async fn insert_session(&self, session: NewSession) -> Result<SessionRecord, StoreError>;
}
