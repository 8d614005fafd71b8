//! # In-Memory Wallet Store
//!
//! A `WalletStore` backed by process-local maps. Used by tests to assert
//! exact persistence effects (call counts, single-row upsert semantics,
//! the accepted session-insert non-atomicity) without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use uuid::Uuid;

use crate::domain::entities::{ConnectionFields, NewSession, SessionRecord};
use crate::ports::outbound::{StoreError, WalletStore};

/// In-memory store with call accounting and failure injection.
#[derive(Default)]
pub struct MemoryWalletStore {
    connections: Mutex<HashMap<(String, String), (Uuid, ConnectionFields)>>,
    sessions: Mutex<Vec<(Uuid, NewSession)>>,
    upserts: AtomicUsize,
    inserts: AtomicUsize,
    fail_next_session: AtomicBool,
}

impl MemoryWalletStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct connection rows.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Number of session rows.
    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Look up a connection row by its natural key.
    pub fn connection(&self, tenant_id: &str, address: &str) -> Option<(Uuid, ConnectionFields)> {
        self.connections
            .lock()
            .get(&(tenant_id.to_owned(), address.to_owned()))
            .cloned()
    }

    /// The most recently inserted session, if any.
    pub fn last_session(&self) -> Option<NewSession> {
        self.sessions.lock().last().map(|(_, s)| s.clone())
    }

    /// All session tokens, insertion order.
    pub fn session_tokens(&self) -> Vec<String> {
        self.sessions
            .lock()
            .iter()
            .map(|(_, s)| s.token.clone())
            .collect()
    }

    /// How many times `upsert_connection` was called.
    pub fn upsert_calls(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    /// How many times `insert_session` was called.
    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    /// Make the next `insert_session` call fail once.
    pub fn fail_next_session_insert(&self) {
        self.fail_next_session.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl WalletStore for MemoryWalletStore {
    async fn upsert_connection(
        &self,
        tenant_id: &str,
        address: &str,
        fields: ConnectionFields,
    ) -> Result<Uuid, StoreError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);

        let key = (tenant_id.to_owned(), address.to_owned());
        let mut connections = self.connections.lock();
        let id = match connections.get(&key) {
            Some((existing, _)) => *existing,
            None => Uuid::new_v4(),
        };
        connections.insert(key, (id, fields));
        Ok(id)
    }

    async fn insert_session(&self, session: NewSession) -> Result<SessionRecord, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);

        if self.fail_next_session.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Rejected {
                status: 503,
                body: "injected session insert failure".into(),
            });
        }

        let record = SessionRecord {
            id: Uuid::new_v4(),
            connection_id: session.connection_id,
            token: session.token.clone(),
            expires_at: session.expires_at,
        };
        self.sessions.lock().push((record.id, session));
        Ok(record)
    }
}
