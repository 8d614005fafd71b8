//! # REST Wallet Store
//!
//! `WalletStore` implementation against a PostgREST-style relational API
//! using a privileged service key. The connection upsert maps to a single
//! insert with `on_conflict` + `resolution=merge-duplicates`, so conflict
//! resolution on `(company_id, wallet_address)` happens atomically at the
//! storage layer. All requests carry a bounded timeout so a slow store
//! cannot hang connect attempts indefinitely.

use std::time::Duration;

use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::{ConnectionFields, NewSession, SessionRecord};
use crate::ports::outbound::{StoreError, WalletStore};

/// Per-request timeout against the store.
const STORE_TIMEOUT: Duration = Duration::from_secs(5);

const CONNECTIONS_TABLE: &str = "wallet_connections";
const SESSIONS_TABLE: &str = "wallet_sessions";

/// REST client for the wallet connection / session tables.
pub struct RestWalletStore {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl RestWalletStore {
    /// Create a store client. `base_url` is the API root (no trailing
    /// slash required); `service_key` is the privileged credential.
    pub fn new(base_url: &str, service_key: &str) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(STORE_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            service_key: service_key.to_owned(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn post_returning<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        prefer: &str,
        body: serde_json::Value,
    ) -> Result<T, StoreError> {
        let response = self
            .http
            .post(url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", prefer)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

/// Row shape of a connection upsert, using the store's column names.
pub(crate) fn connection_row(
    tenant_id: &str,
    address: &str,
    fields: &ConnectionFields,
) -> serde_json::Value {
    serde_json::json!({
        "company_id": tenant_id,
        "wallet_address": address,
        "user_id": fields.user_id,
        "public_key": fields.public_key,
        "wallet_app_name": fields.wallet_app_name,
        "device_info": fields.device_info,
        "status": fields.status,
        "last_proof_payload": fields.proof_payload,
        "last_proof_signature": fields.proof_signature,
        "proof_issued_at": fields.proof_issued_at,
        "proof_verified_at": fields.proof_verified_at,
        "updated_at": fields.updated_at,
    })
}

/// Row shape of a session insert.
pub(crate) fn session_row(session: &NewSession) -> serde_json::Value {
    serde_json::json!({
        "connection_id": session.connection_id,
        "session_token": session.token,
        "expires_at": session.expires_at,
        "last_activity_at": session.last_activity_at,
        "ip_address": session.ip,
        "user_agent": session.user_agent,
    })
}

#[derive(Deserialize)]
struct IdRow {
    id: Uuid,
}

#[derive(Deserialize)]
struct SessionRow {
    id: Uuid,
    connection_id: Uuid,
    session_token: String,
    expires_at: chrono::DateTime<chrono::Utc>,
}

#[async_trait::async_trait]
impl WalletStore for RestWalletStore {
    async fn upsert_connection(
        &self,
        tenant_id: &str,
        address: &str,
        fields: ConnectionFields,
    ) -> Result<Uuid, StoreError> {
        let url = format!(
            "{}?on_conflict=company_id,wallet_address",
            self.table_url(CONNECTIONS_TABLE)
        );

        let rows: Vec<IdRow> = self
            .post_returning(
                url,
                "resolution=merge-duplicates,return=representation",
                connection_row(tenant_id, address, &fields),
            )
            .await?;

        rows.first()
            .map(|row| row.id)
            .ok_or_else(|| StoreError::Decode("upsert returned no representation".into()))
    }

    async fn insert_session(&self, session: NewSession) -> Result<SessionRecord, StoreError> {
        let rows: Vec<SessionRow> = self
            .post_returning(
                self.table_url(SESSIONS_TABLE),
                "return=representation",
                session_row(&session),
            )
            .await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no representation".into()))?;

        Ok(SessionRecord {
            id: row.id,
            connection_id: row.connection_id,
            token: row.session_token,
            expires_at: row.expires_at,
        })
    }
}
