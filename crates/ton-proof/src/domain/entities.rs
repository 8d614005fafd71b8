//! # Domain Entities
//!
//! Request, record, and result types for the proof verification flow.
//!
//! The inbound types deserialize straight from the wire (camelCase JSON,
//! `companyId` is the tenant identifier). Every field the service requires
//! is optional here: structural completeness is checked explicitly so a
//! missing field produces an error naming it, not a serde message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::ProofError;

/// Inbound wallet-connect authentication attempt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    /// Tenant (calling application) identifier. Wire name: `companyId`.
    #[serde(rename = "companyId")]
    pub tenant_id: Option<String>,
    /// Optional application user this wallet should be linked to.
    pub user_id: Option<String>,
    /// Raw wallet address, `workchain:hash`.
    pub address: Option<String>,
    /// Hex-encoded Ed25519 public key (32 bytes decoded).
    pub public_key: Option<String>,
    /// Free-text wallet application name.
    pub wallet_app_name: Option<String>,
    /// Free-text device descriptor.
    pub device_info: Option<String>,
    /// The signed proof itself.
    pub proof: Option<TonProof>,
}

/// The ton-proof object a wallet produces.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TonProof {
    /// Domain the wallet signed against.
    pub domain: Option<ProofDomain>,
    /// Server-issued challenge, base64 (either alphabet).
    pub payload: Option<String>,
    /// Base64-encoded raw Ed25519 signature bytes.
    pub signature: Option<String>,
    /// Unix seconds at signing time; wallets send strings or numbers.
    pub timestamp: Option<ProofTimestamp>,
}

/// Domain binding block of the proof.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofDomain {
    /// UTF-8 byte length the wallet included in its signed payload.
    pub length_bytes: Option<u32>,
    /// The domain string itself.
    pub value: Option<String>,
}

/// Proof timestamp as it appears on the wire: a JSON number or a numeric
/// string. Anything else fails as a proof error, not a transport error.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProofTimestamp {
    /// JSON number form.
    Number(serde_json::Number),
    /// Numeric string form.
    Text(String),
}

impl ProofTimestamp {
    /// Interpret as unix seconds. Must fit an unsigned 64-bit integer.
    pub fn as_unix_seconds(&self) -> Result<u64, ProofError> {
        match self {
            Self::Number(n) => n.as_u64().ok_or(ProofError::InvalidTimestamp),
            Self::Text(s) => s.trim().parse().map_err(|_| ProofError::InvalidTimestamp),
        }
    }
}

/// Connection status written by this core. `Verified` is the only value
/// the verification flow ever produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionStatus {
    /// Proof checked out; the wallet owner controls the key.
    Verified,
}

/// Field set written into a wallet connection row on successful
/// verification. A later verification for the same `(tenant, address)`
/// overwrites all of these.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionFields {
    /// Application user, if the caller supplied one.
    pub user_id: Option<String>,
    /// Hex public key the proof verified against.
    pub public_key: String,
    /// Wallet application name, verbatim from the request.
    pub wallet_app_name: Option<String>,
    /// Device descriptor, verbatim from the request.
    pub device_info: Option<String>,
    /// Always `Verified` from this core.
    pub status: ConnectionStatus,
    /// Last accepted proof payload (opaque base64 text).
    pub proof_payload: String,
    /// Last accepted proof signature (opaque base64 text).
    pub proof_signature: String,
    /// Instant the wallet produced the signature.
    pub proof_issued_at: DateTime<Utc>,
    /// Instant this service verified it.
    pub proof_verified_at: DateTime<Utc>,
    /// Row update instant.
    pub updated_at: DateTime<Utc>,
}

/// New session row handed to the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewSession {
    /// Owning connection.
    pub connection_id: Uuid,
    /// Opaque bearer token, fresh per call.
    pub token: String,
    /// `now + configured TTL`.
    pub expires_at: DateTime<Utc>,
    /// Creation instant.
    pub last_activity_at: DateTime<Utc>,
    /// Best-effort client address.
    pub ip: Option<String>,
    /// Best-effort client user agent.
    pub user_agent: Option<String>,
}

/// A persisted session row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Session identifier.
    pub id: Uuid,
    /// Owning connection.
    pub connection_id: Uuid,
    /// Bearer token.
    pub token: String,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

/// Successful verification result returned to the transport layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectAuthorization {
    /// Identifier of the (created or refreshed) connection row.
    pub connection_id: Uuid,
    /// Fresh bearer session token, URL-safe base64 without padding.
    pub session_token: String,
    /// Session expiry instant.
    pub expires_at: DateTime<Utc>,
}

/// Request metadata captured by the transport layer. Absence of either
/// field is never an error.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    /// Client IP, forwarded-for aware.
    pub ip: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
}
