//! # Proof Verification Service
//!
//! Orchestrates a wallet-connect authentication attempt end to end:
//! structural validation, domain binding, challenge reconstruction,
//! Ed25519 verification, then the two persistence writes and session
//! issuance. Holds only immutable configuration and the store port; every
//! request is handled independently.

use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::domain::address::TonAddress;
use crate::domain::entities::{
    ClientMeta, ConnectAuthorization, ConnectRequest, ConnectionFields, ConnectionStatus,
    NewSession, ProofTimestamp,
};
use crate::domain::errors::{ProofError, ValidationError};
use crate::domain::message::{self, decode_base64_tolerant};
use crate::domain::session::generate_session_token;
use crate::domain::verify;
use crate::ports::outbound::{StoreError, WalletStore};

/// Default session lifetime: one day.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;

/// Immutable service configuration, constructed once at startup.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Lower-cased domain proofs must be bound to (the host component of
    /// the application's public connect manifest).
    pub expected_domain: String,
    /// Session lifetime in seconds.
    pub session_ttl_secs: u64,
}

impl VerifierConfig {
    /// Create a configuration. The expected domain is normalized to lower
    /// case here so every later comparison is a plain equality check.
    pub fn new(expected_domain: impl Into<String>, session_ttl_secs: u64) -> Self {
        Self {
            expected_domain: expected_domain.into().to_lowercase(),
            session_ttl_secs,
        }
    }
}

/// Everything that can go wrong while handling a connect request. The
/// transport layer maps each arm to its HTTP shape; `Proof` always
/// renders as the same generic message.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Structural or domain-binding failure; message is caller-facing.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Proof rejected. The inner variant is for logs only.
    #[error("ton-proof verification failed")]
    Proof(#[from] ProofError),

    /// Persistence failed after a cryptographically valid proof.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The verification core. Stateless across requests.
pub struct ProofVerificationService {
    config: VerifierConfig,
    store: Arc<dyn WalletStore>,
}

/// Borrowed view of a structurally complete request.
struct ProofInput<'a> {
    tenant_id: &'a str,
    user_id: Option<&'a str>,
    address: &'a str,
    public_key: &'a str,
    wallet_app_name: Option<&'a str>,
    device_info: Option<&'a str>,
    domain_value: &'a str,
    domain_length_bytes: u32,
    payload: &'a str,
    signature: &'a str,
    timestamp: &'a ProofTimestamp,
}

impl ProofVerificationService {
    /// Create the service with its immutable configuration and store port.
    pub fn new(config: VerifierConfig, store: Arc<dyn WalletStore>) -> Self {
        Self { config, store }
    }

    /// The configured expected proof domain (lower-cased).
    pub fn expected_domain(&self) -> &str {
        &self.config.expected_domain
    }

    /// Handle one wallet-connect authentication attempt.
    ///
    /// On any failure path nothing is persisted, with one deliberate
    /// exception: if the session insert fails after a successful
    /// connection upsert, the upsert stays committed (the two writes are
    /// independent store calls; callers retry the whole flow).
    pub async fn handle_connect(
        &self,
        request: &ConnectRequest,
        client: &ClientMeta,
    ) -> Result<ConnectAuthorization, ConnectError> {
        let input = validate_structure(request)?;

        // Domain binding, case-insensitive.
        if input.domain_value.to_lowercase() != self.config.expected_domain {
            warn!(
                expected = %self.config.expected_domain,
                received = %input.domain_value,
                "rejected proof for foreign domain"
            );
            return Err(ValidationError::DomainMismatch {
                expected: self.config.expected_domain.clone(),
                received: input.domain_value.to_string(),
            }
            .into());
        }

        let proof_issued_at = self.verify_proof(&input).map_err(|e| {
            warn!(tenant = %input.tenant_id, address = %input.address, error = %e,
                  "ton-proof rejected");
            e
        })?;

        debug!(tenant = %input.tenant_id, address = %input.address, "ton-proof verified");
        self.issue_session(&input, proof_issued_at, client).await
    }

    /// Steps 2–11 of the scheme: reconstruct the challenge and check the
    /// signature. Returns the proof-issued instant on success.
    fn verify_proof(&self, input: &ProofInput<'_>) -> Result<DateTime<Utc>, ProofError> {
        let address = TonAddress::parse(input.address)?;
        let timestamp = input.timestamp.as_unix_seconds()?;
        let proof_issued_at = DateTime::<Utc>::from_timestamp(
            i64::try_from(timestamp).map_err(|_| ProofError::InvalidTimestamp)?,
            0,
        )
        .ok_or(ProofError::InvalidTimestamp)?;

        let payload = decode_base64_tolerant(input.payload, "payload")?;
        let digest = message::hash_to_sign(
            &address,
            input.domain_value,
            input.domain_length_bytes,
            timestamp,
            &payload,
        )?;

        verify::verify_signature(input.public_key, input.signature, &digest)?;
        Ok(proof_issued_at)
    }

    /// Persist the verified connection, then mint and persist a session.
    async fn issue_session(
        &self,
        input: &ProofInput<'_>,
        proof_issued_at: DateTime<Utc>,
        client: &ClientMeta,
    ) -> Result<ConnectAuthorization, ConnectError> {
        let now = Utc::now();

        let fields = ConnectionFields {
            user_id: input.user_id.map(str::to_owned),
            public_key: input.public_key.to_owned(),
            wallet_app_name: input.wallet_app_name.map(str::to_owned),
            device_info: input.device_info.map(str::to_owned),
            status: ConnectionStatus::Verified,
            proof_payload: input.payload.to_owned(),
            proof_signature: input.signature.to_owned(),
            proof_issued_at,
            proof_verified_at: now,
            updated_at: now,
        };

        let connection_id = self
            .store
            .upsert_connection(input.tenant_id, input.address, fields)
            .await
            .map_err(|e| {
                error!(tenant = %input.tenant_id, address = %input.address, error = %e,
                       "connection upsert failed");
                e
            })?;

        let token = generate_session_token();
        let expires_at = now + ChronoDuration::seconds(self.config.session_ttl_secs as i64);

        let session = self
            .store
            .insert_session(NewSession {
                connection_id,
                token: token.clone(),
                expires_at,
                last_activity_at: now,
                ip: client.ip.clone(),
                user_agent: client.user_agent.clone(),
            })
            .await
            .map_err(|e| {
                // Connection row is already committed at this point; the
                // caller retries the whole flow.
                error!(connection_id = %connection_id, error = %e, "session insert failed");
                e
            })?;

        Ok(ConnectAuthorization {
            connection_id,
            session_token: token,
            expires_at: session.expires_at,
        })
    }
}

/// Structural completeness check. Errors name the offending field using
/// its wire name.
fn validate_structure(request: &ConnectRequest) -> Result<ProofInput<'_>, ValidationError> {
    let tenant_id = required(&request.tenant_id, "companyId")?;
    let address = required(&request.address, "address")?;
    let public_key = required(&request.public_key, "publicKey")?;

    let proof = request
        .proof
        .as_ref()
        .ok_or(ValidationError::MissingField("proof"))?;
    let domain = proof
        .domain
        .as_ref()
        .ok_or(ValidationError::MissingField("proof.domain"))?;
    let domain_value = required(&domain.value, "proof.domain.value")?;
    let domain_length_bytes = domain
        .length_bytes
        .ok_or(ValidationError::MissingField("proof.domain.lengthBytes"))?;
    let payload = required(&proof.payload, "proof.payload")?;
    let signature = required(&proof.signature, "proof.signature")?;
    let timestamp = proof
        .timestamp
        .as_ref()
        .ok_or(ValidationError::MissingField("proof.timestamp"))?;

    Ok(ProofInput {
        tenant_id,
        user_id: non_empty(&request.user_id),
        address,
        public_key,
        wallet_app_name: non_empty(&request.wallet_app_name),
        device_info: non_empty(&request.device_info),
        domain_value,
        domain_length_bytes,
        payload,
        signature,
        timestamp,
    })
}

fn required<'a>(
    field: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, ValidationError> {
    match field.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(name)),
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.trim().is_empty())
}
