//! # Challenge Reconstruction
//!
//! Rebuilds the exact byte sequence a wallet signs under the TON Connect
//! "ton-proof" v2 scheme and derives the 32-byte digest the Ed25519
//! signature covers:
//!
//! ```text
//! message      = "ton-proof-item-v2/" ‖ address ‖ domain ‖ timestamp ‖ payload
//! full_message = 0xFF 0xFF ‖ "ton-connect" ‖ SHA-256(message)
//! hash_to_sign = SHA-256(full_message)
//! ```
//!
//! The pipeline is pure and deterministic: identical inputs always yield a
//! byte-identical digest.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use super::address::TonAddress;
use super::errors::ProofError;

/// Item prefix of the ton-proof v2 scheme.
const PROOF_PREFIX: &[u8] = b"ton-proof-item-v2/";

/// Envelope tag separating ton-connect signatures from other TON message
/// kinds signed with the same key.
const FULL_MESSAGE_PREFIX: &[u8] = &[0xFF, 0xFF];
const FULL_MESSAGE_TAG: &[u8] = b"ton-connect";

/// Derive the digest the wallet's Ed25519 signature must cover.
///
/// `declared_domain_len` is the `domain.lengthBytes` value from the proof;
/// it must equal the real UTF-8 byte length of `domain` or the proof is
/// rejected before any hashing takes place.
pub fn hash_to_sign(
    address: &TonAddress,
    domain: &str,
    declared_domain_len: u32,
    timestamp: u64,
    payload: &[u8],
) -> Result<[u8; 32], ProofError> {
    let domain_bytes = domain.as_bytes();
    let actual_len = domain_bytes.len() as u32;
    if actual_len != declared_domain_len {
        return Err(ProofError::DomainLengthMismatch {
            declared: declared_domain_len,
            actual: actual_len,
        });
    }

    let mut message = Vec::with_capacity(
        PROOF_PREFIX.len() + 36 + 4 + domain_bytes.len() + 8 + payload.len(),
    );
    message.extend_from_slice(PROOF_PREFIX);
    message.extend_from_slice(&address.to_bytes());
    message.extend_from_slice(&actual_len.to_le_bytes());
    message.extend_from_slice(domain_bytes);
    message.extend_from_slice(&timestamp.to_le_bytes());
    message.extend_from_slice(payload);

    let message_hash: [u8; 32] = Sha256::digest(&message).into();

    let mut full_message =
        Vec::with_capacity(FULL_MESSAGE_PREFIX.len() + FULL_MESSAGE_TAG.len() + 32);
    full_message.extend_from_slice(FULL_MESSAGE_PREFIX);
    full_message.extend_from_slice(FULL_MESSAGE_TAG);
    full_message.extend_from_slice(&message_hash);

    Ok(Sha256::digest(&full_message).into())
}

/// Decode a base64 blob, tolerating both the URL-safe and the standard
/// alphabet and missing `=` padding.
pub fn decode_base64_tolerant(input: &str, field: &'static str) -> Result<Vec<u8>, ProofError> {
    let mut normalized: String = input
        .trim()
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    while !normalized.is_empty() && normalized.ends_with('=') {
        normalized.pop();
    }
    while normalized.len() % 4 != 0 {
        normalized.push('=');
    }

    BASE64_STANDARD
        .decode(normalized)
        .map_err(|_| ProofError::Base64Decode(field))
}
