//! # Ed25519 Signature Verification
//!
//! Verifies the wallet's signature over the reconstructed challenge
//! digest. Key and signature material arrive as text (hex / base64) and
//! every decode failure maps to its own tagged error variant.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use super::errors::ProofError;
use super::message::decode_base64_tolerant;

/// Decode a hex-encoded 32-byte Ed25519 public key.
pub fn decode_public_key(public_key_hex: &str) -> Result<VerifyingKey, ProofError> {
    let bytes = hex::decode(public_key_hex.trim()).map_err(|_| ProofError::HexDecode)?;

    let key_bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|_| ProofError::InvalidPublicKey)?;

    VerifyingKey::from_bytes(&key_bytes).map_err(|_| ProofError::InvalidPublicKey)
}

/// Verify a base64-encoded signature over `hash_to_sign` with the given key.
pub fn verify_signature(
    public_key_hex: &str,
    signature_b64: &str,
    hash_to_sign: &[u8; 32],
) -> Result<(), ProofError> {
    let verifying_key = decode_public_key(public_key_hex)?;

    let sig_bytes = decode_base64_tolerant(signature_b64, "signature")?;
    let signature =
        Signature::from_slice(&sig_bytes).map_err(|_| ProofError::MalformedSignature)?;

    verifying_key
        .verify(hash_to_sign, &signature)
        .map_err(|_| ProofError::SignatureInvalid)
}
