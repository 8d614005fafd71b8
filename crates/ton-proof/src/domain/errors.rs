//! # Verification Errors
//!
//! Error types for the proof verification pipeline.
//!
//! `ProofError` variants are internal: the HTTP layer collapses every one
//! of them into the same generic client-facing message so that a caller
//! cannot use error detail as an oracle while iterating on a forged
//! proof. The variant itself is what gets logged.

use thiserror::Error;

/// Structural and binding failures detected before any cryptography runs.
///
/// These are safe to echo back to the caller verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required request field is absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The proof was signed for a different domain than this service
    /// verifies for. Both values are exposed to aid integration debugging;
    /// neither is secret.
    #[error("proof domain mismatch: expected \"{expected}\", received \"{received}\"")]
    DomainMismatch {
        /// Domain this service is configured to accept.
        expected: String,
        /// Domain the wallet actually signed against.
        received: String,
    },
}

/// Failures inside the challenge reconstruction / signature pipeline.
///
/// Any of these means the proof is rejected; none of them is ever shown
/// to the caller in detail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProofError {
    /// Address is not `<workchain-int>:<64-hex-chars>`.
    #[error("malformed wallet address: {0}")]
    MalformedAddress(String),

    /// Declared domain byte length disagrees with the encoded UTF-8 length.
    #[error("domain length mismatch: declared {declared}, actual {actual}")]
    DomainLengthMismatch {
        /// Length the wallet claimed to have signed.
        declared: u32,
        /// Real UTF-8 byte length of the domain value.
        actual: u32,
    },

    /// Proof timestamp is not a non-negative integer that fits u64.
    #[error("proof timestamp is not a valid unsigned integer")]
    InvalidTimestamp,

    /// Payload or signature is not decodable base64.
    #[error("invalid base64 in {0}")]
    Base64Decode(&'static str),

    /// Public key is not valid hex.
    #[error("invalid hex in public key")]
    HexDecode,

    /// Public key bytes do not form a valid Ed25519 point.
    #[error("invalid Ed25519 public key")]
    InvalidPublicKey,

    /// Signature bytes are not 64 bytes long.
    #[error("malformed signature")]
    MalformedSignature,

    /// The signature does not verify over the reconstructed challenge.
    #[error("signature verification failed")]
    SignatureInvalid,
}
