//! # TON Address Parsing
//!
//! Raw chain-native addresses of the form `<workchain>:<hash>`, where the
//! workchain is a signed 32-bit integer (`0` basechain, `-1` masterchain)
//! and the hash is exactly 64 hex characters (32 bytes).

use super::errors::ProofError;

/// A parsed raw TON address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TonAddress {
    /// Signed workchain identifier.
    pub workchain: i32,
    /// 32-byte account hash.
    pub hash: [u8; 32],
}

impl TonAddress {
    /// Parse a `workchain:hash` string.
    ///
    /// Rejects anything where the workchain segment does not parse as an
    /// integer or the hash segment is not exactly 64 hex characters.
    pub fn parse(raw: &str) -> Result<Self, ProofError> {
        let (wc, hash_hex) = raw
            .split_once(':')
            .ok_or_else(|| ProofError::MalformedAddress("expected workchain:hash".into()))?;

        let workchain: i32 = wc
            .parse()
            .map_err(|_| ProofError::MalformedAddress(format!("bad workchain segment: {wc}")))?;

        if hash_hex.len() != 64 {
            return Err(ProofError::MalformedAddress(format!(
                "hash must be 64 hex chars, got {}",
                hash_hex.len()
            )));
        }

        let bytes = hex::decode(hash_hex)
            .map_err(|_| ProofError::MalformedAddress("hash is not valid hex".into()))?;

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes);

        Ok(Self { workchain, hash })
    }

    /// Wire encoding used inside the signed challenge: big-endian 4-byte
    /// signed workchain followed by the 32 raw hash bytes.
    pub fn to_bytes(&self) -> [u8; 36] {
        let mut out = [0u8; 36];
        out[..4].copy_from_slice(&self.workchain.to_be_bytes());
        out[4..].copy_from_slice(&self.hash);
        out
    }
}
