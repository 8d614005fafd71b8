//! # Session Token Generation
//!
//! Bearer tokens for authenticated wallet sessions: 32 bytes from the OS
//! CSPRNG, URL-safe base64 without padding (43 characters). Never derived
//! from request data and never reused.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes behind each token.
const TOKEN_BYTES: usize = 32;

/// Generate a fresh session token.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
