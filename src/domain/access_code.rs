//! URL-safe random token generation for course access codes and
//! password-reset tokens.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngExt;

/// Raw entropy bytes in a course access code.
pub const ACCESS_CODE_BYTES: usize = 8;

/// Raw entropy bytes in a password-reset token.
pub const RESET_TOKEN_BYTES: usize = 32;

/// Generate a course access code. Uniqueness is not checked; collision
/// probability at 8 bytes of entropy is negligible.
pub fn new_access_code() -> String {
    let bytes: [u8; ACCESS_CODE_BYTES] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Generate a password-reset token.
pub fn new_reset_token() -> String {
    let bytes: [u8; RESET_TOKEN_BYTES] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}
