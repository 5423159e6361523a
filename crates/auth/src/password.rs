use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

/// Failure of the hashing primitive itself.
///
/// A wrong password is *not* an error; [`verify_password`] answers that with
/// `Ok(false)`. This fires only for RNG failure or a stored hash that cannot
/// be parsed, and callers must surface it as an internal fault rather than
/// as a credential mismatch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("salt generation failed: {0}")]
    Rng(String),

    #[error("password hash failure: {0}")]
    Hash(String),
}

/// Hash a plaintext password into a PHC string with a fresh random salt.
pub fn hash_password(plain: &str) -> Result<String, CredentialError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| CredentialError::Rng(e.to_string()))?;
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| CredentialError::Hash(e.to_string()))?;
    let hashed = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| CredentialError::Hash(e.to_string()))?;
    Ok(hashed.to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// The comparison runs inside the Argon2 primitive, so timing does not leak
/// which byte diverged. Mismatch is `Ok(false)`; an unparseable stored hash
/// is an error.
pub fn verify_password(plain: &str, stored_phc: &str) -> Result<bool, CredentialError> {
    let parsed = PasswordHash::new(stored_phc).map_err(|e| CredentialError::Hash(e.to_string()))?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CredentialError::Hash(e.to_string())),
    }
}
