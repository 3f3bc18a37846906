//! Password hashing
//!
//! Passwords are stored as Argon2id PHC strings; the salt and parameters
//! travel inside the hash, so verification needs nothing else.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{MaintenanceError, MaintenanceResult};

/// Well-formed Argon2id hash with default parameters that no password matches
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hash a plaintext password
pub fn hash_password(password: &str) -> MaintenanceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| MaintenanceError::Credential(e.to_string()))
}

/// Check a plaintext password against a stored hash
///
/// A malformed stored hash is an error; a mismatch is `Ok(false)`.
pub fn verify_password(password: &str, stored_hash: &str) -> MaintenanceResult<bool> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| MaintenanceError::Credential(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Spend one full verification on a login id with no account behind it
pub fn verify_dummy_password(password: &str) {
    let _ = verify_password(password, DUMMY_HASH);
}
