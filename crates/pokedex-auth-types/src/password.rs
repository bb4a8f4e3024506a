//! Argon2id password hashing.

use anyhow::Context;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

fn argon() -> anyhow::Result<Argon2<'static>> {
    // ~19 MiB memory, 2 iterations, 1 lane
    let params = Params::new(19456, 2, 1, None).context("invalid argon2 params")?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash `password` into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Check `password` against a stored PHC string.
///
/// A malformed stored hash is an error; a mismatch is `Ok(false)`.
pub fn verify_password(phc: &str, password: &str) -> anyhow::Result<bool> {
    let parsed =
        PasswordHash::new(phc).map_err(|e| anyhow::anyhow!("malformed password hash: {e}"))?;
    Ok(argon()?
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
