pub mod access;
pub mod owned_pokemon;
pub mod species;
pub mod token;
pub mod type_catalog;
pub mod user;

use anyhow::Context as _;

use pokedex_auth_types::password::{hash_password, verify_password};

use crate::error::PokedexError;

/// Trim a required text field; absent or blank is `MissingData`.
pub(crate) fn required_text(value: Option<String>) -> Result<String, PokedexError> {
    optional_text(value)?.ok_or(PokedexError::MissingData)
}

/// Trim an optional text field; present but blank is `MissingData`.
pub(crate) fn optional_text(value: Option<String>) -> Result<Option<String>, PokedexError> {
    match value {
        None => Ok(None),
        Some(v) => {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                Err(PokedexError::MissingData)
            } else {
                Ok(Some(trimmed.to_owned()))
            }
        }
    }
}

/// Accept a credential verbatim; absent or whitespace-only is `MissingData`.
pub(crate) fn required_secret(value: Option<String>) -> Result<String, PokedexError> {
    optional_secret(value)?.ok_or(PokedexError::MissingData)
}

/// Optional credential, never trimmed; present but whitespace-only is `MissingData`.
pub(crate) fn optional_secret(value: Option<String>) -> Result<Option<String>, PokedexError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(PokedexError::MissingData),
        other => Ok(other),
    }
}

/// Argon2 hashing off the async workers.
pub(crate) async fn hash_secret(password: String) -> Result<String, PokedexError> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("join password hashing task")??;
    Ok(hash)
}

/// Argon2 verification off the async workers.
pub(crate) async fn verify_secret(phc: String, password: String) -> Result<bool, PokedexError> {
    let ok = tokio::task::spawn_blocking(move || verify_password(&phc, &password))
        .await
        .context("join password verification task")??;
    Ok(ok)
}
