pub mod health;
pub mod owned_pokemon;
pub mod pokemon;
pub mod token;
pub mod type_catalog;
pub mod user;

use serde::de::DeserializeOwned;

use crate::error::PokedexError;

/// Parse a raw query string with `serde_qs`; an absent query is `T::default()`.
pub(crate) fn parse_query<T: DeserializeOwned + Default>(
    raw_query: Option<String>,
) -> Result<T, PokedexError> {
    raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|e| PokedexError::InvalidData(format!("invalid query: {e}")))
        .map(Option::unwrap_or_default)
}
