use std::time::Duration;

use anyhow::Context as _;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::repository::PokeApiPort;
use crate::domain::types::{GenerationPayload, NamedResourcePage, SpeciesPayload, TypePayload};
use crate::error::PokedexError;

/// PokeAPI client over a shared `reqwest` connection pool.
#[derive(Clone)]
pub struct HttpPokeApi {
    pub client: Client,
    /// API root without trailing slash, e.g. `https://pokeapi.co/api/v2`.
    pub base_url: String,
}

impl HttpPokeApi {
    /// Build a client whose every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokedex-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build pokeapi http client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PokedexError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, timeout = e.is_timeout(), "pokeapi request failed");
            PokedexError::Upstream(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PokedexError::UpstreamNotFound);
        }
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "pokeapi returned an error status");
            return Err(PokedexError::Upstream(format!(
                "upstream responded with status {status}"
            )));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "pokeapi body could not be decoded");
            PokedexError::Upstream(format!("invalid upstream response: {e}"))
        })
    }
}

impl PokeApiPort for HttpPokeApi {
    async fn species(&self, code: &str) -> Result<SpeciesPayload, PokedexError> {
        self.get_json(&format!("pokemon/{code}")).await
    }

    async fn species_page(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<NamedResourcePage, PokedexError> {
        self.get_json(&format!("pokemon?offset={offset}&limit={limit}"))
            .await
    }

    async fn types(&self) -> Result<NamedResourcePage, PokedexError> {
        self.get_json("type").await
    }

    async fn generations(&self, limit: u32) -> Result<NamedResourcePage, PokedexError> {
        self.get_json(&format!("generation?limit={limit}")).await
    }

    async fn generation(&self, id: u32) -> Result<GenerationPayload, PokedexError> {
        self.get_json(&format!("generation/{id}")).await
    }

    async fn type_members(&self, id: u32) -> Result<TypePayload, PokedexError> {
        self.get_json(&format!("type/{id}")).await
    }
}
