use std::collections::HashSet;

use futures::future::join_all;
use serde::Serialize;

use pokedex_domain::pagination::OffsetPage;

use crate::domain::repository::PokeApiPort;
use crate::domain::types::{IdName, IdNameUrl, SpeciesDetail, generation_label, id_from_resource_url};
use crate::error::PokedexError;

/// Number of generations fetched for the generation picker.
pub const GENERATION_LIMIT: u32 = 10;

/// Parse a numeric upstream id from a query parameter.
pub fn parse_upstream_id(value: Option<&str>) -> Result<u32, PokedexError> {
    let value = value.map(str::trim).filter(|v| !v.is_empty());
    let value = value.ok_or(PokedexError::MissingData)?;
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PokedexError::InvalidData(format!(
            "id must be numeric, got {value:?}"
        )));
    }
    value
        .parse()
        .map_err(|_| PokedexError::InvalidData(format!("id out of range: {value}")))
}

// ── GetSpecies ───────────────────────────────────────────────────────────────

pub struct GetSpeciesUseCase<P: PokeApiPort> {
    pub api: P,
}

impl<P: PokeApiPort> GetSpeciesUseCase<P> {
    pub async fn execute(&self, code: &str) -> Result<SpeciesDetail, PokedexError> {
        fetch_species(&self.api, code).await
    }
}

async fn fetch_species<P: PokeApiPort>(api: &P, code: &str) -> Result<SpeciesDetail, PokedexError> {
    let code = code.trim().to_lowercase();
    if code.is_empty() {
        return Err(PokedexError::MissingData);
    }
    // Only slugs and numeric ids reach the upstream path.
    if !code.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Err(PokedexError::InvalidData(format!("invalid species code: {code}")));
    }
    match api.species(&code).await {
        Ok(payload) => Ok(payload.into()),
        Err(PokedexError::UpstreamNotFound) => Err(PokedexError::SpeciesNotFound),
        Err(e) => Err(e),
    }
}

// ── SearchByName ─────────────────────────────────────────────────────────────

pub struct SearchByNameUseCase<P: PokeApiPort> {
    pub api: P,
}

impl<P: PokeApiPort> SearchByNameUseCase<P> {
    pub async fn execute(&self, name: Option<&str>) -> Result<SpeciesDetail, PokedexError> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let name = name.ok_or(PokedexError::MissingData)?;
        fetch_species(&self.api, name).await
    }
}

// ── ListSpecies ──────────────────────────────────────────────────────────────

/// A page of species with details resolved. `skipped` counts entries whose
/// detail fetch failed and were left out of `results`.
#[derive(Debug, Serialize)]
pub struct SpeciesListing {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<SpeciesDetail>,
    pub skipped: u32,
}

pub struct ListSpeciesUseCase<P: PokeApiPort> {
    pub api: P,
}

impl<P: PokeApiPort> ListSpeciesUseCase<P> {
    pub async fn execute(&self, page: OffsetPage) -> Result<SpeciesListing, PokedexError> {
        let page = page.clamped();
        let listing = self.api.species_page(page.offset, page.limit).await?;

        let details = join_all(
            listing
                .results
                .iter()
                .map(|entry| self.api.species(&entry.name)),
        )
        .await;

        let mut results = Vec::with_capacity(details.len());
        let mut skipped = 0;
        for (entry, detail) in listing.results.iter().zip(details) {
            match detail {
                Ok(payload) => results.push(SpeciesDetail::from(payload)),
                Err(e) => {
                    tracing::warn!(species = %entry.name, error = %e, "species detail fetch failed, skipping");
                    skipped += 1;
                }
            }
        }

        Ok(SpeciesListing {
            count: listing.count,
            next: listing.next,
            previous: listing.previous,
            results,
            skipped,
        })
    }
}

// ── ListTypes ────────────────────────────────────────────────────────────────

pub struct ListUpstreamTypesUseCase<P: PokeApiPort> {
    pub api: P,
}

impl<P: PokeApiPort> ListUpstreamTypesUseCase<P> {
    pub async fn execute(&self) -> Result<Vec<IdName>, PokedexError> {
        let listing = self.api.types().await?;
        Ok(listing
            .results
            .iter()
            .filter_map(|r| r.to_id_name())
            .collect())
    }
}

// ── ListGenerations ──────────────────────────────────────────────────────────

pub struct ListGenerationsUseCase<P: PokeApiPort> {
    pub api: P,
}

impl<P: PokeApiPort> ListGenerationsUseCase<P> {
    pub async fn execute(&self) -> Result<Vec<IdName>, PokedexError> {
        let listing = self.api.generations(GENERATION_LIMIT).await?;
        Ok(listing
            .results
            .iter()
            .take(GENERATION_LIMIT as usize)
            .filter_map(|r| {
                Some(IdName {
                    id: id_from_resource_url(&r.url)?,
                    name: generation_label(&r.name),
                })
            })
            .collect())
    }
}

// ── ListByGeneration ─────────────────────────────────────────────────────────

pub struct ListByGenerationUseCase<P: PokeApiPort> {
    pub api: P,
}

impl<P: PokeApiPort> ListByGenerationUseCase<P> {
    pub async fn execute(&self, generation_id: Option<&str>) -> Result<Vec<IdName>, PokedexError> {
        let id = parse_upstream_id(generation_id)?;
        let generation = self.api.generation(id).await?;
        Ok(generation
            .pokemon_species
            .iter()
            .filter_map(|r| r.to_id_name())
            .collect())
    }
}

// ── ListByType ───────────────────────────────────────────────────────────────

pub struct ListByTypeUseCase<P: PokeApiPort> {
    pub api: P,
}

impl<P: PokeApiPort> ListByTypeUseCase<P> {
    pub async fn execute(&self, type_id: Option<&str>) -> Result<Vec<IdName>, PokedexError> {
        let id = parse_upstream_id(type_id)?;
        let members = self.api.type_members(id).await?;
        Ok(members
            .pokemon
            .iter()
            .filter_map(|slot| slot.pokemon.to_id_name())
            .collect())
    }
}

// ── ListByGenerationAndType ──────────────────────────────────────────────────

pub struct ListByGenerationAndTypeUseCase<P: PokeApiPort> {
    pub api: P,
}

impl<P: PokeApiPort> ListByGenerationAndTypeUseCase<P> {
    /// Species present in both the generation and the type, in generation
    /// order, carrying the generation's id and url.
    pub async fn execute(
        &self,
        generation_id: Option<&str>,
        type_id: Option<&str>,
    ) -> Result<Vec<IdNameUrl>, PokedexError> {
        let generation_id = parse_upstream_id(generation_id)?;
        let type_id = parse_upstream_id(type_id)?;

        let (generation, members) = futures::try_join!(
            self.api.generation(generation_id),
            self.api.type_members(type_id),
        )?;

        let of_type: HashSet<&str> = members
            .pokemon
            .iter()
            .map(|slot| slot.pokemon.name.as_str())
            .collect();

        Ok(generation
            .pokemon_species
            .into_iter()
            .filter(|species| of_type.contains(species.name.as_str()))
            .filter_map(|species| {
                Some(IdNameUrl {
                    id: id_from_resource_url(&species.url)?,
                    name: species.name,
                    url: species.url,
                })
            })
            .collect())
    }
}
