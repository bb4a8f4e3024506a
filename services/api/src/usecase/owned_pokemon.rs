use pokedex_auth_types::caller::Caller;

use crate::domain::repository::{OwnedPokemonRepository, TypeRepository, UserRepository};
use crate::domain::types::{NewOwnedPokemon, OwnedPokemon, OwnedPokemonChanges, OwnedPokemonFilter};
use crate::error::PokedexError;
use crate::usecase::access::{load_caller, require_staff};
use crate::usecase::{optional_text, required_text};

/// Client-supplied attributes. Ownership is never part of the input.
#[derive(Debug, Default)]
pub struct OwnedPokemonInput {
    pub species_code: Option<String>,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub in_battle_team: Option<bool>,
    pub favorite: Option<bool>,
    pub type_ids: Option<Vec<i32>>,
}

/// Blank image URLs mean "no image".
fn normalize_image_url(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_owned()).filter(|u| !u.is_empty())
}

/// Deduplicate `ids` and require every one of them to exist in the catalog.
async fn resolve_type_ids<T: TypeRepository>(
    types: &T,
    mut ids: Vec<i32>,
) -> Result<Vec<i32>, PokedexError> {
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(ids);
    }
    let found = types.find_by_ids(&ids).await?;
    let missing: Vec<i32> = ids
        .iter()
        .copied()
        .filter(|id| !found.iter().any(|t| t.id == *id))
        .collect();
    if !missing.is_empty() {
        return Err(PokedexError::InvalidData(format!(
            "unknown type ids: {missing:?}"
        )));
    }
    Ok(ids)
}

/// Fetch a record the caller owns. Someone else's record reads as missing.
async fn find_owned<R: OwnedPokemonRepository>(
    repo: &R,
    owner_id: i32,
    id: i32,
) -> Result<OwnedPokemon, PokedexError> {
    repo.find_by_id(id)
        .await?
        .filter(|p| p.owner_id == owner_id)
        .ok_or(PokedexError::PokemonNotFound)
}

// ── ListOwnedPokemon ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct OwnedPokemonQuery {
    /// List every owner's records (staff only).
    pub all_owners: bool,
    pub species_code: Option<String>,
    pub in_battle_team: Option<bool>,
    pub favorite: Option<bool>,
}

pub struct ListOwnedPokemonUseCase<R: OwnedPokemonRepository, U: UserRepository> {
    pub repo: R,
    pub users: U,
}

impl<R: OwnedPokemonRepository, U: UserRepository> ListOwnedPokemonUseCase<R, U> {
    pub async fn execute(
        &self,
        caller: Caller,
        query: OwnedPokemonQuery,
    ) -> Result<Vec<OwnedPokemon>, PokedexError> {
        let owner_id = if query.all_owners {
            require_staff(&self.users, caller).await?;
            None
        } else {
            Some(load_caller(&self.users, caller).await?.id)
        };
        let filter = OwnedPokemonFilter {
            owner_id,
            species_code: query
                .species_code
                .map(|c| c.trim().to_owned())
                .filter(|c| !c.is_empty()),
            in_battle_team: query.in_battle_team,
            favorite: query.favorite,
        };
        self.repo.list(&filter).await
    }
}

// ── GetOwnedPokemon ──────────────────────────────────────────────────────────

pub struct GetOwnedPokemonUseCase<R: OwnedPokemonRepository, U: UserRepository> {
    pub repo: R,
    pub users: U,
}

impl<R: OwnedPokemonRepository, U: UserRepository> GetOwnedPokemonUseCase<R, U> {
    pub async fn execute(&self, caller: Caller, id: i32) -> Result<OwnedPokemon, PokedexError> {
        let owner = load_caller(&self.users, caller).await?;
        find_owned(&self.repo, owner.id, id).await
    }
}

// ── CreateOwnedPokemon ───────────────────────────────────────────────────────

pub struct CreateOwnedPokemonUseCase<
    R: OwnedPokemonRepository,
    T: TypeRepository,
    U: UserRepository,
> {
    pub repo: R,
    pub types: T,
    pub users: U,
}

impl<R: OwnedPokemonRepository, T: TypeRepository, U: UserRepository>
    CreateOwnedPokemonUseCase<R, T, U>
{
    pub async fn execute(
        &self,
        caller: Caller,
        input: OwnedPokemonInput,
    ) -> Result<OwnedPokemon, PokedexError> {
        let owner = load_caller(&self.users, caller).await?;
        let species_code = required_text(input.species_code)?;
        let name = required_text(input.name)?;
        let type_ids = resolve_type_ids(&self.types, input.type_ids.unwrap_or_default()).await?;

        let created = self
            .repo
            .create(NewOwnedPokemon {
                owner_id: owner.id,
                species_code,
                name,
                image_url: normalize_image_url(input.image_url),
                in_battle_team: input.in_battle_team.unwrap_or(false),
                favorite: input.favorite.unwrap_or(false),
                type_ids,
            })
            .await?;
        tracing::info!(
            owner_id = created.owner_id,
            pokemon_id = created.id,
            in_battle_team = created.in_battle_team,
            "owned pokemon created"
        );
        Ok(created)
    }
}

// ── UpdateOwnedPokemon ───────────────────────────────────────────────────────

pub struct UpdateOwnedPokemonUseCase<
    R: OwnedPokemonRepository,
    T: TypeRepository,
    U: UserRepository,
> {
    pub repo: R,
    pub types: T,
    pub users: U,
}

impl<R: OwnedPokemonRepository, T: TypeRepository, U: UserRepository>
    UpdateOwnedPokemonUseCase<R, T, U>
{
    /// `full` is a PUT: omitted fields reset to their defaults.
    pub async fn execute(
        &self,
        caller: Caller,
        id: i32,
        input: OwnedPokemonInput,
        full: bool,
    ) -> Result<OwnedPokemon, PokedexError> {
        let owner = load_caller(&self.users, caller).await?;
        find_owned(&self.repo, owner.id, id).await?;

        let changes = if full {
            OwnedPokemonChanges {
                species_code: Some(required_text(input.species_code)?),
                name: Some(required_text(input.name)?),
                image_url: Some(normalize_image_url(input.image_url)),
                in_battle_team: Some(input.in_battle_team.unwrap_or(false)),
                favorite: Some(input.favorite.unwrap_or(false)),
                type_ids: Some(
                    resolve_type_ids(&self.types, input.type_ids.unwrap_or_default()).await?,
                ),
            }
        } else {
            let type_ids = match input.type_ids {
                Some(ids) => Some(resolve_type_ids(&self.types, ids).await?),
                None => None,
            };
            OwnedPokemonChanges {
                species_code: optional_text(input.species_code)?,
                name: optional_text(input.name)?,
                image_url: input.image_url.map(|u| normalize_image_url(Some(u))),
                in_battle_team: input.in_battle_team,
                favorite: input.favorite,
                type_ids,
            }
        };

        self.repo.update(id, changes).await
    }
}

// ── DeleteOwnedPokemon ───────────────────────────────────────────────────────

pub struct DeleteOwnedPokemonUseCase<R: OwnedPokemonRepository, U: UserRepository> {
    pub repo: R,
    pub users: U,
}

impl<R: OwnedPokemonRepository, U: UserRepository> DeleteOwnedPokemonUseCase<R, U> {
    pub async fn execute(&self, caller: Caller, id: i32) -> Result<(), PokedexError> {
        let owner = load_caller(&self.users, caller).await?;
        find_owned(&self.repo, owner.id, id).await?;
        if !self.repo.delete(id).await? {
            return Err(PokedexError::PokemonNotFound);
        }
        Ok(())
    }
}
