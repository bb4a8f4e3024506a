#![allow(async_fn_in_trait)]

use crate::domain::types::{
    GenerationPayload, NamedResourcePage, NewOwnedPokemon, NewUser, OwnedPokemon,
    OwnedPokemonChanges, OwnedPokemonFilter, SpeciesPayload, TypeDescriptor, TypePayload, User,
    UserChanges,
};
use crate::error::PokedexError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, PokedexError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, PokedexError>;
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, PokedexError>;

    /// Whether `login` or `email` already belongs to an account other than `except`.
    async fn is_taken(
        &self,
        login: Option<&str>,
        email: Option<&str>,
        except: Option<i32>,
    ) -> Result<bool, PokedexError>;

    /// Insert an account. A unique-constraint race surfaces as `UserAlreadyExists`.
    async fn create(&self, user: NewUser) -> Result<User, PokedexError>;

    /// Apply `changes` and return the updated account.
    async fn update(&self, id: i32, changes: UserChanges) -> Result<User, PokedexError>;

    /// Delete an account and, by cascade, its owned Pokémon. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, PokedexError>;
}

/// Repository for the type catalog.
pub trait TypeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<TypeDescriptor>, PokedexError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<TypeDescriptor>, PokedexError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<TypeDescriptor>, PokedexError>;
    async fn find_by_label(&self, label: &str) -> Result<Option<TypeDescriptor>, PokedexError>;
    async fn create(&self, label: &str) -> Result<TypeDescriptor, PokedexError>;
    async fn update(&self, id: i32, label: &str) -> Result<TypeDescriptor, PokedexError>;
    async fn delete(&self, id: i32) -> Result<bool, PokedexError>;
}

/// Repository for owned Pokémon.
///
/// `create` and `update` enforce the battle-team capacity atomically: the
/// owner's member count is read in the same transaction as the write, with the
/// owner row locked, and a full team fails with `BattleTeamFull` without
/// persisting anything.
pub trait OwnedPokemonRepository: Send + Sync {
    async fn list(&self, filter: &OwnedPokemonFilter) -> Result<Vec<OwnedPokemon>, PokedexError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<OwnedPokemon>, PokedexError>;
    async fn create(&self, pokemon: NewOwnedPokemon) -> Result<OwnedPokemon, PokedexError>;
    async fn update(
        &self,
        id: i32,
        changes: OwnedPokemonChanges,
    ) -> Result<OwnedPokemon, PokedexError>;
    async fn delete(&self, id: i32) -> Result<bool, PokedexError>;
}

/// Read-only PokeAPI port.
///
/// A 404 from upstream is `UpstreamNotFound`; every other failure (transport,
/// timeout, non-2xx, undecodable body) is `Upstream`.
pub trait PokeApiPort: Send + Sync {
    async fn species(&self, code: &str) -> Result<SpeciesPayload, PokedexError>;
    async fn species_page(&self, offset: u32, limit: u32)
    -> Result<NamedResourcePage, PokedexError>;
    async fn types(&self) -> Result<NamedResourcePage, PokedexError>;
    async fn generations(&self, limit: u32) -> Result<NamedResourcePage, PokedexError>;
    async fn generation(&self, id: u32) -> Result<GenerationPayload, PokedexError>;
    async fn type_members(&self, id: u32) -> Result<TypePayload, PokedexError>;
}
