use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use pokedex_auth_types::caller::JwtSecret;

use crate::infra::db::{DbOwnedPokemonRepository, DbTypeRepository, DbUserRepository};
use crate::infra::pokeapi::HttpPokeApi;
use crate::usecase::token::TokenSettings;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub pokeapi: HttpPokeApi,
    pub jwt_secret: JwtSecret,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
    /// Serve `GET /api/usuarios/` without a bearer token.
    pub user_directory_public: bool,
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn type_repo(&self) -> DbTypeRepository {
        DbTypeRepository {
            db: self.db.clone(),
        }
    }

    pub fn owned_pokemon_repo(&self) -> DbOwnedPokemonRepository {
        DbOwnedPokemonRepository {
            db: self.db.clone(),
        }
    }

    pub fn pokeapi(&self) -> HttpPokeApi {
        self.pokeapi.clone()
    }

    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            secret: self.jwt_secret.0.to_string(),
            access_ttl_secs: self.access_token_ttl_secs,
            refresh_ttl_secs: self.refresh_token_ttl_secs,
        }
    }
}
