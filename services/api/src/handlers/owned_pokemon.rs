use axum::{
    Json,
    extract::{Path, RawQuery, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use pokedex_auth_types::caller::Caller;

use crate::domain::types::{OwnedPokemon, TypeDescriptor};
use crate::error::PokedexError;
use crate::handlers::parse_query;
use crate::state::AppState;
use crate::usecase::owned_pokemon::{
    CreateOwnedPokemonUseCase, DeleteOwnedPokemonUseCase, GetOwnedPokemonUseCase,
    ListOwnedPokemonUseCase, OwnedPokemonInput, OwnedPokemonQuery, UpdateOwnedPokemonUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct OwnedPokemonResponse {
    pub id: i32,
    pub owner_id: i32,
    pub species_code: String,
    pub name: String,
    pub image_url: Option<String>,
    pub in_battle_team: bool,
    pub favorite: bool,
    pub types: Vec<TypeDescriptor>,
}

impl From<OwnedPokemon> for OwnedPokemonResponse {
    fn from(p: OwnedPokemon) -> Self {
        Self {
            id: p.id,
            owner_id: p.owner_id,
            species_code: p.species_code,
            name: p.name,
            image_url: p.image_url,
            in_battle_team: p.in_battle_team,
            favorite: p.favorite,
            types: p.types,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

/// Create/update body. Unknown fields (an `owner` included) are ignored.
#[derive(Deserialize)]
pub struct OwnedPokemonRequest {
    #[serde(alias = "codigo")]
    pub species_code: Option<String>,
    #[serde(alias = "nome")]
    pub name: Option<String>,
    #[serde(alias = "imagemUrl")]
    pub image_url: Option<String>,
    #[serde(
        default,
        alias = "grupoBatalha",
        deserialize_with = "pokedex_domain::flag::deserialize_optional_flag"
    )]
    pub in_battle_team: Option<bool>,
    #[serde(
        default,
        alias = "favorito",
        deserialize_with = "pokedex_domain::flag::deserialize_optional_flag"
    )]
    pub favorite: Option<bool>,
    #[serde(alias = "tipos")]
    pub type_ids: Option<Vec<i32>>,
}

impl From<OwnedPokemonRequest> for OwnedPokemonInput {
    fn from(body: OwnedPokemonRequest) -> Self {
        Self {
            species_code: body.species_code,
            name: body.name,
            image_url: body.image_url,
            in_battle_team: body.in_battle_team,
            favorite: body.favorite,
            type_ids: body.type_ids,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct OwnedPokemonListQuery {
    /// `mine` (default) or `all`.
    pub scope: Option<String>,
    #[serde(alias = "codigo")]
    pub species_code: Option<String>,
    #[serde(
        default,
        alias = "grupoBatalha",
        deserialize_with = "pokedex_domain::flag::deserialize_optional_flag"
    )]
    pub in_battle_team: Option<bool>,
    #[serde(
        default,
        alias = "favorito",
        deserialize_with = "pokedex_domain::flag::deserialize_optional_flag"
    )]
    pub favorite: Option<bool>,
}

// ── GET /api/pokemon-usuario/ ────────────────────────────────────────────────

pub async fn list_owned_pokemon(
    caller: Caller,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<OwnedPokemonResponse>>, PokedexError> {
    let query: OwnedPokemonListQuery = parse_query(raw_query)?;
    let all_owners = match query.scope.as_deref() {
        None | Some("mine") => false,
        Some("all") => true,
        Some(other) => {
            return Err(PokedexError::InvalidData(format!(
                "scope must be `mine` or `all`, got {other:?}"
            )));
        }
    };

    let usecase = ListOwnedPokemonUseCase {
        repo: state.owned_pokemon_repo(),
        users: state.user_repo(),
    };
    let owned = usecase
        .execute(
            caller,
            OwnedPokemonQuery {
                all_owners,
                species_code: query.species_code,
                in_battle_team: query.in_battle_team,
                favorite: query.favorite,
            },
        )
        .await?;
    Ok(Json(owned.into_iter().map(Into::into).collect()))
}

// ── POST /api/pokemon-usuario/ ───────────────────────────────────────────────

pub async fn create_owned_pokemon(
    caller: Caller,
    State(state): State<AppState>,
    payload: Result<Json<OwnedPokemonRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OwnedPokemonResponse>), PokedexError> {
    let Json(body) = payload?;
    let usecase = CreateOwnedPokemonUseCase {
        repo: state.owned_pokemon_repo(),
        types: state.type_repo(),
        users: state.user_repo(),
    };
    let created = usecase.execute(caller, body.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

// ── GET /api/pokemon-usuario/{id}/ ───────────────────────────────────────────

pub async fn get_owned_pokemon(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OwnedPokemonResponse>, PokedexError> {
    let usecase = GetOwnedPokemonUseCase {
        repo: state.owned_pokemon_repo(),
        users: state.user_repo(),
    };
    Ok(Json(usecase.execute(caller, id).await?.into()))
}

// ── PUT|PATCH /api/pokemon-usuario/{id}/ ─────────────────────────────────────

async fn apply_owned_pokemon_update(
    caller: Caller,
    state: AppState,
    id: i32,
    payload: Result<Json<OwnedPokemonRequest>, JsonRejection>,
    full: bool,
) -> Result<Json<OwnedPokemonResponse>, PokedexError> {
    let Json(body) = payload?;
    let usecase = UpdateOwnedPokemonUseCase {
        repo: state.owned_pokemon_repo(),
        types: state.type_repo(),
        users: state.user_repo(),
    };
    let updated = usecase.execute(caller, id, body.into(), full).await?;
    Ok(Json(updated.into()))
}

pub async fn replace_owned_pokemon(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<OwnedPokemonRequest>, JsonRejection>,
) -> Result<Json<OwnedPokemonResponse>, PokedexError> {
    apply_owned_pokemon_update(caller, state, id, payload, true).await
}

pub async fn update_owned_pokemon(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<OwnedPokemonRequest>, JsonRejection>,
) -> Result<Json<OwnedPokemonResponse>, PokedexError> {
    apply_owned_pokemon_update(caller, state, id, payload, false).await
}

// ── DELETE /api/pokemon-usuario/{id}/ ────────────────────────────────────────

pub async fn delete_owned_pokemon(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, PokedexError> {
    let usecase = DeleteOwnedPokemonUseCase {
        repo: state.owned_pokemon_repo(),
        users: state.user_repo(),
    };
    usecase.execute(caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
