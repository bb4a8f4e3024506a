use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;

use pokedex_auth_types::caller::Caller;

use crate::domain::types::TypeDescriptor;
use crate::error::PokedexError;
use crate::state::AppState;
use crate::usecase::type_catalog::{
    CreateTypeDescriptorUseCase, DeleteTypeDescriptorUseCase, GetTypeDescriptorUseCase,
    ListTypeDescriptorsUseCase, UpdateTypeDescriptorUseCase,
};

#[derive(Deserialize)]
pub struct TypeDescriptorRequest {
    #[serde(alias = "descricao")]
    pub label: Option<String>,
}

// ── GET /api/tipo-pokemon/ ───────────────────────────────────────────────────

pub async fn list_type_descriptors(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<Vec<TypeDescriptor>>, PokedexError> {
    let usecase = ListTypeDescriptorsUseCase {
        repo: state.type_repo(),
        users: state.user_repo(),
    };
    Ok(Json(usecase.execute(caller).await?))
}

// ── POST /api/tipo-pokemon/ ──────────────────────────────────────────────────

pub async fn create_type(
    caller: Caller,
    State(state): State<AppState>,
    payload: Result<Json<TypeDescriptorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TypeDescriptor>), PokedexError> {
    let Json(body) = payload?;
    let usecase = CreateTypeDescriptorUseCase {
        repo: state.type_repo(),
        users: state.user_repo(),
    };
    let created = usecase.execute(caller, body.label).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// ── GET /api/tipo-pokemon/{id}/ ──────────────────────────────────────────────

pub async fn get_type(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TypeDescriptor>, PokedexError> {
    let usecase = GetTypeDescriptorUseCase {
        repo: state.type_repo(),
        users: state.user_repo(),
    };
    Ok(Json(usecase.execute(caller, id).await?))
}

// ── PUT|PATCH /api/tipo-pokemon/{id}/ ────────────────────────────────────────

pub async fn replace_type(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<TypeDescriptorRequest>, JsonRejection>,
) -> Result<Json<TypeDescriptor>, PokedexError> {
    let Json(body) = payload?;
    let usecase = UpdateTypeDescriptorUseCase {
        repo: state.type_repo(),
        users: state.user_repo(),
    };
    Ok(Json(usecase.execute(caller, id, body.label, true).await?))
}

pub async fn update_type(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<TypeDescriptorRequest>, JsonRejection>,
) -> Result<Json<TypeDescriptor>, PokedexError> {
    let Json(body) = payload?;
    let usecase = UpdateTypeDescriptorUseCase {
        repo: state.type_repo(),
        users: state.user_repo(),
    };
    Ok(Json(usecase.execute(caller, id, body.label, false).await?))
}

// ── DELETE /api/tipo-pokemon/{id}/ ───────────────────────────────────────────

pub async fn delete_type(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, PokedexError> {
    let usecase = DeleteTypeDescriptorUseCase {
        repo: state.type_repo(),
        users: state.user_repo(),
    };
    usecase.execute(caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
