use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use pokedex_auth_types::caller::Caller;

use crate::domain::types::User;
use crate::error::PokedexError;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase,
    UpdateUserInput, UpdateUserUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Public view of a user. The password hash never leaves the service.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub login: String,
    pub email: String,
    pub is_active: bool,
    pub is_staff: bool,
    #[serde(serialize_with = "pokedex_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "pokedex_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            login: user.login,
            email: user.email,
            is_active: user.is_active,
            is_staff: user.is_staff,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── POST /api/usuarios/ ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    #[serde(alias = "nome")]
    pub name: Option<String>,
    pub login: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "senha")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "pokedex_domain::flag::deserialize_optional_flag")]
    pub is_staff: Option<bool>,
}

pub async fn create_user(
    caller: Option<Caller>,
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), PokedexError> {
    let Json(body) = payload?;
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            caller,
            CreateUserInput {
                name: body.name,
                login: body.login,
                email: body.email,
                password: body.password,
                is_staff: body.is_staff.unwrap_or(false),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /api/usuarios/ ───────────────────────────────────────────────────────

pub async fn list_users(
    caller: Option<Caller>,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, PokedexError> {
    if caller.is_none() && !state.user_directory_public {
        return Err(PokedexError::InvalidToken);
    }
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute(caller).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── GET /api/usuarios/{id}/ ──────────────────────────────────────────────────

pub async fn get_user(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, PokedexError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    Ok(Json(usecase.execute(caller, id).await?.into()))
}

// ── PUT|PATCH /api/usuarios/{id}/ ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    #[serde(alias = "nome")]
    pub name: Option<String>,
    pub login: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "senha")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "pokedex_domain::flag::deserialize_optional_flag")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "pokedex_domain::flag::deserialize_optional_flag")]
    pub is_staff: Option<bool>,
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(body: UpdateUserRequest) -> Self {
        Self {
            name: body.name,
            login: body.login,
            email: body.email,
            password: body.password,
            is_active: body.is_active,
            is_staff: body.is_staff,
        }
    }
}

async fn apply_user_update(
    caller: Caller,
    state: AppState,
    id: i32,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
    full: bool,
) -> Result<Json<UserResponse>, PokedexError> {
    let Json(body) = payload?;
    let usecase = UpdateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(caller, id, body.into(), full).await?;
    Ok(Json(user.into()))
}

pub async fn replace_user(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, PokedexError> {
    apply_user_update(caller, state, id, payload, true).await
}

pub async fn update_user(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, PokedexError> {
    apply_user_update(caller, state, id, payload, false).await
}

// ── DELETE /api/usuarios/{id}/ ───────────────────────────────────────────────

pub async fn delete_user(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, PokedexError> {
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
