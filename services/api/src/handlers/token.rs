use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};

use crate::error::PokedexError;
use crate::state::AppState;
use crate::usecase::token::{LoginUseCase, RefreshUseCase};

#[derive(Deserialize)]
pub struct TokenRequest {
    pub login: Option<String>,
    #[serde(alias = "senha")]
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

#[derive(Serialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

// ── POST /api/token/ ─────────────────────────────────────────────────────────

pub async fn create_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenPairResponse>, PokedexError> {
    let Json(body) = payload?;
    let uc = LoginUseCase {
        repo: state.user_repo(),
        settings: state.token_settings(),
    };
    let pair = uc.execute(body.login, body.password).await?;
    Ok(Json(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

// ── POST /api/token/refresh/ ─────────────────────────────────────────────────

pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<AccessTokenResponse>, PokedexError> {
    let Json(body) = payload?;
    let uc = RefreshUseCase {
        repo: state.user_repo(),
        settings: state.token_settings(),
    };
    let access = uc.execute(body.refresh).await?;
    Ok(Json(AccessTokenResponse { access }))
}
