use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use pokedex_domain::team::BATTLE_TEAM_LIMIT;

/// API service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum PokedexError {
    #[error("missing data")]
    MissingData,
    #[error("{0}")]
    InvalidData(String),
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("type already exists")]
    TypeAlreadyExists,
    #[error("user not found")]
    UserNotFound,
    #[error("type not found")]
    TypeNotFound,
    #[error("pokemon not found")]
    PokemonNotFound,
    #[error("species not found")]
    SpeciesNotFound,
    #[error("upstream resource not found")]
    UpstreamNotFound,
    #[error(
        "battle team is full: at most {} pokemon can be in the battle team",
        BATTLE_TEAM_LIMIT
    )]
    BattleTeamFull,
    #[error("forbidden")]
    Forbidden,
    #[error("{0}")]
    Upstream(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PokedexError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingData => "MISSING_DATA",
            Self::InvalidData(_) => "INVALID_DATA",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::TypeAlreadyExists => "TYPE_ALREADY_EXISTS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TypeNotFound => "TYPE_NOT_FOUND",
            Self::PokemonNotFound => "POKEMON_NOT_FOUND",
            Self::SpeciesNotFound => "SPECIES_NOT_FOUND",
            Self::UpstreamNotFound => "UPSTREAM_NOT_FOUND",
            Self::BattleTeamFull => "BATTLE_TEAM_FULL",
            Self::Forbidden => "FORBIDDEN",
            Self::Upstream(_) => "UPSTREAM_ERROR",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingData | Self::InvalidData(_) | Self::Upstream(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::UserAlreadyExists | Self::TypeAlreadyExists => StatusCode::CONFLICT,
            Self::UserNotFound
            | Self::TypeNotFound
            | Self::PokemonNotFound
            | Self::SpeciesNotFound
            | Self::UpstreamNotFound => StatusCode::NOT_FOUND,
            Self::BattleTeamFull | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidCredentials | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for PokedexError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidData(rejection.body_text())
    }
}

impl IntoResponse for PokedexError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are already recorded by the trace layer; only 500s carry a cause worth logging.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = match &self {
            // Gateway clients read upstream failures from `error`.
            Self::Upstream(message) => serde_json::json!({
                "kind": self.kind(),
                "error": message,
            }),
            _ => serde_json::json!({
                "kind": self.kind(),
                "message": self.to_string(),
            }),
        };
        (status, axum::Json(body)).into_response()
    }
}
