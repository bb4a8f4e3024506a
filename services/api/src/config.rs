use serde::Deserialize;

use pokedex_core::config::{Config, split_csv};

/// API service configuration loaded from environment variables.
///
/// Field names map to upper-cased env vars (`database_url` → `DATABASE_URL`).
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// Database connection URL.
    pub database_url: String,
    /// HMAC secret for access and refresh tokens.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 8000).
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// PokeAPI root, without trailing slash.
    #[serde(default = "default_pokeapi_base_url")]
    pub pokeapi_base_url: String,
    #[serde(default = "default_pokeapi_timeout_secs")]
    pub pokeapi_timeout_secs: u64,
    #[serde(default = "default_access_token_ttl_secs")]
    pub access_token_ttl_secs: u64,
    #[serde(default = "default_refresh_token_ttl_secs")]
    pub refresh_token_ttl_secs: u64,
    /// Comma-separated list of browser origins allowed by CORS.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: String,
    /// Whether `GET /api/usuarios/` answers without a bearer token.
    #[serde(default)]
    pub user_directory_public: bool,
}

impl Config for ApiConfig {}

impl ApiConfig {
    pub fn cors_origins(&self) -> Vec<String> {
        split_csv(&self.cors_allowed_origins)
    }
}

fn default_api_port() -> u16 {
    8000
}

fn default_pokeapi_base_url() -> String {
    "https://pokeapi.co/api/v2".to_owned()
}

fn default_pokeapi_timeout_secs() -> u64 {
    10
}

fn default_access_token_ttl_secs() -> u64 {
    pokedex_auth_types::token::ACCESS_TOKEN_TTL_SECS
}

fn default_refresh_token_ttl_secs() -> u64 {
    pokedex_auth_types::token::REFRESH_TOKEN_TTL_SECS
}

fn default_cors_allowed_origins() -> String {
    "http://localhost:4200,http://127.0.0.1:4200".to_owned()
}
