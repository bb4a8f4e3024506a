use std::time::Duration;

use sea_orm::Database;
use tracing::info;

use pokedex_api::config::ApiConfig;
use pokedex_api::infra::pokeapi::HttpPokeApi;
use pokedex_api::router::build_router;
use pokedex_api::state::AppState;
use pokedex_api_migration::{Migrator, MigratorTrait};
use pokedex_auth_types::caller::JwtSecret;
use pokedex_core::config::Config;
use pokedex_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("failed to apply migrations");

    let pokeapi = HttpPokeApi::new(
        &config.pokeapi_base_url,
        Duration::from_secs(config.pokeapi_timeout_secs),
    )
    .expect("failed to build pokeapi client");

    let state = AppState {
        db,
        pokeapi,
        jwt_secret: JwtSecret::new(config.jwt_secret.as_str()),
        access_token_ttl_secs: config.access_token_ttl_secs,
        refresh_token_ttl_secs: config.refresh_token_ttl_secs,
        user_directory_public: config.user_directory_public,
    };

    let router = build_router(state, &config.cors_origins());
    let http_addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!(pokeapi = %config.pokeapi_base_url, "pokedex api listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
