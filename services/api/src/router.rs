use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use pokedex_core::error::not_found;
use pokedex_core::health::healthz;
use pokedex_core::middleware::{X_REQUEST_ID, propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    health::readyz,
    owned_pokemon::{
        create_owned_pokemon, delete_owned_pokemon, get_owned_pokemon, list_owned_pokemon,
        replace_owned_pokemon, update_owned_pokemon,
    },
    pokemon::{
        filter_combined, filter_generation, filter_type, get_species, list_generations,
        list_species, list_types, search_by_name,
    },
    token::{create_token, refresh_token},
    type_catalog::{
        create_type, delete_type, get_type, list_type_descriptors, replace_type, update_type,
    },
    user::{create_user, delete_user, get_user, list_users, replace_user, update_user},
};
use crate::state::AppState;

/// CORS for the browser frontend. Unparseable origins are dropped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([HeaderName::from_static(X_REQUEST_ID)])
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Token
        .route("/token/", post(create_token))
        .route("/token/refresh/", post(refresh_token))
        // Users
        .route("/usuarios/", get(list_users).post(create_user))
        .route(
            "/usuarios/{id}/",
            get(get_user)
                .put(replace_user)
                .patch(update_user)
                .delete(delete_user),
        )
        // Type catalog
        .route("/tipo-pokemon/", get(list_type_descriptors).post(create_type))
        .route(
            "/tipo-pokemon/{id}/",
            get(get_type)
                .put(replace_type)
                .patch(update_type)
                .delete(delete_type),
        )
        // Owned Pokémon
        .route(
            "/pokemon-usuario/",
            get(list_owned_pokemon).post(create_owned_pokemon),
        )
        .route(
            "/pokemon-usuario/{id}/",
            get(get_owned_pokemon)
                .put(replace_owned_pokemon)
                .patch(update_owned_pokemon)
                .delete(delete_owned_pokemon),
        )
        // Upstream gateway (static segments win over `{code}`)
        .route("/pokemon/", get(list_species))
        .route("/pokemon/types/", get(list_types))
        .route("/pokemon/search-name/", get(search_by_name))
        .route("/pokemon/generations/", get(list_generations))
        .route("/pokemon/filter-generation/", get(filter_generation))
        .route("/pokemon/filter-type/", get(filter_type))
        .route("/pokemon/filter-combined/", get(filter_combined))
        .route("/pokemon/{code}/", get(get_species))
}

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes())
        .fallback(not_found)
        .layer(cors_layer(cors_origins))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
