use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use serde::{Deserialize, Serialize};

use pokedex_domain::pagination::OffsetPage;

use crate::domain::types::{IdName, IdNameUrl, SpeciesDetail};
use crate::error::PokedexError;
use crate::handlers::parse_query;
use crate::state::AppState;
use crate::usecase::species::{
    GetSpeciesUseCase, ListByGenerationAndTypeUseCase, ListByGenerationUseCase, ListByTypeUseCase,
    ListGenerationsUseCase, ListSpeciesUseCase, ListUpstreamTypesUseCase, SearchByNameUseCase,
    SpeciesListing,
};

#[derive(Serialize)]
pub struct TypesResponse {
    pub tipos: Vec<IdName>,
}

#[derive(Serialize)]
pub struct GenerationsResponse {
    pub generations: Vec<IdName>,
}

#[derive(Serialize)]
pub struct ResultsResponse<T> {
    pub results: Vec<T>,
}

#[derive(Deserialize, Default)]
pub struct NameQuery {
    pub name: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct IdQuery {
    pub id: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct CombinedQuery {
    pub gen_id: Option<String>,
    pub type_id: Option<String>,
}

// ── GET /api/pokemon/{code}/ ─────────────────────────────────────────────────

pub async fn get_species(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<SpeciesDetail>, PokedexError> {
    let usecase = GetSpeciesUseCase {
        api: state.pokeapi(),
    };
    Ok(Json(usecase.execute(&code).await?))
}

// ── GET /api/pokemon/?offset&limit ───────────────────────────────────────────

pub async fn list_species(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<SpeciesListing>, PokedexError> {
    let page: OffsetPage = parse_query(raw_query)?;
    let usecase = ListSpeciesUseCase {
        api: state.pokeapi(),
    };
    Ok(Json(usecase.execute(page).await?))
}

// ── GET /api/pokemon/types/ ──────────────────────────────────────────────────

pub async fn list_types(State(state): State<AppState>) -> Result<Json<TypesResponse>, PokedexError> {
    let usecase = ListUpstreamTypesUseCase {
        api: state.pokeapi(),
    };
    Ok(Json(TypesResponse {
        tipos: usecase.execute().await?,
    }))
}

// ── GET /api/pokemon/search-name/?name= ──────────────────────────────────────

pub async fn search_by_name(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<SpeciesDetail>, PokedexError> {
    let query: NameQuery = parse_query(raw_query)?;
    let usecase = SearchByNameUseCase {
        api: state.pokeapi(),
    };
    Ok(Json(usecase.execute(query.name.as_deref()).await?))
}

// ── GET /api/pokemon/generations/ ────────────────────────────────────────────

pub async fn list_generations(
    State(state): State<AppState>,
) -> Result<Json<GenerationsResponse>, PokedexError> {
    let usecase = ListGenerationsUseCase {
        api: state.pokeapi(),
    };
    Ok(Json(GenerationsResponse {
        generations: usecase.execute().await?,
    }))
}

// ── GET /api/pokemon/filter-generation/?id= ──────────────────────────────────

pub async fn filter_generation(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<ResultsResponse<IdName>>, PokedexError> {
    let query: IdQuery = parse_query(raw_query)?;
    let usecase = ListByGenerationUseCase {
        api: state.pokeapi(),
    };
    Ok(Json(ResultsResponse {
        results: usecase.execute(query.id.as_deref()).await?,
    }))
}

// ── GET /api/pokemon/filter-type/?id= ────────────────────────────────────────

pub async fn filter_type(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<ResultsResponse<IdName>>, PokedexError> {
    let query: IdQuery = parse_query(raw_query)?;
    let usecase = ListByTypeUseCase {
        api: state.pokeapi(),
    };
    Ok(Json(ResultsResponse {
        results: usecase.execute(query.id.as_deref()).await?,
    }))
}

// ── GET /api/pokemon/filter-combined/?gen_id=&type_id= ───────────────────────

pub async fn filter_combined(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<ResultsResponse<IdNameUrl>>, PokedexError> {
    let query: CombinedQuery = parse_query(raw_query)?;
    let usecase = ListByGenerationAndTypeUseCase {
        api: state.pokeapi(),
    };
    let results = usecase
        .execute(query.gen_id.as_deref(), query.type_id.as_deref())
        .await?;
    Ok(Json(ResultsResponse { results }))
}
