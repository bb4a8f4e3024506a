use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Identity ─────────────────────────────────────────────────────────────────

/// Registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub login: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account about to be inserted; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub login: String,
    pub email: String,
    pub password_hash: String,
    pub is_staff: bool,
}

/// Column-level changes for an account. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub login: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
}

// ── Type catalog ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    pub id: i32,
    pub label: String,
}

// ── Owned Pokémon ────────────────────────────────────────────────────────────

/// One Pokémon in a user's collection, with its type descriptors resolved.
#[derive(Debug, Clone)]
pub struct OwnedPokemon {
    pub id: i32,
    pub owner_id: i32,
    pub species_code: String,
    pub name: String,
    pub image_url: Option<String>,
    pub in_battle_team: bool,
    pub favorite: bool,
    pub types: Vec<TypeDescriptor>,
}

#[derive(Debug, Clone)]
pub struct NewOwnedPokemon {
    pub owner_id: i32,
    pub species_code: String,
    pub name: String,
    pub image_url: Option<String>,
    pub in_battle_team: bool,
    pub favorite: bool,
    pub type_ids: Vec<i32>,
}

/// Changes to an owned Pokémon. `image_url: Some(None)` clears the URL and
/// `type_ids: Some(..)` replaces the whole type set.
#[derive(Debug, Clone, Default)]
pub struct OwnedPokemonChanges {
    pub species_code: Option<String>,
    pub name: Option<String>,
    pub image_url: Option<Option<String>>,
    pub in_battle_team: Option<bool>,
    pub favorite: Option<bool>,
    pub type_ids: Option<Vec<i32>>,
}

/// Listing filter. `owner_id: None` lists every owner's records.
#[derive(Debug, Clone, Default)]
pub struct OwnedPokemonFilter {
    pub owner_id: Option<i32>,
    pub species_code: Option<String>,
    pub in_battle_team: Option<bool>,
    pub favorite: Option<bool>,
}

/// Whether a write moves a record into the battle team.
///
/// Only a transition from "not a member" to "member" consumes a slot; editing
/// a record that is already a member never trips the capacity check.
pub fn joins_battle_team(currently_member: bool, requested: Option<bool>) -> bool {
    requested == Some(true) && !currently_member
}

// ── Upstream payloads (PokeAPI) ──────────────────────────────────────────────

/// `{name, url}` reference used throughout PokeAPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Paginated list of references (`/pokemon`, `/type`, `/generation`).
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResourcePage {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesTypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

/// `/pokemon/{code}` payload, reduced to what gets reshaped.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesPayload {
    pub id: u32,
    pub name: String,
    pub types: Vec<SpeciesTypeSlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

/// `/generation/{id}` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationPayload {
    pub pokemon_species: Vec<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeMemberSlot {
    pub pokemon: NamedResource,
}

/// `/type/{id}` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TypePayload {
    pub pokemon: Vec<TypeMemberSlot>,
}

// ── Reshaped upstream views ──────────────────────────────────────────────────

/// Species as served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesDetail {
    pub name: String,
    pub id: u32,
    pub types: Vec<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

impl From<SpeciesPayload> for SpeciesDetail {
    fn from(payload: SpeciesPayload) -> Self {
        // Official artwork first, default front sprite otherwise.
        let artwork = payload
            .sprites
            .other
            .and_then(|o| o.official_artwork)
            .and_then(|a| a.front_default);
        Self {
            name: payload.name,
            id: payload.id,
            types: payload.types.into_iter().map(|t| t.kind.name).collect(),
            image_url: artwork.or(payload.sprites.front_default),
        }
    }
}

/// `{id, name}` entry derived from a reference URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdName {
    pub id: u32,
    pub name: String,
}

/// `{id, name, url}` entry of the combined generation/type filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdNameUrl {
    pub id: u32,
    pub name: String,
    pub url: String,
}

/// Numeric id from the trailing path segment of a PokeAPI resource URL
/// (`https://pokeapi.co/api/v2/type/10/` → `10`).
pub fn id_from_resource_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

impl NamedResource {
    pub fn to_id_name(&self) -> Option<IdName> {
        Some(IdName {
            id: id_from_resource_url(&self.url)?,
            name: self.name.clone(),
        })
    }
}

/// Display label for a generation slug (`generation-iv` → `Geração IV`).
pub fn generation_label(slug: &str) -> String {
    match slug.strip_prefix("generation-") {
        Some(numeral) => format!("Geração {}", numeral.to_uppercase()),
        None => slug.to_owned(),
    }
}
