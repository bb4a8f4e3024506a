use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;

use pokedex_api::domain::repository::{
    OwnedPokemonRepository, PokeApiPort, TypeRepository, UserRepository,
};
use pokedex_api::domain::types::{
    GenerationPayload, NamedResourcePage, NewOwnedPokemon, NewUser, OwnedPokemon,
    OwnedPokemonChanges, OwnedPokemonFilter, SpeciesPayload, TypeDescriptor, TypePayload, User,
    UserChanges, joins_battle_team,
};
use pokedex_api::error::PokedexError;
use pokedex_api::infra::pokeapi::HttpPokeApi;
use pokedex_api::state::AppState;
use pokedex_api_migration::{Migrator, MigratorTrait};
use pokedex_auth_types::caller::JwtSecret;
use pokedex_auth_types::password::hash_password;
use pokedex_domain::team::has_room_for_member;

pub use pokedex_testing::auth::{MockAuth, TEST_JWT_SECRET};

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub const TEST_PASSWORD: &str = "pikachu-123";

pub fn test_user(id: i32, login: &str) -> User {
    let now = Utc::now();
    User {
        id,
        name: format!("Trainer {login}"),
        login: login.to_owned(),
        email: format!("{login}@pokedex.test"),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        is_active: true,
        is_staff: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn staff_user(id: i32, login: &str) -> User {
    User {
        is_staff: true,
        ..test_user(id, login)
    }
}

pub fn test_type(id: i32, label: &str) -> TypeDescriptor {
    TypeDescriptor {
        id,
        label: label.to_owned(),
    }
}

pub fn test_pokemon(id: i32, owner_id: i32, species_code: &str, in_battle_team: bool) -> OwnedPokemon {
    OwnedPokemon {
        id,
        owner_id,
        species_code: species_code.to_owned(),
        name: species_code.to_owned(),
        image_url: None,
        in_battle_team,
        favorite: false,
        types: vec![],
    }
}

/// `count` battle-team members owned by `owner_id`, ids starting at `first_id`.
pub fn full_team(owner_id: i32, first_id: i32, count: usize) -> Vec<OwnedPokemon> {
    (0..count)
        .map(|i| test_pokemon(first_id + i as i32, owner_id, &format!("member-{i}"), true))
        .collect()
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns a shared handle to the internal user list for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn list(&self) -> Result<Vec<User>, PokedexError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, PokedexError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, PokedexError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.login == login)
            .cloned())
    }

    async fn is_taken(
        &self,
        login: Option<&str>,
        email: Option<&str>,
        except: Option<i32>,
    ) -> Result<bool, PokedexError> {
        Ok(self.users.lock().unwrap().iter().any(|u| {
            Some(u.id) != except
                && (login == Some(u.login.as_str()) || email == Some(u.email.as_str()))
        }))
    }

    async fn create(&self, user: NewUser) -> Result<User, PokedexError> {
        let mut users = self.users.lock().unwrap();
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        let created = User {
            id,
            name: user.name,
            login: user.login,
            email: user.email,
            password_hash: user.password_hash,
            is_active: true,
            is_staff: user.is_staff,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<User, PokedexError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(PokedexError::UserNotFound)?;
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(login) = changes.login {
            user.login = login;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        if let Some(flag) = changes.is_active {
            user.is_active = flag;
        }
        if let Some(flag) = changes.is_staff {
            user.is_staff = flag;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, PokedexError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }
}

// ── MockTypeRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockTypeRepo {
    pub types: Arc<Mutex<Vec<TypeDescriptor>>>,
}

impl MockTypeRepo {
    pub fn new(types: Vec<TypeDescriptor>) -> Self {
        Self {
            types: Arc::new(Mutex::new(types)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl TypeRepository for MockTypeRepo {
    async fn list(&self) -> Result<Vec<TypeDescriptor>, PokedexError> {
        Ok(self.types.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TypeDescriptor>, PokedexError> {
        Ok(self.types.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<TypeDescriptor>, PokedexError> {
        Ok(self
            .types
            .lock()
            .unwrap()
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn find_by_label(&self, label: &str) -> Result<Option<TypeDescriptor>, PokedexError> {
        Ok(self
            .types
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.label == label)
            .cloned())
    }

    async fn create(&self, label: &str) -> Result<TypeDescriptor, PokedexError> {
        let mut types = self.types.lock().unwrap();
        let id = types.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let created = test_type(id, label);
        types.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, label: &str) -> Result<TypeDescriptor, PokedexError> {
        let mut types = self.types.lock().unwrap();
        let t = types
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(PokedexError::TypeNotFound)?;
        t.label = label.to_owned();
        Ok(t.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, PokedexError> {
        let mut types = self.types.lock().unwrap();
        let before = types.len();
        types.retain(|t| t.id != id);
        Ok(types.len() != before)
    }
}

// ── MockOwnedPokemonRepo ─────────────────────────────────────────────────────

/// In-memory store applying the same battle-team guard as the database adapter.
#[derive(Clone)]
pub struct MockOwnedPokemonRepo {
    pub records: Arc<Mutex<Vec<OwnedPokemon>>>,
    pub catalog: Vec<TypeDescriptor>,
}

impl MockOwnedPokemonRepo {
    pub fn new(records: Vec<OwnedPokemon>) -> Self {
        Self::with_catalog(records, vec![])
    }

    pub fn with_catalog(records: Vec<OwnedPokemon>, catalog: Vec<TypeDescriptor>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            catalog,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns a shared handle to the internal record list for post-execution inspection.
    pub fn records_handle(&self) -> Arc<Mutex<Vec<OwnedPokemon>>> {
        Arc::clone(&self.records)
    }

    fn resolve(&self, ids: &[i32]) -> Vec<TypeDescriptor> {
        self.catalog
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect()
    }
}

fn team_size(records: &[OwnedPokemon], owner_id: i32) -> u64 {
    records
        .iter()
        .filter(|p| p.owner_id == owner_id && p.in_battle_team)
        .count() as u64
}

fn filter_matches(filter: &OwnedPokemonFilter, pokemon: &OwnedPokemon) -> bool {
    filter.owner_id.is_none_or(|id| pokemon.owner_id == id)
        && filter
            .species_code
            .as_deref()
            .is_none_or(|code| pokemon.species_code == code)
        && filter
            .in_battle_team
            .is_none_or(|flag| pokemon.in_battle_team == flag)
        && filter.favorite.is_none_or(|flag| pokemon.favorite == flag)
}

impl OwnedPokemonRepository for MockOwnedPokemonRepo {
    async fn list(&self, filter: &OwnedPokemonFilter) -> Result<Vec<OwnedPokemon>, PokedexError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter_matches(filter, p))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OwnedPokemon>, PokedexError> {
        Ok(self.records.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, pokemon: NewOwnedPokemon) -> Result<OwnedPokemon, PokedexError> {
        let mut records = self.records.lock().unwrap();
        if pokemon.in_battle_team && !has_room_for_member(team_size(&records, pokemon.owner_id)) {
            return Err(PokedexError::BattleTeamFull);
        }
        let id = records.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let created = OwnedPokemon {
            id,
            owner_id: pokemon.owner_id,
            species_code: pokemon.species_code,
            name: pokemon.name,
            image_url: pokemon.image_url,
            in_battle_team: pokemon.in_battle_team,
            favorite: pokemon.favorite,
            types: self.resolve(&pokemon.type_ids),
        };
        records.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        changes: OwnedPokemonChanges,
    ) -> Result<OwnedPokemon, PokedexError> {
        let mut records = self.records.lock().unwrap();
        let (owner_id, currently_member) = records
            .iter()
            .find(|p| p.id == id)
            .map(|p| (p.owner_id, p.in_battle_team))
            .ok_or(PokedexError::PokemonNotFound)?;
        if joins_battle_team(currently_member, changes.in_battle_team)
            && !has_room_for_member(team_size(&records, owner_id))
        {
            return Err(PokedexError::BattleTeamFull);
        }
        let types = changes.type_ids.as_deref().map(|ids| self.resolve(ids));
        let record = records
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PokedexError::PokemonNotFound)?;
        if let Some(code) = changes.species_code {
            record.species_code = code;
        }
        if let Some(name) = changes.name {
            record.name = name;
        }
        if let Some(url) = changes.image_url {
            record.image_url = url;
        }
        if let Some(flag) = changes.in_battle_team {
            record.in_battle_team = flag;
        }
        if let Some(flag) = changes.favorite {
            record.favorite = flag;
        }
        if let Some(types) = types {
            record.types = types;
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, PokedexError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|p| p.id != id);
        Ok(records.len() != before)
    }
}

// ── MockPokeApi ──────────────────────────────────────────────────────────────

/// Canned PokeAPI bodies keyed by path parameter. Missing keys answer
/// `UpstreamNotFound`; keys listed in `failing` answer `Upstream`.
#[derive(Default)]
pub struct MockPokeApi {
    pub species: HashMap<String, Value>,
    pub failing: Vec<String>,
    pub page: Option<Value>,
    pub types: Option<Value>,
    pub generations: Option<Value>,
    pub generation: HashMap<u32, Value>,
    pub type_members: HashMap<u32, Value>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockPokeApi {
    pub fn with_species(mut self, code: &str, body: Value) -> Self {
        self.species.insert(code.to_owned(), body);
        self
    }

    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing.push(key.to_owned());
        self
    }

    fn record(&self, key: String) -> Result<(), PokedexError> {
        let failed = self.failing.contains(&key);
        self.calls.lock().unwrap().push(key.clone());
        if failed {
            return Err(PokedexError::Upstream(format!("{key}: connection reset")));
        }
        Ok(())
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: Option<&Value>) -> Result<T, PokedexError> {
    let body = body.ok_or(PokedexError::UpstreamNotFound)?;
    serde_json::from_value(body.clone()).map_err(|e| PokedexError::Upstream(e.to_string()))
}

impl PokeApiPort for MockPokeApi {
    async fn species(&self, code: &str) -> Result<SpeciesPayload, PokedexError> {
        self.record(code.to_owned())?;
        decode(self.species.get(code))
    }

    async fn species_page(&self, offset: u32, limit: u32) -> Result<NamedResourcePage, PokedexError> {
        self.record(format!("page:{offset}:{limit}"))?;
        decode(self.page.as_ref())
    }

    async fn types(&self) -> Result<NamedResourcePage, PokedexError> {
        self.record("types".to_owned())?;
        decode(self.types.as_ref())
    }

    async fn generations(&self, limit: u32) -> Result<NamedResourcePage, PokedexError> {
        self.record(format!("generations:{limit}"))?;
        decode(self.generations.as_ref())
    }

    async fn generation(&self, id: u32) -> Result<GenerationPayload, PokedexError> {
        self.record(format!("generation:{id}"))?;
        decode(self.generation.get(&id))
    }

    async fn type_members(&self, id: u32) -> Result<TypePayload, PokedexError> {
        self.record(format!("type:{id}"))?;
        decode(self.type_members.get(&id))
    }
}

// ── SQLite-backed state ──────────────────────────────────────────────────────

/// Fresh in-memory database with every migration applied.
pub async fn sqlite_db() -> DatabaseConnection {
    // One connection: every pool checkout sees the same in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

/// Application state over a fresh in-memory database, with PokeAPI rooted at `pokeapi_base`.
pub async fn sqlite_state(pokeapi_base: &str) -> AppState {
    AppState {
        db: sqlite_db().await,
        pokeapi: HttpPokeApi::new(pokeapi_base, Duration::from_secs(2)).unwrap(),
        jwt_secret: JwtSecret::new(TEST_JWT_SECRET),
        access_token_ttl_secs: 300,
        refresh_token_ttl_secs: 600,
        user_directory_public: false,
    }
}
