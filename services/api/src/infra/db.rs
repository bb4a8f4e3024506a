use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, IntoActiveModel as _, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, TransactionError, TransactionTrait,
};

use pokedex_api_schema::{owned_pokemon, owned_pokemon_types, type_descriptors, users};
use pokedex_domain::team::has_room_for_member;

use crate::domain::repository::{OwnedPokemonRepository, TypeRepository, UserRepository};
use crate::domain::types::{
    NewOwnedPokemon, NewUser, OwnedPokemon, OwnedPokemonChanges, OwnedPokemonFilter,
    TypeDescriptor, User, UserChanges, joins_battle_team,
};
use crate::error::PokedexError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Unwrap a sea-orm transaction result, keeping domain errors raised inside.
fn from_transaction(err: TransactionError<PokedexError>, what: &'static str) -> PokedexError {
    match err {
        TransactionError::Connection(e) => anyhow::Error::new(e).context(what).into(),
        TransactionError::Transaction(e) => e,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn list(&self) -> Result<Vec<User>, PokedexError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, PokedexError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, PokedexError> {
        let model = users::Entity::find()
            .filter(users::Column::Login.eq(login))
            .one(&self.db)
            .await
            .context("find user by login")?;
        Ok(model.map(user_from_model))
    }

    async fn is_taken(
        &self,
        login: Option<&str>,
        email: Option<&str>,
        except: Option<i32>,
    ) -> Result<bool, PokedexError> {
        let mut any = Condition::any();
        if let Some(login) = login {
            any = any.add(users::Column::Login.eq(login));
        }
        if let Some(email) = email {
            any = any.add(users::Column::Email.eq(email));
        }
        if login.is_none() && email.is_none() {
            return Ok(false);
        }
        let mut query = users::Entity::find().filter(any);
        if let Some(id) = except {
            query = query.filter(users::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await.context("check user uniqueness")?;
        Ok(count > 0)
    }

    async fn create(&self, user: NewUser) -> Result<User, PokedexError> {
        let now = Utc::now();
        let result = users::ActiveModel {
            name: Set(user.name),
            login: Set(user.login),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            is_active: Set(true),
            is_staff: Set(user.is_staff),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(user_from_model(model)),
            Err(e) if is_unique_violation(&e) => Err(PokedexError::UserAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<User, PokedexError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user for update")?
            .ok_or(PokedexError::UserNotFound)?;

        let mut am = model.into_active_model();
        if let Some(name) = changes.name {
            am.name = Set(name);
        }
        if let Some(login) = changes.login {
            am.login = Set(login);
        }
        if let Some(email) = changes.email {
            am.email = Set(email);
        }
        if let Some(hash) = changes.password_hash {
            am.password_hash = Set(hash);
        }
        if let Some(active) = changes.is_active {
            am.is_active = Set(active);
        }
        if let Some(staff) = changes.is_staff {
            am.is_staff = Set(staff);
        }
        am.updated_at = Set(Utc::now());

        match am.update(&self.db).await {
            Ok(model) => Ok(user_from_model(model)),
            Err(e) if is_unique_violation(&e) => Err(PokedexError::UserAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("update user").into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, PokedexError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        login: model.login,
        email: model.email,
        password_hash: model.password_hash,
        is_active: model.is_active,
        is_staff: model.is_staff,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Type repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTypeRepository {
    pub db: DatabaseConnection,
}

impl TypeRepository for DbTypeRepository {
    async fn list(&self) -> Result<Vec<TypeDescriptor>, PokedexError> {
        let models = type_descriptors::Entity::find()
            .order_by_asc(type_descriptors::Column::Id)
            .all(&self.db)
            .await
            .context("list type descriptors")?;
        Ok(models.into_iter().map(type_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TypeDescriptor>, PokedexError> {
        let model = type_descriptors::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find type descriptor by id")?;
        Ok(model.map(type_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<TypeDescriptor>, PokedexError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = type_descriptors::Entity::find()
            .filter(type_descriptors::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(type_descriptors::Column::Id)
            .all(&self.db)
            .await
            .context("find type descriptors by ids")?;
        Ok(models.into_iter().map(type_from_model).collect())
    }

    async fn find_by_label(&self, label: &str) -> Result<Option<TypeDescriptor>, PokedexError> {
        let model = type_descriptors::Entity::find()
            .filter(type_descriptors::Column::Label.eq(label))
            .one(&self.db)
            .await
            .context("find type descriptor by label")?;
        Ok(model.map(type_from_model))
    }

    async fn create(&self, label: &str) -> Result<TypeDescriptor, PokedexError> {
        let result = type_descriptors::ActiveModel {
            label: Set(label.to_owned()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(type_from_model(model)),
            Err(e) if is_unique_violation(&e) => Err(PokedexError::TypeAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create type descriptor").into()),
        }
    }

    async fn update(&self, id: i32, label: &str) -> Result<TypeDescriptor, PokedexError> {
        let result = type_descriptors::ActiveModel {
            id: Set(id),
            label: Set(label.to_owned()),
        }
        .update(&self.db)
        .await;
        match result {
            Ok(model) => Ok(type_from_model(model)),
            Err(DbErr::RecordNotUpdated) => Err(PokedexError::TypeNotFound),
            Err(e) if is_unique_violation(&e) => Err(PokedexError::TypeAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("update type descriptor").into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, PokedexError> {
        let result = type_descriptors::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete type descriptor")?;
        Ok(result.rows_affected > 0)
    }
}

fn type_from_model(model: type_descriptors::Model) -> TypeDescriptor {
    TypeDescriptor {
        id: model.id,
        label: model.label,
    }
}

// ── Owned Pokémon repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOwnedPokemonRepository {
    pub db: DatabaseConnection,
}

/// Lock the owner row, then count its battle-team members. Concurrent guarded
/// writes for the same owner queue on the lock.
async fn locked_team_size<C: ConnectionTrait>(conn: &C, owner_id: i32) -> Result<u64, DbErr> {
    users::Entity::find_by_id(owner_id)
        .lock_exclusive()
        .one(conn)
        .await?;
    owned_pokemon::Entity::find()
        .filter(owned_pokemon::Column::OwnerId.eq(owner_id))
        .filter(owned_pokemon::Column::InBattleTeam.eq(true))
        .count(conn)
        .await
}

async fn ensure_team_room<C: ConnectionTrait>(conn: &C, owner_id: i32) -> Result<(), PokedexError> {
    let members = locked_team_size(conn, owner_id)
        .await
        .context("count battle team")?;
    if !has_room_for_member(members) {
        tracing::info!(owner_id, members, "battle team full, write rejected");
        return Err(PokedexError::BattleTeamFull);
    }
    Ok(())
}

async fn replace_types<C: ConnectionTrait>(
    conn: &C,
    pokemon_id: i32,
    type_ids: &[i32],
) -> Result<(), DbErr> {
    owned_pokemon_types::Entity::delete_many()
        .filter(owned_pokemon_types::Column::OwnedPokemonId.eq(pokemon_id))
        .exec(conn)
        .await?;
    for type_id in type_ids {
        owned_pokemon_types::ActiveModel {
            owned_pokemon_id: Set(pokemon_id),
            type_descriptor_id: Set(*type_id),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

async fn load_types<C: ConnectionTrait>(
    conn: &C,
    pokemon_id: i32,
) -> Result<Vec<TypeDescriptor>, DbErr> {
    let models = type_descriptors::Entity::find()
        .inner_join(owned_pokemon_types::Entity)
        .filter(owned_pokemon_types::Column::OwnedPokemonId.eq(pokemon_id))
        .order_by_asc(type_descriptors::Column::Id)
        .all(conn)
        .await?;
    Ok(models.into_iter().map(type_from_model).collect())
}

async fn with_types<C: ConnectionTrait>(
    conn: &C,
    model: owned_pokemon::Model,
) -> Result<OwnedPokemon, DbErr> {
    let types = load_types(conn, model.id).await?;
    Ok(OwnedPokemon {
        id: model.id,
        owner_id: model.owner_id,
        species_code: model.species_code,
        name: model.name,
        image_url: model.image_url,
        in_battle_team: model.in_battle_team,
        favorite: model.favorite,
        types,
    })
}

impl OwnedPokemonRepository for DbOwnedPokemonRepository {
    async fn list(&self, filter: &OwnedPokemonFilter) -> Result<Vec<OwnedPokemon>, PokedexError> {
        let mut query = owned_pokemon::Entity::find().order_by_asc(owned_pokemon::Column::Id);
        if let Some(owner_id) = filter.owner_id {
            query = query.filter(owned_pokemon::Column::OwnerId.eq(owner_id));
        }
        if let Some(ref code) = filter.species_code {
            query = query.filter(owned_pokemon::Column::SpeciesCode.eq(code.as_str()));
        }
        if let Some(flag) = filter.in_battle_team {
            query = query.filter(owned_pokemon::Column::InBattleTeam.eq(flag));
        }
        if let Some(flag) = filter.favorite {
            query = query.filter(owned_pokemon::Column::Favorite.eq(flag));
        }
        let models = query.all(&self.db).await.context("list owned pokemon")?;

        let mut results = Vec::with_capacity(models.len());
        for model in models {
            results.push(
                with_types(&self.db, model)
                    .await
                    .context("load owned pokemon types")?,
            );
        }
        Ok(results)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OwnedPokemon>, PokedexError> {
        let Some(model) = owned_pokemon::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find owned pokemon by id")?
        else {
            return Ok(None);
        };
        let pokemon = with_types(&self.db, model)
            .await
            .context("load owned pokemon types")?;
        Ok(Some(pokemon))
    }

    async fn create(&self, pokemon: NewOwnedPokemon) -> Result<OwnedPokemon, PokedexError> {
        self.db
            .transaction::<_, OwnedPokemon, PokedexError>(|txn| {
                Box::pin(async move {
                    if pokemon.in_battle_team {
                        ensure_team_room(txn, pokemon.owner_id).await?;
                    }

                    let model = owned_pokemon::ActiveModel {
                        owner_id: Set(pokemon.owner_id),
                        species_code: Set(pokemon.species_code),
                        name: Set(pokemon.name),
                        image_url: Set(pokemon.image_url),
                        in_battle_team: Set(pokemon.in_battle_team),
                        favorite: Set(pokemon.favorite),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .context("insert owned pokemon")?;

                    replace_types(txn, model.id, &pokemon.type_ids)
                        .await
                        .context("link owned pokemon types")?;
                    Ok(with_types(txn, model)
                        .await
                        .context("load owned pokemon types")?)
                })
            })
            .await
            .map_err(|e| from_transaction(e, "create owned pokemon"))
    }

    async fn update(
        &self,
        id: i32,
        changes: OwnedPokemonChanges,
    ) -> Result<OwnedPokemon, PokedexError> {
        self.db
            .transaction::<_, OwnedPokemon, PokedexError>(|txn| {
                Box::pin(async move {
                    let current = owned_pokemon::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .context("find owned pokemon for update")?
                        .ok_or(PokedexError::PokemonNotFound)?;

                    if joins_battle_team(current.in_battle_team, changes.in_battle_team) {
                        ensure_team_room(txn, current.owner_id).await?;
                    }

                    let mut am = current.into_active_model();
                    if let Some(code) = changes.species_code {
                        am.species_code = Set(code);
                    }
                    if let Some(name) = changes.name {
                        am.name = Set(name);
                    }
                    if let Some(url) = changes.image_url {
                        am.image_url = Set(url);
                    }
                    if let Some(flag) = changes.in_battle_team {
                        am.in_battle_team = Set(flag);
                    }
                    if let Some(flag) = changes.favorite {
                        am.favorite = Set(flag);
                    }
                    // An update with no changed columns is a no-op, not an error.
                    let model = if am.is_changed() {
                        am.update(txn).await.context("update owned pokemon")?
                    } else {
                        owned_pokemon::Entity::find_by_id(id)
                            .one(txn)
                            .await
                            .context("reload owned pokemon")?
                            .ok_or(PokedexError::PokemonNotFound)?
                    };

                    if let Some(ref type_ids) = changes.type_ids {
                        replace_types(txn, id, type_ids)
                            .await
                            .context("relink owned pokemon types")?;
                    }
                    Ok(with_types(txn, model)
                        .await
                        .context("load owned pokemon types")?)
                })
            })
            .await
            .map_err(|e| from_transaction(e, "update owned pokemon"))
    }

    async fn delete(&self, id: i32) -> Result<bool, PokedexError> {
        let result = owned_pokemon::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete owned pokemon")?;
        Ok(result.rows_affected > 0)
    }
}
