use pokedex_api::domain::repository::{OwnedPokemonRepository, TypeRepository, UserRepository};
use pokedex_api::domain::types::{
    NewOwnedPokemon, NewUser, OwnedPokemonChanges, OwnedPokemonFilter, UserChanges,
};
use pokedex_api::error::PokedexError;
use pokedex_api::infra::db::{DbOwnedPokemonRepository, DbTypeRepository, DbUserRepository};
use futures::future::join_all;
use sea_orm::DatabaseConnection;

use crate::helpers::sqlite_db;

fn new_user(login: &str) -> NewUser {
    NewUser {
        name: format!("Trainer {login}"),
        login: login.to_owned(),
        email: format!("{login}@pokedex.test"),
        password_hash: "$argon2id$placeholder".to_owned(),
        is_staff: false,
    }
}

fn new_pokemon(owner_id: i32, code: &str, in_battle_team: bool) -> NewOwnedPokemon {
    NewOwnedPokemon {
        owner_id,
        species_code: code.to_owned(),
        name: code.to_owned(),
        image_url: None,
        in_battle_team,
        favorite: false,
        type_ids: vec![],
    }
}

struct Repos {
    users: DbUserRepository,
    types: DbTypeRepository,
    owned: DbOwnedPokemonRepository,
}

fn repos(db: &DatabaseConnection) -> Repos {
    Repos {
        users: DbUserRepository { db: db.clone() },
        types: DbTypeRepository { db: db.clone() },
        owned: DbOwnedPokemonRepository { db: db.clone() },
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_map_unique_violation_to_conflict() {
    let db = sqlite_db().await;
    let r = repos(&db);
    r.users.create(new_user("ash")).await.unwrap();

    let same_login = r.users.create(new_user("ash")).await;
    assert!(
        matches!(same_login, Err(PokedexError::UserAlreadyExists)),
        "expected UserAlreadyExists, got {same_login:?}"
    );

    let same_email = r
        .users
        .create(NewUser {
            login: "ashketchum".to_owned(),
            ..new_user("ash")
        })
        .await;
    assert!(matches!(same_email, Err(PokedexError::UserAlreadyExists)));
}

#[tokio::test]
async fn should_check_uniqueness_excluding_self() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let ash = r.users.create(new_user("ash")).await.unwrap();
    r.users.create(new_user("gary")).await.unwrap();

    assert!(!r.users.is_taken(Some("ash"), None, Some(ash.id)).await.unwrap());
    assert!(r.users.is_taken(Some("gary"), None, Some(ash.id)).await.unwrap());
    assert!(
        r.users
            .is_taken(None, Some("gary@pokedex.test"), None)
            .await
            .unwrap()
    );
    assert!(!r.users.is_taken(Some("brock"), None, None).await.unwrap());
}

#[tokio::test]
async fn should_apply_partial_user_changes() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let ash = r.users.create(new_user("ash")).await.unwrap();

    let updated = r
        .users
        .update(
            ash.id,
            UserChanges {
                name: Some("Ash Ketchum".to_owned()),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Ash Ketchum");
    assert_eq!(updated.login, "ash");
    assert!(!updated.is_active);
}

#[tokio::test]
async fn should_cascade_user_deletion_to_owned_pokemon() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let ash = r.users.create(new_user("ash")).await.unwrap();
    let pikachu = r.owned.create(new_pokemon(ash.id, "pikachu", true)).await.unwrap();

    assert!(r.users.delete(ash.id).await.unwrap());
    assert!(r.owned.find_by_id(pikachu.id).await.unwrap().is_none());
    assert!(!r.users.delete(ash.id).await.unwrap());
}

// ── Type catalog ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_duplicate_type_label() {
    let db = sqlite_db().await;
    let r = repos(&db);
    r.types.create("fire").await.unwrap();
    let result = r.types.create("fire").await;
    assert!(matches!(result, Err(PokedexError::TypeAlreadyExists)));
}

#[tokio::test]
async fn should_report_missing_type_on_update() {
    let db = sqlite_db().await;
    let result = repos(&db).types.update(404, "ghost").await;
    assert!(matches!(result, Err(PokedexError::TypeNotFound)));
}

// ── Owned Pokémon ────────────────────────────────────────────────────────────

async fn battle_team(r: &Repos, owner_id: i32) -> usize {
    r.owned
        .list(&OwnedPokemonFilter {
            owner_id: Some(owner_id),
            in_battle_team: Some(true),
            ..Default::default()
        })
        .await
        .unwrap()
        .len()
}

#[tokio::test]
async fn should_reject_seventh_battle_team_member() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let ash = r.users.create(new_user("ash")).await.unwrap();

    for i in 0..6 {
        r.owned
            .create(new_pokemon(ash.id, &format!("member-{i}"), true))
            .await
            .unwrap();
    }
    let seventh = r.owned.create(new_pokemon(ash.id, "snorlax", true)).await;

    assert!(matches!(seventh, Err(PokedexError::BattleTeamFull)));
    assert_eq!(battle_team(&r, ash.id).await, 6);
    let all = r
        .owned
        .list(&OwnedPokemonFilter {
            owner_id: Some(ash.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_cap_battle_team_under_concurrent_creates() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let ash = r.users.create(new_user("ash")).await.unwrap();

    let results = join_all((0..8).map(|i| {
        let owned = r.owned.clone();
        let pokemon = new_pokemon(ash.id, &format!("racer-{i}"), true);
        async move { owned.create(pokemon).await }
    }))
    .await;

    let created = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(PokedexError::BattleTeamFull)))
        .count();
    assert_eq!(created, 6);
    assert_eq!(rejected, 2);
    assert_eq!(battle_team(&r, ash.id).await, 6);
}

#[tokio::test]
async fn should_guard_promotion_but_not_member_edits() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let ash = r.users.create(new_user("ash")).await.unwrap();
    let mut members = Vec::new();
    for i in 0..6 {
        members.push(
            r.owned
                .create(new_pokemon(ash.id, &format!("member-{i}"), true))
                .await
                .unwrap(),
        );
    }
    let bench = r.owned.create(new_pokemon(ash.id, "magikarp", false)).await.unwrap();

    let promote = r
        .owned
        .update(
            bench.id,
            OwnedPokemonChanges {
                in_battle_team: Some(true),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(promote, Err(PokedexError::BattleTeamFull)));
    let still_bench = r.owned.find_by_id(bench.id).await.unwrap().unwrap();
    assert!(!still_bench.in_battle_team);

    let edited = r
        .owned
        .update(
            members[0].id,
            OwnedPokemonChanges {
                name: Some("Captain".to_owned()),
                in_battle_team: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.name, "Captain");

    let demoted = r
        .owned
        .update(
            members[1].id,
            OwnedPokemonChanges {
                in_battle_team: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!demoted.in_battle_team);

    let promoted = r
        .owned
        .update(
            bench.id,
            OwnedPokemonChanges {
                in_battle_team: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(promoted.in_battle_team);
}

#[tokio::test]
async fn should_attach_and_replace_types() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let ash = r.users.create(new_user("ash")).await.unwrap();
    let electric = r.types.create("electric").await.unwrap();
    let steel = r.types.create("steel").await.unwrap();

    let magnemite = r
        .owned
        .create(NewOwnedPokemon {
            type_ids: vec![electric.id, steel.id],
            ..new_pokemon(ash.id, "magnemite", false)
        })
        .await
        .unwrap();
    let mut labels: Vec<String> = magnemite.types.iter().map(|t| t.label.clone()).collect();
    labels.sort();
    assert_eq!(labels, ["electric", "steel"]);

    let updated = r
        .owned
        .update(
            magnemite.id,
            OwnedPokemonChanges {
                type_ids: Some(vec![electric.id]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.types.len(), 1);
    assert_eq!(updated.types[0].label, "electric");

    assert!(r.types.delete(electric.id).await.unwrap());
    let reloaded = r.owned.find_by_id(magnemite.id).await.unwrap().unwrap();
    assert!(reloaded.types.is_empty());
}

#[tokio::test]
async fn should_filter_owned_listing() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let ash = r.users.create(new_user("ash")).await.unwrap();
    let gary = r.users.create(new_user("gary")).await.unwrap();
    r.owned.create(new_pokemon(ash.id, "pikachu", true)).await.unwrap();
    r.owned.create(new_pokemon(ash.id, "pikachu", false)).await.unwrap();
    r.owned.create(new_pokemon(gary.id, "pikachu", true)).await.unwrap();

    let filtered = r
        .owned
        .list(&OwnedPokemonFilter {
            owner_id: Some(ash.id),
            species_code: Some("pikachu".to_owned()),
            in_battle_team: Some(true),
            favorite: None,
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].owner_id, ash.id);

    let everyone = r.owned.list(&OwnedPokemonFilter::default()).await.unwrap();
    assert_eq!(everyone.len(), 3);
}
