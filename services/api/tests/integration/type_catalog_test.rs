use pokedex_api::error::PokedexError;
use pokedex_api::usecase::type_catalog::{
    CreateTypeDescriptorUseCase, DeleteTypeDescriptorUseCase, GetTypeDescriptorUseCase,
    ListTypeDescriptorsUseCase, UpdateTypeDescriptorUseCase,
};
use pokedex_auth_types::caller::Caller;

use crate::helpers::{MockTypeRepo, MockUserRepo, staff_user, test_type, test_user};

fn users() -> MockUserRepo {
    MockUserRepo::new(vec![test_user(1, "ash"), staff_user(2, "oak")])
}

const STAFF: Caller = Caller { user_id: 2 };

#[tokio::test]
async fn should_create_trimmed_label_as_staff() {
    let created = CreateTypeDescriptorUseCase {
        repo: MockTypeRepo::empty(),
        users: users(),
    }
    .execute(STAFF, Some("  fire ".to_owned()))
    .await
    .unwrap();
    assert_eq!(created.label, "fire");
}

#[tokio::test]
async fn should_forbid_writes_from_regular_users() {
    let result = CreateTypeDescriptorUseCase {
        repo: MockTypeRepo::empty(),
        users: users(),
    }
    .execute(Caller { user_id: 1 }, Some("fire".to_owned()))
    .await;
    assert!(matches!(result, Err(PokedexError::Forbidden)));
}

#[tokio::test]
async fn should_reject_blank_and_duplicate_labels() {
    let uc = CreateTypeDescriptorUseCase {
        repo: MockTypeRepo::new(vec![test_type(1, "fire")]),
        users: users(),
    };
    let blank = uc.execute(STAFF, Some("   ".to_owned())).await;
    assert!(matches!(blank, Err(PokedexError::MissingData)));

    let duplicate = uc.execute(STAFF, Some("fire".to_owned())).await;
    assert!(matches!(duplicate, Err(PokedexError::TypeAlreadyExists)));
}

#[tokio::test]
async fn should_rename_and_detect_clashes() {
    let uc = UpdateTypeDescriptorUseCase {
        repo: MockTypeRepo::new(vec![test_type(1, "fire"), test_type(2, "water")]),
        users: users(),
    };

    let renamed = uc
        .execute(STAFF, 1, Some("flame".to_owned()), true)
        .await
        .unwrap();
    assert_eq!(renamed.label, "flame");

    let unchanged = uc.execute(STAFF, 2, Some("water".to_owned()), true).await;
    assert!(unchanged.is_ok());

    let clash = uc.execute(STAFF, 2, Some("flame".to_owned()), false).await;
    assert!(matches!(clash, Err(PokedexError::TypeAlreadyExists)));

    let noop = uc.execute(STAFF, 2, None, false).await.unwrap();
    assert_eq!(noop.label, "water");
}

#[tokio::test]
async fn should_report_unknown_ids_as_not_found() {
    let get = GetTypeDescriptorUseCase {
        repo: MockTypeRepo::empty(),
        users: users(),
    }
    .execute(STAFF, 9)
    .await;
    assert!(matches!(get, Err(PokedexError::TypeNotFound)));

    let delete = DeleteTypeDescriptorUseCase {
        repo: MockTypeRepo::empty(),
        users: users(),
    }
    .execute(STAFF, 9)
    .await;
    assert!(matches!(delete, Err(PokedexError::TypeNotFound)));
}

#[tokio::test]
async fn should_reject_reads_from_missing_or_inactive_accounts() {
    let mut benched = test_user(3, "brock");
    benched.is_active = false;
    let users = MockUserRepo::new(vec![test_user(1, "ash"), benched]);
    let uc = ListTypeDescriptorsUseCase {
        repo: MockTypeRepo::new(vec![test_type(1, "fire")]),
        users: users.clone(),
    };

    assert_eq!(uc.execute(Caller { user_id: 1 }).await.unwrap().len(), 1);
    let inactive = uc.execute(Caller { user_id: 3 }).await;
    assert!(matches!(inactive, Err(PokedexError::InvalidToken)));

    let deleted = GetTypeDescriptorUseCase {
        repo: MockTypeRepo::new(vec![test_type(1, "fire")]),
        users,
    }
    .execute(Caller { user_id: 99 }, 1)
    .await;
    assert!(matches!(deleted, Err(PokedexError::InvalidToken)));
}
