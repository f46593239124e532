//! Integration tests for the manager repository.

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use ledgerline_db::migration::Migrator;
use ledgerline_db::repositories::manager::{
    CreateManagerInput, ManagerError, ManagerRepository, UpdateManagerInput,
};

/// Fresh in-memory database with the schema applied. A single pooled
/// connection keeps every query on the same in-memory instance.
async fn setup() -> DatabaseConnection {
    let db = ledgerline_db::connect_with_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}

fn named(name: &str) -> CreateManagerInput {
    CreateManagerInput {
        id: None,
        name: name.to_string(),
        is_default: None,
        is_admin: None,
    }
}

#[tokio::test]
async fn test_create_and_get() {
    let repo = ManagerRepository::new(setup().await);

    let created = repo.create(named("Pat")).await.expect("create");
    assert_eq!(created.name, "Pat");
    assert_eq!(created.is_default, "off");
    assert_eq!(created.is_admin, "No");

    let fetched = repo.get(&created.id).await.expect("get");
    assert_eq!(fetched.id, created.id);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let repo = ManagerRepository::new(setup().await);

    let err = repo.get("nope").await.unwrap_err();
    assert!(matches!(err, ManagerError::NotFound(_)));
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let repo = ManagerRepository::new(setup().await);

    let err = repo
        .update("nope", UpdateManagerInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ManagerError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let repo = ManagerRepository::new(setup().await);

    let err = repo.delete("nope").await.unwrap_err();
    assert!(matches!(err, ManagerError::NotFound(_)));
}

#[tokio::test]
async fn test_default_flag_unique_after_update() {
    let repo = ManagerRepository::new(setup().await);

    let a = repo.create(named("A")).await.expect("create");
    let b = repo.create(named("B")).await.expect("create");
    let c = repo.create(named("C")).await.expect("create");

    // Mark two managers default in turn; only the last one sticks.
    repo.update(
        &a.id,
        UpdateManagerInput {
            is_default: Some("on".to_string()),
            ..UpdateManagerInput::default()
        },
    )
    .await
    .expect("update a");
    repo.update(
        &b.id,
        UpdateManagerInput {
            is_default: Some("on".to_string()),
            ..UpdateManagerInput::default()
        },
    )
    .await
    .expect("update b");

    let all = repo.list().await.expect("list");
    let defaults: Vec<_> = all.iter().filter(|m| m.is_default == "on").collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].id, b.id);

    // Other managers are untouched apart from the flag.
    assert!(all.iter().any(|m| m.id == c.id && m.is_default == "off"));
}

#[tokio::test]
async fn test_default_flag_unique_after_create() {
    let repo = ManagerRepository::new(setup().await);

    let a = repo
        .create(CreateManagerInput {
            id: None,
            name: "A".to_string(),
            is_default: Some("on".to_string()),
            is_admin: None,
        })
        .await
        .expect("create a");
    let b = repo
        .create(CreateManagerInput {
            id: None,
            name: "B".to_string(),
            is_default: Some("on".to_string()),
            is_admin: None,
        })
        .await
        .expect("create b");

    let all = repo.list().await.expect("list");
    let defaults: Vec<_> = all.iter().filter(|m| m.is_default == "on").collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].id, b.id);
    assert_ne!(a.id, b.id);

    let default = repo.default_manager().await.expect("default");
    assert_eq!(default.map(|m| m.id), Some(b.id));
}

#[tokio::test]
async fn test_update_name_and_admin_flag() {
    let repo = ManagerRepository::new(setup().await);

    let m = repo.create(named("Old")).await.expect("create");
    let updated = repo
        .update(
            &m.id,
            UpdateManagerInput {
                name: Some("New".to_string()),
                is_admin: Some("on".to_string()),
                ..UpdateManagerInput::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.name, "New");
    assert_eq!(updated.is_admin, "on");
    assert_eq!(updated.is_default, "off");
}

#[tokio::test]
async fn test_delete_and_delete_all() {
    let repo = ManagerRepository::new(setup().await);

    let a = repo.create(named("A")).await.expect("create");
    repo.create(named("B")).await.expect("create");

    repo.delete(&a.id).await.expect("delete");
    assert_eq!(repo.list().await.expect("list").len(), 1);

    let removed = repo.delete_all().await.expect("delete_all");
    assert_eq!(removed, 1);
    assert!(repo.list().await.expect("list").is_empty());
}
