//! Storage integration tests against a throwaway SQLite file.

use tempfile::TempDir;

use common::{AppError, DatabaseConfig, DatabaseKind};
use domain::{CreateUser, UpdateUser, SEED_USERS};
use user_service_lib::infra::{initialize_schema, Database};
use user_service_lib::user_service;

async fn open_database(dir: &TempDir) -> Database {
    let path = dir.path().join("users.sqlite");
    let config = DatabaseConfig {
        url: DatabaseConfig::sqlite_url(path.to_str().unwrap()),
        ..Default::default()
    };
    Database::connect(&config).await.unwrap()
}

fn create_input(name: &str, email: &str, age: Option<i32>) -> CreateUser {
    CreateUser {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        age,
    }
}

#[tokio::test]
async fn test_schema_seeds_once() {
    let dir = TempDir::new().unwrap();
    let db = open_database(&dir).await;
    assert_eq!(db.kind(), DatabaseKind::Sqlite);
    db.ping().await.unwrap();

    let first = initialize_schema(db.adapter().as_ref()).await.unwrap();
    let second = initialize_schema(db.adapter().as_ref()).await.unwrap();
    assert!(first.seeded);
    assert!(!second.seeded);

    let users = user_service(&db).list_users().await.unwrap();
    assert_eq!(users.len(), SEED_USERS.len());

    // Seed rows share a timestamp, so the id tie-break decides the order
    let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["Bob Johnson", "Jane Smith", "John Doe"]);
}

#[tokio::test]
async fn test_schema_skips_seed_when_rows_exist() {
    let dir = TempDir::new().unwrap();
    let db = open_database(&dir).await;
    initialize_schema(db.adapter().as_ref()).await.unwrap();

    let service = user_service(&db);
    for user in service.list_users().await.unwrap() {
        service.delete_user(user.id).await.unwrap();
    }
    service
        .create_user(create_input("Solo", "solo@example.com", None))
        .await
        .unwrap();

    let report = initialize_schema(db.adapter().as_ref()).await.unwrap();
    assert!(!report.seeded);
    assert_eq!(service.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_user_lifecycle() {
    let dir = TempDir::new().unwrap();
    let db = open_database(&dir).await;
    initialize_schema(db.adapter().as_ref()).await.unwrap();
    let service = user_service(&db);

    // Create
    let ada = service
        .create_user(create_input("Ada Lovelace", "ada@example.com", None))
        .await
        .unwrap();
    assert_eq!(ada.age, None);
    assert_eq!(ada.created_at, ada.updated_at);

    let users = service.list_users().await.unwrap();
    assert_eq!(users.len(), 4);
    assert_eq!(users[0].id, ada.id);

    // Duplicate email
    let err = service
        .create_user(create_input("Other Ada", "ada@example.com", Some(20)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Partial update keeps untouched fields
    let updated = service
        .update_user(
            ada.id,
            UpdateUser {
                age: Some(37),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.age, Some(37));
    assert_eq!(updated.name, "Ada Lovelace");
    assert_eq!(updated.email, "ada@example.com");
    assert_eq!(updated.created_at, ada.created_at);
    assert!(updated.updated_at >= ada.updated_at);

    // Taking a seeded user's email
    let err = service
        .update_user(
            ada.id,
            UpdateUser {
                email: Some("john@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Email already exists");

    // Delete
    service.delete_user(ada.id).await.unwrap();
    let err = service.get_user(ada.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = service.delete_user(ada.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_empty_update_only_touches_timestamp() {
    let dir = TempDir::new().unwrap();
    let db = open_database(&dir).await;
    initialize_schema(db.adapter().as_ref()).await.unwrap();
    let service = user_service(&db);

    let before = service.list_users().await.unwrap().remove(0);
    let after = service
        .update_user(before.id, UpdateUser::default())
        .await
        .unwrap();

    assert_eq!(after.name, before.name);
    assert_eq!(after.email, before.email);
    assert_eq!(after.age, before.age);
    assert!(after.updated_at >= before.updated_at);
}

#[tokio::test]
async fn test_ids_are_never_reused() {
    let dir = TempDir::new().unwrap();
    let db = open_database(&dir).await;
    initialize_schema(db.adapter().as_ref()).await.unwrap();
    let service = user_service(&db);

    let highest = service
        .list_users()
        .await
        .unwrap()
        .iter()
        .map(|u| u.id)
        .max()
        .unwrap();
    service.delete_user(highest).await.unwrap();

    let created = service
        .create_user(create_input("Ada Lovelace", "ada@example.com", None))
        .await
        .unwrap();
    assert!(created.id > highest);
}

#[tokio::test]
async fn test_email_uniqueness_is_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let db = open_database(&dir).await;
    initialize_schema(db.adapter().as_ref()).await.unwrap();
    let service = user_service(&db);

    let created = service
        .create_user(create_input("Johnny", "John@example.com", None))
        .await
        .unwrap();
    assert_eq!(created.email, "John@example.com");
    assert_eq!(service.list_users().await.unwrap().len(), SEED_USERS.len() + 1);
}

#[tokio::test]
async fn test_unsupported_url_is_rejected() {
    let config = DatabaseConfig {
        url: "mysql://localhost/users".to_string(),
        ..Default::default()
    };
    let err = Database::connect(&config).await.err().unwrap();
    assert!(err.message().contains("Unsupported database URL"));
}
