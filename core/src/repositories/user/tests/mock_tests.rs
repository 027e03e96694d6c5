//! Unit tests for the mock user repository implementation

use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::user::{MockUserRepository, UserRepository};

#[tokio::test]
async fn test_create_and_find_by_email() {
    let repo = MockUserRepository::new();
    let user = User::new("a@x.com", "alice".to_string(), "hash".to_string());

    let created = repo.create(user.clone()).await.unwrap();
    assert_eq!(created.id, user.id);

    let found = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(found.id, user.id);

    let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "a@x.com");
}

#[tokio::test]
async fn test_create_rejects_duplicate_email() {
    let repo = MockUserRepository::new();

    repo.create(User::new("a@x.com", "alice".to_string(), "hash".to_string()))
        .await
        .unwrap();
    let result = repo
        .create(User::new("a@x.com", "other".to_string(), "hash2".to_string()))
        .await;

    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_exists_by_email() {
    let repo = MockUserRepository::new();
    repo.create(User::new("a@x.com", "alice".to_string(), "hash".to_string()))
        .await
        .unwrap();

    assert!(repo.exists_by_email("a@x.com").await.unwrap());
    assert!(!repo.exists_by_email("b@x.com").await.unwrap());
}

#[tokio::test]
async fn test_update_stamps_last_login() {
    let repo = MockUserRepository::new();
    let mut user = User::new("a@x.com", "alice".to_string(), "hash".to_string());
    repo.create(user.clone()).await.unwrap();

    user.update_last_login();
    repo.update(user).await.unwrap();

    let found = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    assert!(found.last_login_at.is_some());
}
