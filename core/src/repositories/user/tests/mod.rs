//! Unit tests for the in-memory user repository

use uuid::Uuid;

use crate::domain::entities::user::{Address, Company, Role, User};
use crate::errors::DomainError;
use crate::repositories::user::{InMemoryUserRepository, UserRepository};

fn company() -> Company {
    Company::new(
        "Koala Inc",
        Address {
            line1: "1 Eucalyptus Way".to_string(),
            line2: None,
            city: "Provo".to_string(),
            state: "UT".to_string(),
            zip_code: "84601".to_string(),
            country: "US".to_string(),
        },
    )
}

#[tokio::test]
async fn test_create_and_find_by_email() {
    let repo = InMemoryUserRepository::new();
    let user = repo
        .create(User::new("kody@example.com", "kody"))
        .await
        .unwrap();

    let found = repo.find_by_email("KODY@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));
    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let repo = InMemoryUserRepository::new();
    repo.create(User::new("kody@example.com", "kody"))
        .await
        .unwrap();

    let result = repo.create(User::new("kody@example.com", "kody2")).await;
    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_attach_company_grants_role() {
    let repo = InMemoryUserRepository::new();
    let user = repo
        .create(User::new("kody@example.com", "kody"))
        .await
        .unwrap();

    let updated = repo
        .attach_company(user.id, company(), Role::Admin)
        .await
        .unwrap();

    assert!(updated.has_role(Role::Admin));
    assert_eq!(updated.company.map(|c| c.name), Some("Koala Inc".to_string()));

    let missing = repo.attach_company(Uuid::new_v4(), company(), Role::Admin).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_find_note_owner() {
    let repo = InMemoryUserRepository::new();
    let user = repo
        .create(User::new("kody@example.com", "kody").with_name("Kody Koala"))
        .await
        .unwrap();
    repo.set_note_count(user.id, 3).await;

    let owner = repo.find_note_owner("kody").await.unwrap().unwrap();
    assert_eq!(owner.note_count, 3);
    assert_eq!(owner.display_name(), "Kody Koala");
    assert!(repo.find_note_owner("nobody").await.unwrap().is_none());
}
