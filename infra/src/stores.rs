//! Storage backend selection
//!
//! The core services are generic over their repositories. These enums give
//! the binary one concrete type per repository whatever backend is
//! configured.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use nk_core::domain::entities::user::{Company, NoteOwner, Role, User};
use nk_core::domain::entities::verification::{VerificationRecord, VerificationType};
use nk_core::errors::DomainError;
use nk_core::repositories::{
    InMemoryUserRepository, InMemoryVerificationRepository, UserRepository, VerificationRepository,
};
use nk_shared::config::{AppConfig, StorageBackend};

use crate::cache::{RedisClient, RedisVerificationRepository};
use crate::database::{DatabasePool, MySqlUserRepository, MySqlVerificationRepository};
use crate::InfrastructureError;

/// Where verification records live
pub enum VerificationStore {
    Memory(InMemoryVerificationRepository),
    MySql(MySqlVerificationRepository),
    Redis(RedisVerificationRepository),
}

#[async_trait]
impl VerificationRepository for VerificationStore {
    async fn upsert(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        match self {
            VerificationStore::Memory(repo) => repo.upsert(record).await,
            VerificationStore::MySql(repo) => repo.upsert(record).await,
            VerificationStore::Redis(repo) => repo.upsert(record).await,
        }
    }

    async fn find(
        &self,
        target: &str,
        verification_type: VerificationType,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        match self {
            VerificationStore::Memory(repo) => repo.find(target, verification_type).await,
            VerificationStore::MySql(repo) => repo.find(target, verification_type).await,
            VerificationStore::Redis(repo) => repo.find(target, verification_type).await,
        }
    }

    async fn delete(&self, record: &VerificationRecord) -> Result<bool, DomainError> {
        match self {
            VerificationStore::Memory(repo) => repo.delete(record).await,
            VerificationStore::MySql(repo) => repo.delete(record).await,
            VerificationStore::Redis(repo) => repo.delete(record).await,
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        match self {
            VerificationStore::Memory(repo) => repo.delete_expired(now).await,
            VerificationStore::MySql(repo) => repo.delete_expired(now).await,
            VerificationStore::Redis(repo) => repo.delete_expired(now).await,
        }
    }
}

/// Where users live
pub enum UserStore {
    Memory(InMemoryUserRepository),
    MySql(MySqlUserRepository),
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        match self {
            UserStore::Memory(repo) => repo.find_by_id(id).await,
            UserStore::MySql(repo) => repo.find_by_id(id).await,
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        match self {
            UserStore::Memory(repo) => repo.find_by_email(email).await,
            UserStore::MySql(repo) => repo.find_by_email(email).await,
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        match self {
            UserStore::Memory(repo) => repo.create(user).await,
            UserStore::MySql(repo) => repo.create(user).await,
        }
    }

    async fn attach_company(
        &self,
        user_id: Uuid,
        company: Company,
        role: Role,
    ) -> Result<User, DomainError> {
        match self {
            UserStore::Memory(repo) => repo.attach_company(user_id, company, role).await,
            UserStore::MySql(repo) => repo.attach_company(user_id, company, role).await,
        }
    }

    async fn find_note_owner(&self, username: &str) -> Result<Option<NoteOwner>, DomainError> {
        match self {
            UserStore::Memory(repo) => repo.find_note_owner(username).await,
            UserStore::MySql(repo) => repo.find_note_owner(username).await,
        }
    }
}

/// Repositories for the configured backend
pub struct Stores {
    pub verifications: VerificationStore,
    pub users: UserStore,
    /// Present whenever MySQL is in use, for health checks and shutdown
    pub database: Option<DatabasePool>,
}

impl Stores {
    /// Process-local stores, used in development and tests
    pub fn in_memory() -> Self {
        Self {
            verifications: VerificationStore::Memory(InMemoryVerificationRepository::new()),
            users: UserStore::Memory(InMemoryUserRepository::new()),
            database: None,
        }
    }
}

/// Connect the repositories named by `config.verification.storage`
///
/// `memory` keeps everything in process. `mysql` keeps users and
/// verifications in MySQL. `redis` keeps verifications in Redis and users
/// in MySQL.
pub async fn build_stores(config: &AppConfig) -> Result<Stores, InfrastructureError> {
    let backend = config.verification.storage;
    tracing::info!(backend = ?backend, "Initializing storage");

    if backend == StorageBackend::Memory {
        tracing::warn!("Using in-memory storage; data is lost on restart");
        return Ok(Stores::in_memory());
    }

    let database = DatabasePool::new(&config.database).await?;
    database.run_migrations().await?;
    let users = UserStore::MySql(MySqlUserRepository::new(database.get_pool().clone()));

    let verifications = match backend {
        StorageBackend::Redis => {
            let client = RedisClient::new(&config.cache).await?;
            client.health_check().await?;
            VerificationStore::Redis(RedisVerificationRepository::new(client))
        }
        _ => VerificationStore::MySql(MySqlVerificationRepository::new(
            database.get_pool().clone(),
        )),
    };

    Ok(Stores {
        verifications,
        users,
        database: Some(database),
    })
}
