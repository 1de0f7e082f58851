//! In-memory implementation of UserRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::{Company, NoteOwner, Role, User};
use crate::errors::DomainError;

use super::trait_::UserRepository;

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    note_counts: HashMap<Uuid, usize>,
}

/// Process-local user store for development and tests
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record how many notes a user owns
    pub async fn set_note_count(&self, user_id: Uuid, count: usize) {
        self.state.write().await.note_counts.insert(user_id, count);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut state = self.state.write().await;

        if state
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email) || u.username == user.username)
        {
            return Err(DomainError::Conflict {
                message: "A user already exists with this email or username".to_string(),
            });
        }

        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn attach_company(
        &self,
        user_id: Uuid,
        company: Company,
        role: Role,
    ) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or_else(|| DomainError::not_found(format!("user {}", user_id)))?;

        user.grant_role(role);
        user.company = Some(company);
        Ok(user.clone())
    }

    async fn find_note_owner(&self, username: &str) -> Result<Option<NoteOwner>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .map(|u| NoteOwner {
                username: u.username.clone(),
                name: u.name.clone(),
                note_count: state.note_counts.get(&u.id).copied().unwrap_or(0),
            }))
    }
}
