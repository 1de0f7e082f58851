//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::{Company, NoteOwner, Role, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by email address, compared case-insensitively
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with this email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// Fails with `DomainError::Conflict` when the email or username is taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Grant `role` to a user and attach a newly created company
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError::NotFound)` - No user with this id
    async fn attach_company(
        &self,
        user_id: Uuid,
        company: Company,
        role: Role,
    ) -> Result<User, DomainError>;

    /// Owner summary for a notes listing
    async fn find_note_owner(&self, username: &str) -> Result<Option<NoteOwner>, DomainError>;
}
