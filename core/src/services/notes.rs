//! Notes index page metadata

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::user::NoteOwner;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;

/// Title and description for a page's meta tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

pub fn notes_index_meta(owner: &NoteOwner) -> PageMeta {
    let display_name = owner.display_name();
    let noun = if owner.note_count == 1 { "note" } else { "notes" };
    PageMeta {
        title: format!("{}'s Notes | Notekeep", display_name),
        description: format!(
            "Checkout {}'s {} {} on Notekeep",
            display_name, owner.note_count, noun
        ),
    }
}

pub struct NotesService<U: UserRepository> {
    users: Arc<U>,
}

impl<U: UserRepository> NotesService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Meta for `/users/{username}/notes`
    pub async fn index_meta(&self, username: &str) -> DomainResult<PageMeta> {
        let owner = self
            .users
            .find_note_owner(username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("user {}", username)))?;
        Ok(notes_index_meta(&owner))
    }
}
