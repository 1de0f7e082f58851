//! User entity and the company profile attached during onboarding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Country recorded for every onboarding address
pub const DEFAULT_COUNTRY: &str = "US";

/// Role granted to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Postal address of a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Company created by a user during onboarding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub address: Address,
}

impl Company {
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address,
        }
    }
}

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    /// Lowercased email address
    pub email: String,

    pub username: String,

    pub name: Option<String>,

    pub roles: Vec<Role>,

    pub company: Option<Company>,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// New user with the default `user` role
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into().to_lowercase(),
            username: username.into(),
            name: None,
            roles: vec![Role::User],
            company: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Add a role unless already present
    pub fn grant_role(&mut self, role: Role) {
        if !self.has_role(role) {
            self.roles.push(role);
        }
    }
}

/// Owner of a notes listing, with the number of notes they own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteOwner {
    pub username: String,
    pub name: Option<String>,
    pub note_count: usize,
}

impl NoteOwner {
    /// The full name when set, otherwise the username
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}
