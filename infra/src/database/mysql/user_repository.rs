//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, Row, Transaction};
use uuid::Uuid;

use nk_core::domain::entities::user::{Address, Company, NoteOwner, Role, User};
use nk_core::errors::DomainError;
use nk_core::repositories::UserRepository;

use crate::database::query_error;

const USER_COLUMNS: &str = r#"
    u.id, u.email, u.username, u.name, u.created_at,
    c.id AS company_id, c.name AS company_name,
    a.line1, a.line2, a.city, a.state, a.zip_code, a.country
"#;

const USER_JOINS: &str = r#"
    FROM users u
    LEFT JOIN companies c ON c.id = u.company_id
    LEFT JOIN addresses a ON a.id = c.address_id
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn parse_uuid(value: &str) -> Result<Uuid, DomainError> {
        Uuid::parse_str(value).map_err(|e| DomainError::Internal {
            message: format!("Invalid UUID in users table: {}", e),
        })
    }

    /// Convert a joined user row into a User, without roles
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let decode = |e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to decode user row: {}", e),
        };

        let id: String = row.try_get("id").map_err(decode)?;
        let company_id: Option<String> = row.try_get("company_id").map_err(decode)?;

        let company = match company_id {
            Some(company_id) => Some(Company {
                id: Self::parse_uuid(&company_id)?,
                name: row.try_get("company_name").map_err(decode)?,
                address: Address {
                    line1: row.try_get("line1").map_err(decode)?,
                    line2: row.try_get("line2").map_err(decode)?,
                    city: row.try_get("city").map_err(decode)?,
                    state: row.try_get("state").map_err(decode)?,
                    zip_code: row.try_get("zip_code").map_err(decode)?,
                    country: row.try_get("country").map_err(decode)?,
                },
            }),
            None => None,
        };

        Ok(User {
            id: Self::parse_uuid(&id)?,
            email: row.try_get("email").map_err(decode)?,
            username: row.try_get("username").map_err(decode)?,
            name: row.try_get("name").map_err(decode)?,
            roles: Vec::new(),
            company,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(decode)?,
        })
    }

    async fn load_roles(&self, user_id: Uuid) -> Result<Vec<Role>, DomainError> {
        let rows = sqlx::query("SELECT role FROM user_roles WHERE user_id = ? ORDER BY role DESC")
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("load user roles", e))?;

        let mut roles = Vec::with_capacity(rows.len());
        for row in rows {
            let role: String = row
                .try_get("role")
                .map_err(|e| query_error("decode user role", e))?;
            match role.parse::<Role>() {
                Ok(parsed) => roles.push(parsed),
                Err(_) => tracing::warn!(user_id = %user_id, role = %role, "Skipping unknown role"),
            }
        }
        Ok(roles)
    }

    async fn find_one(&self, condition: &str, value: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} {} WHERE {} LIMIT 1", USER_COLUMNS, USER_JOINS, condition);
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("find user", e))?;

        match row {
            Some(row) => {
                let mut user = Self::row_to_user(&row)?;
                user.roles = self.load_roles(user.id).await?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn grant_role_in(
        tx: &mut Transaction<'_, MySql>,
        user_id: Uuid,
        role: Role,
    ) -> Result<(), DomainError> {
        sqlx::query("INSERT IGNORE INTO user_roles (user_id, role) VALUES (?, ?)")
            .bind(user_id.to_string())
            .bind(role.as_str())
            .execute(&mut **tx)
            .await
            .map_err(|e| query_error("grant role", e))?;
        Ok(())
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("u.id = ?", &id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("u.email = ?", &email.to_lowercase()).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error("begin transaction", e))?;

        let result = sqlx::query(
            "INSERT INTO users (id, email, username, name, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.name)
        .bind(user.created_at)
        .execute(&mut *tx)
        .await;

        if let Err(e) = result {
            if is_unique_violation(&e) {
                return Err(DomainError::Conflict {
                    message: "A user already exists with this email or username".to_string(),
                });
            }
            return Err(query_error("create user", e));
        }

        for role in &user.roles {
            Self::grant_role_in(&mut tx, user.id, *role).await?;
        }

        tx.commit()
            .await
            .map_err(|e| query_error("commit user", e))?;

        tracing::info!(user_id = %user.id, event = "user_created", "Created user");
        Ok(user)
    }

    async fn attach_company(
        &self,
        user_id: Uuid,
        company: Company,
        role: Role,
    ) -> Result<User, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error("begin transaction", e))?;

        let exists = sqlx::query("SELECT id FROM users WHERE id = ? FOR UPDATE")
            .bind(user_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| query_error("lock user", e))?;
        if exists.is_none() {
            return Err(DomainError::not_found(format!("user {}", user_id)));
        }

        let address_id = Uuid::new_v4();
        let address = &company.address;
        sqlx::query(
            r#"
            INSERT INTO addresses (id, line1, line2, city, state, zip_code, country)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(address_id.to_string())
        .bind(&address.line1)
        .bind(&address.line2)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zip_code)
        .bind(&address.country)
        .execute(&mut *tx)
        .await
        .map_err(|e| query_error("create address", e))?;

        sqlx::query("INSERT INTO companies (id, name, address_id) VALUES (?, ?, ?)")
            .bind(company.id.to_string())
            .bind(&company.name)
            .bind(address_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_error("create company", e))?;

        sqlx::query("UPDATE users SET company_id = ? WHERE id = ?")
            .bind(company.id.to_string())
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_error("attach company", e))?;

        Self::grant_role_in(&mut tx, user_id, role).await?;

        tx.commit()
            .await
            .map_err(|e| query_error("commit company", e))?;

        self.find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("user {}", user_id)))
    }

    async fn find_note_owner(&self, username: &str) -> Result<Option<NoteOwner>, DomainError> {
        let query = r#"
            SELECT u.username, u.name, COUNT(n.id) AS note_count
            FROM users u
            LEFT JOIN notes n ON n.owner_id = u.id
            WHERE u.username = ?
            GROUP BY u.id, u.username, u.name
        "#;

        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("find note owner", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let note_count: i64 = row
            .try_get("note_count")
            .map_err(|e| query_error("decode note count", e))?;

        Ok(Some(NoteOwner {
            username: row
                .try_get("username")
                .map_err(|e| query_error("decode username", e))?,
            name: row
                .try_get("name")
                .map_err(|e| query_error("decode name", e))?,
            note_count: usize::try_from(note_count).unwrap_or(0),
        }))
    }
}
