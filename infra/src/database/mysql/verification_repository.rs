//! MySQL implementation of the VerificationRepository trait.
//!
//! One row per `(target, type)`, enforced by a unique key. Upserts replace
//! the row in place, including its id, so a delete keyed on the id of a
//! superseded record removes nothing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use nk_core::domain::entities::verification::{VerificationRecord, VerificationType};
use nk_core::errors::DomainError;
use nk_core::repositories::VerificationRepository;

use crate::database::query_error;

/// MySQL implementation of VerificationRepository
pub struct MySqlVerificationRepository {
    pool: MySqlPool,
}

impl MySqlVerificationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<VerificationRecord, DomainError> {
        let decode = |e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to decode verification row: {}", e),
        };

        let id: String = row.try_get("id").map_err(decode)?;
        let verification_type: String = row.try_get("type").map_err(decode)?;

        Ok(VerificationRecord {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid verification UUID: {}", e),
            })?,
            target: row.try_get("target").map_err(decode)?,
            verification_type: verification_type
                .parse::<VerificationType>()
                .map_err(|message| DomainError::Internal { message })?,
            code: row.try_get("code").map_err(decode)?,
            secret_hash: row.try_get("secret_hash").map_err(decode)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(decode)?,
            expires_at: row.try_get::<DateTime<Utc>, _>("expires_at").map_err(decode)?,
        })
    }
}

#[async_trait]
impl VerificationRepository for MySqlVerificationRepository {
    async fn upsert(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO verifications (
                id, target, type, code, secret_hash, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                id = VALUES(id),
                code = VALUES(code),
                secret_hash = VALUES(secret_hash),
                created_at = VALUES(created_at),
                expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.target)
            .bind(record.verification_type.as_str())
            .bind(&record.code)
            .bind(&record.secret_hash)
            .bind(record.created_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("upsert verification", e))?;

        Ok(())
    }

    async fn find(
        &self,
        target: &str,
        verification_type: VerificationType,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        let query = r#"
            SELECT id, target, type, code, secret_hash, created_at, expires_at
            FROM verifications
            WHERE target = ? AND type = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(target)
            .bind(verification_type.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("find verification", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn delete(&self, record: &VerificationRecord) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM verifications WHERE id = ?")
            .bind(record.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("delete verification", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verifications WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("delete expired verifications", e))?;

        Ok(result.rows_affected())
    }
}
