use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use campus_core::model::{Role, User, UserId};

use crate::repository::{CredentialRepository, StorageError, StoredCredentials};

use super::SqliteRepository;

fn ser_err(err: impl ToString) -> StorageError {
    StorageError::Serialization(err.to_string())
}

#[async_trait]
impl CredentialRepository for SqliteRepository {
    async fn load_credentials(&self) -> Result<Option<StoredCredentials>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT access_token, user_id, username, email, role, saved_at
            FROM client_session
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let access_token: Option<String> = row.try_get("access_token").map_err(ser_err)?;
        let Some(access_token) = access_token else {
            return Ok(None);
        };

        let user_id: i64 = row.try_get("user_id").map_err(ser_err)?;
        let username: String = row.try_get("username").map_err(ser_err)?;
        let email: String = row.try_get("email").map_err(ser_err)?;
        let role: String = row.try_get("role").map_err(ser_err)?;
        let saved_at: DateTime<Utc> = row.try_get("saved_at").map_err(ser_err)?;

        let user = User {
            id: UserId::new(u64::try_from(user_id).map_err(ser_err)?),
            username,
            email,
            role: Role::parse(&role).map_err(campus_core::Error::from)?,
        };

        Ok(Some(StoredCredentials {
            access_token,
            user,
            saved_at,
        }))
    }

    async fn save_credentials(&self, credentials: &StoredCredentials) -> Result<(), StorageError> {
        let user_id = i64::try_from(credentials.user.id.value()).map_err(ser_err)?;
        sqlx::query(
            r"
            INSERT INTO client_session (
                id, access_token, user_id, username, email, role, saved_at
            )
            VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                access_token = excluded.access_token,
                user_id = excluded.user_id,
                username = excluded.username,
                email = excluded.email,
                role = excluded.role,
                saved_at = excluded.saved_at
            ",
        )
        .bind(&credentials.access_token)
        .bind(user_id)
        .bind(&credentials.user.username)
        .bind(&credentials.user.email)
        .bind(credentials.user.role.as_str())
        .bind(credentials.saved_at)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM client_session WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }

    async fn last_page(&self) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT last_page FROM client_session WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        match row {
            Some(row) => row.try_get("last_page").map_err(ser_err),
            None => Ok(None),
        }
    }

    async fn save_last_page(&self, page: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO client_session (id, last_page)
            VALUES (1, ?1)
            ON CONFLICT(id) DO UPDATE SET last_page = excluded.last_page
            ",
        )
        .bind(page)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
