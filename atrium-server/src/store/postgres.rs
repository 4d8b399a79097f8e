//! Postgres-backed user store.

use chrono::{DateTime, Utc};
use sqlx::{
    PgPool,
    postgres::{PgPoolOptions, PgRow},
    Row,
};
use tracing::info;

use atrium_model::{User, UserId};

use super::{NewUser, StoreError, UserStore};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    /// Connect to `url` and bring the schema up to date.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new().max_connections(10).connect(url).await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Database(sqlx::Error::Migrate(Box::new(e))))?;

        info!("connected to postgres user store");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn row_to_user(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get::<i64, _>("id")?,
        username: row.try_get("username")?,
        display_name: row.try_get("display_name")?,
        email: row.try_get("email")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        last_login: row.try_get::<Option<DateTime<Utc>>, _>("last_login")?,
        is_active: row.try_get("is_active")?,
    })
}

const USER_COLUMNS: &str =
    "id, username, display_name, email, created_at, updated_at, last_login, is_active";

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query(
            "INSERT INTO users (username, display_name, email, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, username, display_name, email, created_at, updated_at, \
                       last_login, is_active",
        )
        .bind(&new_user.username)
        .bind(&new_user.display_name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(format!("username '{}' already exists", new_user.username))
            }
            _ => StoreError::Database(err),
        })?;

        Ok(row_to_user(&row)?)
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| row_to_user(row).map_err(StoreError::from))
            .collect()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_user).transpose().map_err(StoreError::from)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_user).transpose().map_err(StoreError::from)
    }

    async fn password_hash(&self, id: UserId) -> Result<Option<String>, StoreError> {
        let hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hash)
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE users \
             SET display_name = $2, email = $3, is_active = $4, updated_at = $5 \
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.display_name)
        .bind(&user.email)
        .bind(user.is_active)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::user_not_found(user.id));
        }
        Ok(())
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::user_not_found(id));
        }
        Ok(())
    }

    async fn remove(&self, id: UserId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::user_not_found(id));
        }
        Ok(())
    }

    async fn mark_login(&self, id: UserId) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET last_login = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
