//! SQLite user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

use crate::domain::user::{NewUser, User, UserFilter, UserId, UserRepository};
use crate::domain::DomainError;

const FIND_BY_ID: &str = r#"
    SELECT id, email, password, name, is_admin, created_at, updated_at
    FROM users
    WHERE id = ?
    LIMIT 1
"#;

const FIND_BY_EMAIL: &str = r#"
    SELECT id, email, password, name, is_admin, created_at, updated_at
    FROM users
    WHERE email = ?
    LIMIT 1
"#;

/// SQLite implementation of UserRepository
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_one(&self, filter: &UserFilter) -> Result<Option<User>, DomainError> {
        let query = match filter {
            UserFilter::Id(id) => sqlx::query(FIND_BY_ID).bind(id.value()),
            UserFilter::Email(email) => sqlx::query(FIND_BY_EMAIL).bind(email.as_str()),
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn insert_one(&self, user: NewUser) -> Result<User, DomainError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password, name, is_admin, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.name())
        .bind(user.is_admin())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::conflict(
                format!("Email '{}' already exists", user.email()),
            ),
            _ => DomainError::storage(format!("Failed to create user: {}", e)),
        })?;

        let id = UserId::new(result.last_insert_rowid());
        Ok(User::from_new(id, user, now))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database unreachable: {}", e)))?;

        Ok(())
    }
}

fn row_to_user(row: &SqliteRow) -> Result<User, DomainError> {
    let map_err = |e: sqlx::Error| DomainError::storage(format!("Failed to read user row: {}", e));

    let id: i64 = row.try_get("id").map_err(map_err)?;
    let email: String = row.try_get("email").map_err(map_err)?;
    let password_hash: String = row.try_get("password").map_err(map_err)?;
    let name: String = row.try_get("name").map_err(map_err)?;
    let is_admin: bool = row.try_get("is_admin").map_err(map_err)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(map_err)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(map_err)?;

    let user = User::from_new(
        UserId::new(id),
        NewUser::new(email, password_hash, name),
        created_at,
    )
    .with_updated_at(updated_at)
    .with_admin(is_admin);

    Ok(user)
}
