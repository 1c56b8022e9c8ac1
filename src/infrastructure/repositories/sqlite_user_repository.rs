use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::repositories::{RepositoryError, RepositoryResult, UserRepository};
use crate::domain::user::{NewUser, Password, User, UserChanges, Username};

/// SQLite implementation of UserRepository
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Creates a new SqliteUserRepository
    ///
    /// The `users` table must already exist, see
    /// [`ensure_schema`](crate::infrastructure::database::ensure_schema).
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    active: bool,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(row.username)
            .map_err(|e| RepositoryError::Storage(format!("Invalid username in row {}: {}", row.id, e)))?;
        let password = Password::new(row.password)
            .map_err(|e| RepositoryError::Storage(format!("Invalid password in row {}: {}", row.id, e)))?;

        Ok(User {
            id: row.id,
            username,
            password,
            active: row.active,
        })
    }
}

fn storage_error(err: sqlx::Error, context: &str) -> RepositoryError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => {
            RepositoryError::UniqueViolation(db_err.message().to_string())
        }
        _ => RepositoryError::Storage(format!("{}: {}", context, err)),
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn insert(&self, user: NewUser) -> RepositoryResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password, active)
            VALUES (?1, ?2, ?3)
            RETURNING id, username, password, active
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.password.as_str())
        .bind(user.active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error(e, "Failed to create user"))?;

        row.try_into()
    }

    async fn list_all(&self) -> RepositoryResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password, active
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error(e, "Failed to list users"))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password, active
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error(e, "Failed to find user by id"))?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, id: i64, changes: UserChanges) -> RepositoryResult<Option<User>> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users SET
                username = COALESCE(?1, username),
                password = COALESCE(?2, password),
                active   = COALESCE(?3, active)
            WHERE id = ?4
            RETURNING id, username, password, active
            "#,
        )
        .bind(changes.username.as_ref().map(Username::as_str))
        .bind(changes.password.as_ref().map(Password::as_str))
        .bind(changes.active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error(e, "Failed to update user"))?;

        row.map(User::try_from).transpose()
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error(e, "Failed to delete user"))?;

        Ok(result.rows_affected() > 0)
    }
}
