use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        username VARCHAR(80)  NOT NULL UNIQUE,
        password VARCHAR(120) NOT NULL,
        active   BOOLEAN      NOT NULL DEFAULT 1
    )
"#;

/// Opens a connection pool to the SQLite store at `database_url`
///
/// The database file is created if it does not exist. In-memory databases
/// live only as long as their connection, so they get a single connection
/// that is never reaped.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    pool_options.connect_with(options).await
}

/// Creates the `users` table if it is missing
///
/// Idempotent. An existing table is left as is, whatever its shape.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA).execute(pool).await?;
    tracing::debug!("users table ready");
    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:users?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://users.db"));
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let pool = connect("sqlite::memory:").await.expect("connect");

        ensure_schema(&pool).await.expect("first run");
        ensure_schema(&pool).await.expect("second run");

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'users'",
        )
        .fetch_one(&pool)
        .await
        .expect("query sqlite_master");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn ensure_schema_keeps_existing_rows() {
        let pool = connect("sqlite::memory:").await.expect("connect");
        ensure_schema(&pool).await.expect("create");

        sqlx::query("INSERT INTO users (username, password) VALUES ('alice', 'pw1')")
            .execute(&pool)
            .await
            .expect("insert");

        ensure_schema(&pool).await.expect("re-run");

        let (active,): (bool,) = sqlx::query_as("SELECT active FROM users WHERE username = 'alice'")
            .fetch_one(&pool)
            .await
            .expect("row survives");
        assert!(active, "active defaults to true");
    }
}
