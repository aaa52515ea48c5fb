use chrono::Utc;
use sqlx::SqlitePool;

use super::models::User;
use crate::error::{AppError, Result};

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT username, password_hash, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn exists(pool: &SqlitePool, username: &str) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Inserts a new user. A duplicate username surfaces as `AppError::Conflict`.
pub async fn insert(pool: &SqlitePool, username: &str, password_hash: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();

    sqlx::query("INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)")
        .bind(username)
        .bind(password_hash)
        .bind(&now)
        .execute(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("User with this email already exists".to_string())
            }
            other => AppError::Database(other),
        })?;

    Ok(())
}
