use sqlx::SqlitePool;

use super::models::{NewProject, Project};
use crate::error::{AppError, Result};

pub async fn insert(
    pool: &SqlitePool,
    id: &str,
    username: &str,
    body: &NewProject,
) -> Result<Project> {
    sqlx::query(
        "INSERT INTO projects (id, project_path, total_coding_time, total_open_time, username) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&body.project_path)
    .bind(body.total_coding_time)
    .bind(body.total_open_time)
    .bind(username)
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Conflict("Project with this id already exists".to_string())
        }
        other => AppError::Database(other),
    })?;

    Ok(Project {
        id: id.to_string(),
        project_path: body.project_path.clone(),
        total_coding_time: body.total_coding_time,
        total_open_time: body.total_open_time,
        username: Some(username.to_string()),
    })
}

pub async fn fetch(pool: &SqlitePool, id: &str) -> Result<Option<Project>> {
    let project = sqlx::query_as::<_, Project>(
        "SELECT id, project_path, total_coding_time, total_open_time, username FROM projects WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(project)
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<()> {
    sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
