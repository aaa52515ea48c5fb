use sqlx::SqlitePool;
use uuid::Uuid;

use super::access::ensure_access;
use crate::{
    db::{
        models::{NewProject, Project},
        projects,
    },
    error::{AppError, Result},
};

const FORBIDDEN: &str = "You do not have access to this project";

pub async fn create(pool: &SqlitePool, username: &str, body: NewProject) -> Result<Project> {
    let id = match body.id.as_deref() {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    };

    let project = projects::insert(pool, &id, username, &body).await?;
    tracing::info!("User project {} created for {}", project.id, username);

    Ok(project)
}

async fn load_owned(pool: &SqlitePool, username: &str, id: &str) -> Result<Project> {
    let project = projects::fetch(pool, id).await?.ok_or_else(|| {
        tracing::warn!("User project {} not found", id);
        AppError::NotFound("Project not found".to_string())
    })?;

    ensure_access(username, &project, FORBIDDEN).inspect_err(|_| {
        tracing::warn!("User {} does not own project {}", username, id);
    })?;

    Ok(project)
}

pub async fn get(pool: &SqlitePool, username: &str, id: &str) -> Result<Project> {
    load_owned(pool, username, id).await
}

pub async fn delete(pool: &SqlitePool, username: &str, id: &str) -> Result<()> {
    load_owned(pool, username, id).await?;
    projects::delete(pool, id).await?;
    tracing::info!("User project {} deleted", id);

    Ok(())
}
