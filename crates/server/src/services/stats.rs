use sqlx::SqlitePool;

use super::{
    access::{ensure_access, FileAccess, Ownership},
    aggregate::aggregate,
};
use crate::{
    db::{
        models::{FileStats, NewFileStats, NewProjectStats, ProjectStats},
        stats,
    },
    error::{AppError, Result},
};

const PROJECT_FORBIDDEN: &str = "You do not have access to this project";
const FILE_FORBIDDEN: &str = "You do not have access to this file";

/// Saves a project for `user_email`. Nested files are attached to it whatever
/// project they name, and when any are present the project's daily stats are
/// rebuilt from theirs.
pub async fn create_project(
    pool: &SqlitePool,
    user_email: &str,
    body: NewProjectStats,
) -> Result<ProjectStats> {
    tracing::info!(
        "Creating project with path: {}",
        body.project_path.as_deref().unwrap_or_default()
    );

    let daily_stats = match body.files.as_deref() {
        Some(files) if !files.is_empty() => aggregate(files)?,
        _ => body.daily_stats.clone().unwrap_or_default(),
    };

    let id = stats::insert_project_stats(pool, user_email, &body, &daily_stats).await?;
    tracing::info!("Project created with ID: {}", id);

    stats::fetch_project_stats(pool, id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Project {id} vanished after insert")))
}

pub async fn get_project(pool: &SqlitePool, user_email: &str, id: i64) -> Result<ProjectStats> {
    tracing::info!("Fetching project with ID: {}", id);

    let project = stats::fetch_project_stats(pool, id).await?.ok_or_else(|| {
        tracing::warn!("Project with ID {} not found", id);
        AppError::NotFound("Project not found".to_string())
    })?;

    ensure_access(user_email, &project, PROJECT_FORBIDDEN).inspect_err(|_| {
        tracing::warn!("User {} does not have access to project ID {}", user_email, id);
    })?;

    Ok(project)
}

pub async fn list_projects(pool: &SqlitePool, user_email: &str) -> Result<Vec<ProjectStats>> {
    tracing::info!("Fetching all projects");

    let projects = stats::list_project_stats_by_owner(pool, user_email).await?;
    tracing::info!(
        "Retrieved {} projects for user {}",
        projects.len(),
        user_email
    );

    Ok(projects)
}

pub async fn delete_project(pool: &SqlitePool, user_email: &str, id: i64) -> Result<()> {
    tracing::info!("Deleting project with ID: {}", id);

    // Owner only, the project tree is not loaded
    let owner = stats::project_owner(pool, id).await?.ok_or_else(|| {
        tracing::warn!("Project with ID {} not found", id);
        AppError::NotFound("Project not found".to_string())
    })?;

    ensure_access(user_email, &Ownership::Owner(&owner), PROJECT_FORBIDDEN).inspect_err(|_| {
        tracing::warn!("User {} does not have access to project ID {}", user_email, id);
    })?;

    stats::delete_project_stats(pool, id).await?;
    tracing::info!("Project with ID {} deleted", id);

    Ok(())
}

/// Saves a file, optionally attached to a project the caller owns. Naming a
/// project that does not exist is refused like naming someone else's.
pub async fn create_file(
    pool: &SqlitePool,
    user_email: &str,
    body: NewFileStats,
) -> Result<FileStats> {
    let path = body.file_path.as_deref().unwrap_or_default();
    tracing::info!("Creating file with path: {}", path);

    if path.is_empty() {
        tracing::warn!("File path is missing");
        return Err(AppError::Validation("File path cannot be empty".to_string()));
    }

    // The parent check and the insert share one transaction
    let mut tx = pool.begin().await?;

    if let Some(project_id) = body.project_id {
        let owner = stats::project_owner(&mut *tx, project_id).await?;
        if owner.is_none() {
            tracing::warn!("Project with ID {} not found", project_id);
        }

        let parent = owner.as_deref().map_or(Ownership::Unclaimed, Ownership::Owner);
        ensure_access(user_email, &parent, PROJECT_FORBIDDEN).inspect_err(|_| {
            tracing::warn!(
                "User {} does not have access to project ID {}",
                user_email,
                project_id
            );
        })?;
    }

    let id = stats::insert_file_stats(&mut *tx, &body).await?;
    tx.commit().await?;
    tracing::info!("File created with ID: {}", id);

    stats::fetch_file_stats(pool, id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("File {id} vanished after insert")))
}

async fn load_accessible_file(
    pool: &SqlitePool,
    user_email: &str,
    id: i64,
) -> Result<FileStats> {
    let file = stats::fetch_file_stats(pool, id).await?.ok_or_else(|| {
        tracing::warn!("File with ID {} not found", id);
        AppError::NotFound("File not found".to_string())
    })?;

    let project_owner = match file.project_id {
        Some(project_id) => stats::project_owner(pool, project_id).await?,
        None => None,
    };

    let access = FileAccess {
        file: &file,
        project_owner: project_owner.as_deref(),
    };
    ensure_access(user_email, &access, FILE_FORBIDDEN).inspect_err(|_| {
        tracing::warn!(
            "User {} does not have access to file ID {} in project ID {:?}",
            user_email,
            id,
            file.project_id
        );
    })?;

    Ok(file)
}

pub async fn get_file(pool: &SqlitePool, user_email: &str, id: i64) -> Result<FileStats> {
    tracing::info!("Fetching file with ID: {}", id);
    load_accessible_file(pool, user_email, id).await
}

pub async fn delete_file(pool: &SqlitePool, user_email: &str, id: i64) -> Result<()> {
    tracing::info!("Deleting file with ID: {}", id);

    load_accessible_file(pool, user_email, id).await?;
    stats::delete_file_stats(pool, id).await?;
    tracing::info!("File with ID {} deleted", id);

    Ok(())
}
