use std::collections::HashMap;

use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

use super::models::{
    DailyStats, FileStats, GitHubBadge, NewDailyStats, NewFileStats, NewGitHubBadge,
    NewProjectStats, ProjectStats,
};
use crate::error::Result;

const PROJECT_COLUMNS: &str =
    "id, project_path, total_coding_time, total_open_time, user_email";
const FILE_COLUMNS: &str = "id, file_path, open_time, coding_time, type, project_id";
const DAILY_COLUMNS: &str = "id, date, coding_time, open_time, project_id, file_id";

/// Persists a project together with its files, their daily stats, the
/// project-level daily stats and the optional badge in one transaction.
pub async fn insert_project_stats(
    pool: &SqlitePool,
    user_email: &str,
    project: &NewProjectStats,
    daily_stats: &[NewDailyStats],
) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let project_id = sqlx::query(
        "INSERT INTO project_stats (project_path, total_coding_time, total_open_time, user_email) VALUES (?, ?, ?, ?)",
    )
    .bind(&project.project_path)
    .bind(project.total_coding_time)
    .bind(project.total_open_time)
    .bind(user_email)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for file in project.files.iter().flatten() {
        insert_file_row(&mut *tx, file, Some(project_id)).await?;
    }

    for daily in daily_stats {
        insert_daily_row(&mut *tx, daily, Some(project_id), None).await?;
    }

    if let Some(badge) = &project.git_hub_badge {
        insert_badge_row(&mut *tx, badge, project_id).await?;
    }

    tx.commit().await?;

    Ok(project_id)
}

/// Persists a standalone file and its daily stats on `conn`. Callers run this
/// inside the transaction that checked the parent project.
pub async fn insert_file_stats(conn: &mut SqliteConnection, file: &NewFileStats) -> Result<i64> {
    insert_file_row(conn, file, file.project_id).await
}

async fn insert_file_row(
    conn: &mut SqliteConnection,
    file: &NewFileStats,
    project_id: Option<i64>,
) -> Result<i64> {
    let file_id = sqlx::query(
        "INSERT INTO file_stats (file_path, open_time, coding_time, type, project_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&file.file_path)
    .bind(file.open_time)
    .bind(file.coding_time)
    .bind(&file.kind)
    .bind(project_id)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    for daily in file.daily_stats.iter().flatten() {
        insert_daily_row(&mut *conn, daily, None, Some(file_id)).await?;
    }

    Ok(file_id)
}

async fn insert_daily_row(
    conn: &mut SqliteConnection,
    daily: &NewDailyStats,
    project_id: Option<i64>,
    file_id: Option<i64>,
) -> Result<i64> {
    let id = sqlx::query(
        "INSERT INTO daily_stats (date, coding_time, open_time, project_id, file_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&daily.date)
    .bind(daily.coding_time)
    .bind(daily.open_time)
    .bind(project_id)
    .bind(file_id)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

async fn insert_badge_row(
    conn: &mut SqliteConnection,
    badge: &NewGitHubBadge,
    project_id: i64,
) -> Result<i64> {
    let id = sqlx::query(
        "INSERT INTO github_badges (is_public, total_coding_time, project_id) VALUES (?, ?, ?)",
    )
    .bind(badge.is_public)
    .bind(badge.total_coding_time)
    .bind(project_id)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Loads a project with all of its owned rows.
pub async fn fetch_project_stats(pool: &SqlitePool, id: i64) -> Result<Option<ProjectStats>> {
    let project = sqlx::query_as::<_, ProjectStats>(&format!(
        "SELECT {PROJECT_COLUMNS} FROM project_stats WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match project {
        Some(project) => Ok(Some(load_children(pool, project).await?)),
        None => Ok(None),
    }
}

pub async fn list_project_stats_by_owner(
    pool: &SqlitePool,
    user_email: &str,
) -> Result<Vec<ProjectStats>> {
    let projects = sqlx::query_as::<_, ProjectStats>(&format!(
        "SELECT {PROJECT_COLUMNS} FROM project_stats WHERE user_email = ? ORDER BY id"
    ))
    .bind(user_email)
    .fetch_all(pool)
    .await?;

    let mut loaded = Vec::with_capacity(projects.len());
    for project in projects {
        loaded.push(load_children(pool, project).await?);
    }

    Ok(loaded)
}

async fn load_children(pool: &SqlitePool, mut project: ProjectStats) -> Result<ProjectStats> {
    let mut files = sqlx::query_as::<_, FileStats>(&format!(
        "SELECT {FILE_COLUMNS} FROM file_stats WHERE project_id = ? ORDER BY id"
    ))
    .bind(project.id)
    .fetch_all(pool)
    .await?;

    let file_daily = sqlx::query_as::<_, DailyStats>(
        r#"
        SELECT d.id, d.date, d.coding_time, d.open_time, d.project_id, d.file_id
        FROM daily_stats d
        JOIN file_stats f ON d.file_id = f.id
        WHERE f.project_id = ?
        ORDER BY d.id
        "#,
    )
    .bind(project.id)
    .fetch_all(pool)
    .await?;

    let mut by_file: HashMap<i64, Vec<DailyStats>> = HashMap::new();
    for daily in file_daily {
        if let Some(file_id) = daily.file_id {
            by_file.entry(file_id).or_default().push(daily);
        }
    }
    for file in &mut files {
        file.daily_stats = by_file.remove(&file.id).unwrap_or_default();
    }

    project.files = files;
    project.daily_stats = sqlx::query_as::<_, DailyStats>(&format!(
        "SELECT {DAILY_COLUMNS} FROM daily_stats WHERE project_id = ? AND file_id IS NULL ORDER BY id"
    ))
    .bind(project.id)
    .fetch_all(pool)
    .await?;

    project.git_hub_badge = sqlx::query_as::<_, GitHubBadge>(
        "SELECT id, is_public, total_coding_time, project_id FROM github_badges WHERE project_id = ?",
    )
    .bind(project.id)
    .fetch_optional(pool)
    .await?;

    Ok(project)
}

/// Owner of a project, `None` if the project does not exist.
pub async fn project_owner<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<String>> {
    let owner = sqlx::query_scalar::<_, String>("SELECT user_email FROM project_stats WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(owner)
}

/// Deleting a project removes its files, badge and every daily row below it.
pub async fn delete_project_stats(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM project_stats WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn fetch_file_stats(pool: &SqlitePool, id: i64) -> Result<Option<FileStats>> {
    let file = sqlx::query_as::<_, FileStats>(&format!(
        "SELECT {FILE_COLUMNS} FROM file_stats WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(mut file) = file else {
        return Ok(None);
    };

    file.daily_stats = sqlx::query_as::<_, DailyStats>(&format!(
        "SELECT {DAILY_COLUMNS} FROM daily_stats WHERE file_id = ? ORDER BY id"
    ))
    .bind(file.id)
    .fetch_all(pool)
    .await?;

    Ok(Some(file))
}

/// Deletes a file and its daily rows. The parent project is left alone.
pub async fn delete_file_stats(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM file_stats WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
