use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{
    db::models::{NewProjectStats, ProjectStats},
    error::Result,
    middleware::auth::AuthUser,
    services::stats,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/:id", get(get_project).delete(delete_project))
}

async fn list_projects(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ProjectStats>>> {
    let projects = stats::list_projects(&state.db.pool, &user.email).await?;
    Ok(Json(projects))
}

// Any `userEmail` in the body is ignored; the owner is always the caller.
async fn create_project(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<NewProjectStats>,
) -> Result<Json<ProjectStats>> {
    let project = stats::create_project(&state.db.pool, &user.email, body).await?;
    Ok(Json(project))
}

async fn get_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ProjectStats>> {
    let project = stats::get_project(&state.db.pool, &user.email, id).await?;
    Ok(Json(project))
}

async fn delete_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<&'static str> {
    stats::delete_project(&state.db.pool, &user.email, id).await?;
    Ok("Project deleted")
}
