use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::{
    db::models::{NewProject, Project},
    error::Result,
    middleware::auth::AuthUser,
    services::projects,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_project))
        .route("/:id", get(get_project).delete(delete_project))
}

async fn create_project(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<NewProject>,
) -> Result<Json<Project>> {
    let project = projects::create(&state.db.pool, &user.email, body).await?;
    Ok(Json(project))
}

async fn get_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Project>> {
    let project = projects::get(&state.db.pool, &user.email, &id).await?;
    Ok(Json(project))
}

async fn delete_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<&'static str> {
    projects::delete(&state.db.pool, &user.email, &id).await?;
    Ok("Project deleted")
}
