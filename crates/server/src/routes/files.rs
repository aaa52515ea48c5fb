use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::{
    db::models::{FileStats, NewFileStats},
    error::Result,
    middleware::auth::AuthUser,
    services::stats,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_file))
        .route("/:id", get(get_file).delete(delete_file))
}

async fn create_file(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<NewFileStats>,
) -> Result<Json<FileStats>> {
    let file = stats::create_file(&state.db.pool, &user.email, body).await?;
    Ok(Json(file))
}

async fn get_file(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<FileStats>> {
    let file = stats::get_file(&state.db.pool, &user.email, id).await?;
    Ok(Json(file))
}

async fn delete_file(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<&'static str> {
    stats::delete_file(&state.db.pool, &user.email, id).await?;
    Ok("File deleted")
}
