use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::{error::Result, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Credentials for both registration and login. The username is the
/// user's email address.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(alias = "email")]
    pub username: Option<String>,
    pub password: Option<String>,
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<&'static str> {
    state
        .auth
        .register(
            &state.db.pool,
            body.username.as_deref(),
            body.password.as_deref(),
        )
        .await?;

    Ok("User registered")
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<String> {
    state
        .auth
        .login(
            &state.db.pool,
            body.username.as_deref(),
            body.password.as_deref(),
        )
        .await
}
