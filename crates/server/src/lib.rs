use std::path::Path;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower::util::ServiceExt;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;

use services::auth::{AuthService, TokenIssuer};

#[derive(Clone)]
pub struct AppState {
    pub db: db::Database,
    pub config: config::Config,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(db: db::Database, config: config::Config) -> Self {
        let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl_hours);
        Self {
            db,
            config,
            auth: AuthService::new(tokens),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // Build protected routes (require authentication)
    let protected_routes = Router::new()
        .nest("/projects", routes::projects::router())
        .nest("/files", routes::files::router())
        .nest("/user-projects", routes::user_projects::router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    // Build API router
    let api_router = Router::new()
        .nest("/auth", routes::auth::router())
        .merge(protected_routes);

    // Build main router with SPA fallback
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_router)
        .fallback(serve_spa)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn health_check() -> &'static str {
    "OK"
}

async fn serve_spa(State(state): State<AppState>, req: Request<Body>) -> Response {
    let static_dir = Path::new(&state.config.static_dir);

    // Try to serve static file first
    let relative = req.uri().path().trim_start_matches('/');
    if !relative.is_empty() && static_dir.join(relative).is_file() {
        return match ServeDir::new(static_dir).oneshot(req).await {
            Ok(res) => res.into_response(),
            Err(never) => match never {},
        };
    }

    // For SPA routes, serve index.html
    match tokio::fs::read(static_dir.join("index.html")).await {
        Ok(contents) => (
            StatusCode::OK,
            [("content-type", "text/html")],
            Body::from(contents),
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
