//! Route definitions.

use crate::handlers::{self, auth, files};
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the service router.
pub fn create_router(state: AppState) -> Router {
    let server = &state.config().server;
    let max_upload = server.max_upload_bytes;
    let cors = server.cors;

    let mut router = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/list_users", get(auth::list_users))
        .route(
            "/upload",
            post(files::upload).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route("/list_files", get(files::list_files))
        .route("/download/{id}", get(files::download))
        .route("/healthz", get(handlers::healthz))
        .with_state(state);

    if cors {
        router = router.layer(CorsLayer::permissive());
    }
    router.layer(TraceLayer::new_for_http())
}
