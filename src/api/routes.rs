use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog
        .route("/mods", get(handlers::list_mods).post(handlers::create_mod))
        .route("/mods/:id", get(handlers::get_mod))
        .route("/mods/:id/downloads", post(handlers::record_download))
        .route("/mods/:id/ratings", post(handlers::rate_mod))
        // Users
        .route("/users", post(handlers::create_user))
        .route("/users/:id", get(handlers::get_user).put(handlers::update_user))
        .route("/users/:id/preferences", put(handlers::update_preferences))
        // Recommendations
        .route("/recommendations", post(handlers::recommend))
        // Assistant
        .route("/assistant", post(handlers::ask_assistant))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}
