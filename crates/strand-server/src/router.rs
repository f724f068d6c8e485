use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler;
use crate::state::AppState;

/// Build the axum router with all Strand endpoints.
///
/// The natural-language route is static, so it takes priority over the
/// `/strings/:value` capture.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/health", get(handler::health))
        .route("/info", get(handler::info))
        .route(
            "/strings",
            get(handler::list_strings).post(handler::create_string),
        )
        .route(
            "/strings/filter-by-natural-language",
            get(handler::filter_by_natural_language),
        )
        .route(
            "/strings/:value",
            get(handler::get_string).delete(handler::delete_string),
        )
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
