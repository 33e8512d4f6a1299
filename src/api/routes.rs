//! Application route configuration.

use axum::{middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{auth_routes, session_routes};
use super::middleware::auth_middleware;
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::SERVICE_NAME;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Public signup/login plus the token-protected identity route, all
    // under the /api/auth prefix
    let auth = auth_routes().merge(session_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), auth_middleware),
    ));

    Router::new()
        .route("/api/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/auth", auth)
        // Browser clients may call /api/* from any origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
    status: &'static str,
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME,
        status: "healthy",
    })
}
