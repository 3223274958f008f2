pub mod auth;
pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;
pub mod token;

use crate::error::ApiError;
use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{login_handler, register_handler};
use middleware::require_auth;
use rest::{
    delete_contract_handler, generate_review_handler, get_review_handler,
    list_contracts_handler, upload_contract_handler, ApiDoc,
};
use state::AppState;

/// Builds the complete application router: public auth routes, token-gated
/// contract routes, the upload body limit, CORS, and the Swagger UI.
pub fn app_router(app_state: Arc<AppState>) -> Result<Router, ApiError> {
    let allowed_origin = app_state
        .config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|e| ApiError::Internal(format!("Invalid CORS_ORIGIN: {}", e)))?;
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler));

    // Protected routes (bearer token required)
    let protected_routes = Router::new()
        .route("/api/contracts/upload", post(upload_contract_handler))
        .route("/api/contracts", get(list_contracts_handler))
        .route("/api/contracts/{id}", delete(delete_contract_handler))
        .route(
            "/api/contracts/{id}/review",
            get(get_review_handler).post(generate_review_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    // Combine API routes
    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(app_state.config.max_upload_bytes))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Ok(Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())))
}
