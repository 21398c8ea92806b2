//! API handlers for the rental REST endpoints

pub mod health;
pub mod openapi;
pub mod rentals;
pub mod reports;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    models::{AuthClaims, AuthContext},
    AppState,
};

/// Extractor for the caller's authorization context from a JWT bearer token
pub struct AuthenticatedUser(pub AuthContext);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = AuthClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims.into()))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Rentals
        .route("/rentals", get(rentals::list_rentals))
        .route("/rentals/rent", post(rentals::rent_book))
        .route("/rentals/return/:id", post(rentals::return_rental))
        .route("/rentals/export-rentals", get(rentals::export_rentals))
        .route(
            "/rentals/customer/:email/summary",
            get(rentals::customer_summary),
        )
        .route(
            "/rentals/:id",
            get(rentals::get_rental)
                .put(rentals::update_rental)
                .delete(rentals::delete_rental),
        )
        // Reports
        .route("/reports/export-rentals", get(reports::export_rentals))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
