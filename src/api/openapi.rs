//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, rentals, reports};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book Rental API",
        version = "1.0.0",
        description = "Book rental management and reporting REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Rentals
        rentals::rent_book,
        rentals::return_rental,
        rentals::delete_rental,
        rentals::update_rental,
        rentals::list_rentals,
        rentals::get_rental,
        rentals::customer_summary,
        rentals::export_rentals,
        // Reports
        reports::export_rentals,
    ),
    components(
        schemas(
            crate::models::RentalRequest,
            crate::models::RentalDto,
            rentals::RentalAck,
            rentals::MessageResponse,
            health::HealthResponse,
            health::ReadinessResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rentals", description = "Book rental management"),
        (name = "reports", description = "Spreadsheet reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
