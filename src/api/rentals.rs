//! Rental management endpoints

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{RentalDto, RentalRequest},
    services::export::{ExportFile, XLSX_CONTENT_TYPE},
};

use super::AuthenticatedUser;

/// Acknowledgment for a new rental
#[derive(Serialize, Deserialize, ToSchema)]
pub struct RentalAck {
    /// Rental ID
    pub id: Uuid,
    /// Estimated price for the requested period
    pub price: Decimal,
    /// Status message
    pub message: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Rent a book
#[utoipa::path(
    post,
    path = "/rentals/rent",
    tag = "rentals",
    security(("bearer_auth" = [])),
    request_body = RentalRequest,
    responses(
        (status = 200, description = "Rental added", body = RentalAck),
        (status = 404, description = "Book or customer not found")
    )
)]
pub async fn rent_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Json(request): Json<RentalRequest>,
) -> AppResult<Json<RentalAck>> {
    let rental = state.services.rentals.rent(&auth, request).await?;

    Ok(Json(RentalAck {
        id: rental.id,
        price: rental.price,
        message: "Rental added successfully".to_string(),
    }))
}

/// Return a rented book
#[utoipa::path(
    post,
    path = "/rentals/return/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental closed with its final price", body = RentalDto),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn return_rental(
    State(state): State<crate::AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RentalDto>> {
    let rental = state.services.rentals.return_rental(&auth, id).await?;
    Ok(Json(rental))
}

/// Delete a rental
#[utoipa::path(
    delete,
    path = "/rentals/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental deleted", body = MessageResponse),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn delete_rental(
    State(state): State<crate::AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.rentals.delete_rental(&auth, id).await?;

    Ok(Json(MessageResponse {
        message: "Rental deleted successfully".to_string(),
    }))
}

/// Update a rental
#[utoipa::path(
    put,
    path = "/rentals/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Rental ID")),
    request_body = RentalRequest,
    responses(
        (status = 200, description = "Rental updated", body = MessageResponse),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Rental, book or customer not found")
    )
)]
pub async fn update_rental(
    State(state): State<crate::AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<RentalRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.services.rentals.update_rental(&auth, id, request).await?;

    Ok(Json(MessageResponse {
        message: "Rental updated successfully".to_string(),
    }))
}

/// List all active rentals
#[utoipa::path(
    get,
    path = "/rentals",
    tag = "rentals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active rentals", body = Vec<RentalDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_rentals(
    State(state): State<crate::AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
) -> AppResult<Json<Vec<RentalDto>>> {
    let rentals = state.services.rentals.list_rentals(&auth).await?;
    Ok(Json(rentals))
}

/// Get rental by ID
#[utoipa::path(
    get,
    path = "/rentals/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental details", body = RentalDto),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn get_rental(
    State(state): State<crate::AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RentalDto>> {
    let rental = state.services.rentals.get_rental(&auth, id).await?;
    Ok(Json(rental))
}

/// Active rentals of a customer looked up by email
#[utoipa::path(
    get,
    path = "/rentals/customer/{email}/summary",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Customer email")),
    responses(
        (status = 200, description = "Customer rentals", body = Vec<RentalDto>),
        (status = 404, description = "No customer with this email")
    )
)]
pub async fn customer_summary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<RentalDto>>> {
    let rentals = state.services.rentals.customer_summary(&auth, &email).await?;
    Ok(Json(rentals))
}

/// Download active rentals as a spreadsheet
#[utoipa::path(
    get,
    path = "/rentals/export-rentals",
    tag = "rentals",
    responses(
        (status = 200, description = "XLSX workbook")
    )
)]
pub async fn export_rentals(State(state): State<crate::AppState>) -> AppResult<Response> {
    let file = state.services.export.export_active().await?;
    Ok(file_response(file))
}

/// Attach download headers to an export
pub(crate) fn file_response(file: ExportFile) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.content,
    )
        .into_response()
}
