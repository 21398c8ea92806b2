//! Reporting endpoints

use axum::{extract::State, response::Response};

use crate::error::AppResult;

use super::{rentals::file_response, AuthenticatedUser};

/// Download active and returned rentals as a spreadsheet
#[utoipa::path(
    get,
    path = "/reports/export-rentals",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "XLSX workbook"),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn export_rentals(
    State(state): State<crate::AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
) -> AppResult<Response> {
    let file = state.services.export.export_report(&auth).await?;
    Ok(file_response(file))
}
