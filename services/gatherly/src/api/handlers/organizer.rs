//! Organizer-scoped endpoints.
//!
//! Routes here sit behind the bearer middleware like every protected route
//! and additionally require the `organizer` role. An attendee token gets the
//! same generic 401 as a bad token.

use axum::{Json, extract::Extension, response::IntoResponse};
use serde::Serialize;
use session_token::{Principal, Role};
use utoipa::ToSchema;

use super::auth::{
    bearer::require_role,
    types::UserResponse,
};
use crate::api::error::{ApiError, ErrorResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub organizer: UserResponse,
}

#[utoipa::path(
    get,
    path = "/v1/organizer/dashboard",
    responses(
        (status = 200, description = "Organizer dashboard context.", body = DashboardResponse),
        (status = 401, description = "Missing, invalid, or attendee-scoped token.", body = ErrorResponse),
    ),
    tag = "organizer"
)]
pub async fn dashboard(
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&principal, Role::Organizer)?;

    Ok(Json(DashboardResponse {
        organizer: UserResponse::from(&principal),
    }))
}
