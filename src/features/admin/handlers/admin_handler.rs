use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::guards::RequireAdmin;
use crate::features::charities::dtos::{
    AdminCharityDto, AdminCharityListDto, ApproveCharityDto, CharityResponseDto,
    CharityStatusFilter, RejectCharityDto,
};
use crate::features::charities::services::CharityService;
use crate::shared::types::ApiResponse;

/// List charity applications
///
/// Every application regardless of status, annotated with owner and reviewer
/// display names, plus status tallies over the unfiltered list. Supports an
/// exact-status filter.
#[utoipa::path(
    get,
    path = "/api/admin/charities",
    tag = "admin",
    params(CharityStatusFilter),
    responses(
        (status = 200, description = "Applications with tallies", body = ApiResponse<AdminCharityListDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_charities(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CharityService>>,
    Query(filter): Query<CharityStatusFilter>,
) -> Result<Json<ApiResponse<AdminCharityListDto>>, AppError> {
    let listing = service.get_admin_listing(filter.status).await?;
    Ok(Json(ApiResponse::success(Some(listing), None, None)))
}

/// Fetch one charity application
#[utoipa::path(
    get,
    path = "/api/admin/charities/{id}",
    tag = "admin",
    params(
        ("id" = Uuid, Path, description = "Charity ID")
    ),
    responses(
        (status = 200, description = "Application", body = ApiResponse<AdminCharityDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Charity not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_charity(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CharityService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AdminCharityDto>>, AppError> {
    let charity = service.get_admin_charity(id).await?;
    Ok(Json(ApiResponse::success(Some(charity), None, None)))
}

/// Approve a pending application
///
/// Stamps reviewer identity and timestamps, clears any previous rejection
/// reason. Only legal from `pending_review`.
#[utoipa::path(
    post,
    path = "/api/admin/charities/{id}/approve",
    tag = "admin",
    params(
        ("id" = Uuid, Path, description = "Charity ID")
    ),
    request_body = ApproveCharityDto,
    responses(
        (status = 200, description = "Charity approved", body = ApiResponse<CharityResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Charity not found"),
        (status = 409, description = "Charity is not pending review")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn approve_charity(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<CharityService>>,
    Path(id): Path<Uuid>,
    Json(dto): Json<ApproveCharityDto>,
) -> Result<Json<ApiResponse<CharityResponseDto>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let charity = service.approve(id, &user, dto.admin_notes).await?;

    Ok(Json(ApiResponse::success(
        Some(charity),
        Some("Charity approved".to_string()),
        None,
    )))
}

/// Reject a pending application
///
/// Requires a non-blank rejection reason, shown to the charity owner. Only
/// legal from `pending_review`.
#[utoipa::path(
    post,
    path = "/api/admin/charities/{id}/reject",
    tag = "admin",
    params(
        ("id" = Uuid, Path, description = "Charity ID")
    ),
    request_body = RejectCharityDto,
    responses(
        (status = 200, description = "Charity rejected", body = ApiResponse<CharityResponseDto>),
        (status = 400, description = "Blank rejection reason"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Charity not found"),
        (status = 409, description = "Charity is not pending review")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn reject_charity(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<CharityService>>,
    Path(id): Path<Uuid>,
    Json(dto): Json<RejectCharityDto>,
) -> Result<Json<ApiResponse<CharityResponseDto>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let charity = service
        .reject(id, &user, &dto.rejection_reason, dto.admin_notes)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(charity),
        Some("Charity rejected".to_string()),
        None,
    )))
}
