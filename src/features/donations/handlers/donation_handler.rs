use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::guards::{RequireCharity, RequireDonor};
use crate::features::donations::dtos::{
    CharityDonationsDto, CreateDonationDto, DonationExportParams, DonationResponseDto,
    DonationWithCharityDto, DonorSummaryDto,
};
use crate::features::donations::services::DonationService;
use crate::shared::types::{ApiResponse, Meta};

/// Record a donation
///
/// The amount is a major-unit decimal string; donations are simulated and
/// land directly in `paid` status against an approved charity.
#[utoipa::path(
    post,
    path = "/api/donations",
    tag = "donations",
    request_body = CreateDonationDto,
    responses(
        (status = 201, description = "Donation recorded", body = ApiResponse<DonationResponseDto>),
        (status = 400, description = "Invalid amount"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Onboarding not completed"),
        (status = 404, description = "No approved charity with this id")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_donation(
    RequireDonor(user): RequireDonor,
    State(service): State<Arc<DonationService>>,
    Json(dto): Json<CreateDonationDto>,
) -> Result<(StatusCode, Json<ApiResponse<DonationResponseDto>>), AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let donation = service.create_donation(&user, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(donation), None, None)),
    ))
}

/// List the caller's donations, newest first
#[utoipa::path(
    get,
    path = "/api/donations",
    tag = "donations",
    responses(
        (status = 200, description = "Donation history", body = ApiResponse<Vec<DonationWithCharityDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_my_donations(
    RequireDonor(user): RequireDonor,
    State(service): State<Arc<DonationService>>,
) -> Result<Json<ApiResponse<Vec<DonationWithCharityDto>>>, AppError> {
    let donations = service.list_for_donor(user.user_id).await?;
    let total = donations.len() as i64;
    let items: Vec<DonationWithCharityDto> = donations.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Derived analytics for the donor dashboard
///
/// Running total, top-5 charities, trailing six monthly buckets and the
/// current South African tax-year total.
#[utoipa::path(
    get,
    path = "/api/donations/summary",
    tag = "donations",
    responses(
        (status = 200, description = "Donor summary", body = ApiResponse<DonorSummaryDto>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_summary(
    RequireDonor(user): RequireDonor,
    State(service): State<Arc<DonationService>>,
) -> Result<Json<ApiResponse<DonorSummaryDto>>, AppError> {
    let summary = service.summary_for_donor(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

/// Export the caller's donations as CSV
///
/// Optionally narrowed to one charity and/or one calendar year; served as a
/// `donations-{date}.csv` attachment.
#[utoipa::path(
    get,
    path = "/api/donations/export",
    tag = "donations",
    params(DonationExportParams),
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn export_csv(
    RequireDonor(user): RequireDonor,
    State(service): State<Arc<DonationService>>,
    Query(params): Query<DonationExportParams>,
) -> Result<Response, AppError> {
    let (filename, csv) = service
        .export_csv(user.user_id, params.charity_id, params.year)
        .await?;

    let mut response = Response::new(csv.into());
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename={}", filename))
            .map_err(|e| AppError::Internal(format!("Invalid export filename: {}", e)))?,
    );

    Ok(response)
}

/// List donations received by a charity
///
/// Owner (or admin) only; each entry carries the donor's display name.
#[utoipa::path(
    get,
    path = "/api/charities/{id}/donations",
    tag = "donations",
    params(
        ("id" = Uuid, Path, description = "Charity ID")
    ),
    responses(
        (status = 200, description = "Received donations", body = ApiResponse<CharityDonationsDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Caller does not own this charity")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_charity_donations(
    RequireCharity(user): RequireCharity,
    State(service): State<Arc<DonationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CharityDonationsDto>>, AppError> {
    let donations = service.list_for_charity(id, &user).await?;
    Ok(Json(ApiResponse::success(Some(donations), None, None)))
}
