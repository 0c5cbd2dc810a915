use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::guards::RequireCharity;
use crate::features::charities::dtos::{
    CharityApplicationDto, CharityResponseDto, CharitySummaryDto, PhotoUpload,
};
use crate::features::charities::services::CharityService;
use crate::shared::currency::Currency;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List approved charities
///
/// The public, donor-facing listing: approved charities only, most recent
/// first.
#[utoipa::path(
    get,
    path = "/api/charities",
    tag = "charities",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Approved charities", body = ApiResponse<Vec<CharitySummaryDto>>)
    )
)]
pub async fn list_charities(
    State(service): State<Arc<CharityService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<CharitySummaryDto>>>, AppError> {
    let (charities, total) = service.get_public_listing(&pagination).await?;

    Ok(Json(ApiResponse::success(
        Some(charities),
        None,
        Some(Meta { total }),
    )))
}

/// Fetch one approved charity
#[utoipa::path(
    get,
    path = "/api/charities/{id}",
    tag = "charities",
    params(
        ("id" = Uuid, Path, description = "Charity ID")
    ),
    responses(
        (status = 200, description = "Charity found", body = ApiResponse<CharitySummaryDto>),
        (status = 404, description = "No approved charity with this id")
    )
)]
pub async fn get_charity(
    State(service): State<Arc<CharityService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CharitySummaryDto>>, AppError> {
    let charity = service.get_public_charity(id).await?;
    Ok(Json(ApiResponse::success(Some(charity), None, None)))
}

/// Submit a charity application
///
/// Accepts multipart/form-data with the application fields and an optional
/// `photo` part. A failed photo upload does not fail the application.
#[utoipa::path(
    post,
    path = "/api/charities/apply",
    tag = "charities",
    responses(
        (status = 201, description = "Application submitted", body = ApiResponse<CharityResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Onboarding not completed"),
        (status = 409, description = "Caller already owns a charity")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_application(
    RequireCharity(user): RequireCharity,
    State(service): State<Arc<CharityService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<CharityResponseDto>>), AppError> {
    let mut public_name = String::new();
    let mut legal_name = String::new();
    let mut registration_number = String::new();
    let mut description = String::new();
    let mut contact_email = String::new();
    let mut website: Option<String> = None;
    let mut contact_phone: Option<String> = None;
    let mut currency: Option<Currency> = None;
    let mut photo: Option<PhotoUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "photo" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "logo".to_string());
                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read photo bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read photo data: {}", e))
                })?;

                photo = Some(PhotoUpload {
                    data: data.to_vec(),
                    content_type,
                    file_name,
                });
            }
            name => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read field '{}': {}", name, e))
                })?;

                match name {
                    "publicName" => public_name = text,
                    "legalName" => legal_name = text,
                    "registrationNumber" => registration_number = text,
                    "description" => description = text,
                    "contactEmail" => contact_email = text,
                    "website" if !text.is_empty() => website = Some(text),
                    "contactPhone" if !text.is_empty() => contact_phone = Some(text),
                    "currency" if !text.is_empty() => currency = Some(Currency::from_code(&text)),
                    other => debug!("Ignoring unknown field: {}", other),
                }
            }
        }
    }

    let dto = CharityApplicationDto {
        public_name,
        legal_name,
        registration_number,
        description,
        contact_email,
        website,
        contact_phone,
        currency,
    };

    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let charity = service.submit_application(&user, dto, photo).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(charity), None, None)),
    ))
}

/// Fetch the caller's own charity
#[utoipa::path(
    get,
    path = "/api/charities/mine",
    tag = "charities",
    responses(
        (status = 200, description = "Owned charity", body = ApiResponse<CharityResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Caller owns no charity")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_my_charity(
    RequireCharity(user): RequireCharity,
    State(service): State<Arc<CharityService>>,
) -> Result<Json<ApiResponse<CharityResponseDto>>, AppError> {
    let charity = service.get_owned_by_user(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(charity), None, None)))
}

/// Upload or replace the charity photo
///
/// Accepts multipart/form-data with a single `photo` part
/// (JPEG/PNG/WebP, at most 5 MiB). Owner only.
#[utoipa::path(
    post,
    path = "/api/charities/{id}/photo",
    tag = "charities",
    params(
        ("id" = Uuid, Path, description = "Charity ID")
    ),
    responses(
        (status = 200, description = "Photo stored", body = ApiResponse<CharityResponseDto>),
        (status = 400, description = "Not an accepted image"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Caller does not own this charity"),
        (status = 404, description = "Charity not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_photo(
    RequireCharity(user): RequireCharity,
    State(service): State<Arc<CharityService>>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<CharityResponseDto>>, AppError> {
    let mut photo: Option<PhotoUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        if field.name() == Some("photo") {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let file_name = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "logo".to_string());
            let data = field.bytes().await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read photo data: {}", e))
            })?;

            photo = Some(PhotoUpload {
                data: data.to_vec(),
                content_type,
                file_name,
            });
        }
    }

    let photo = photo.ok_or_else(|| AppError::BadRequest("Photo is required".to_string()))?;

    let charity = service.upload_photo(id, &user, photo).await?;
    Ok(Json(ApiResponse::success(Some(charity), None, None)))
}
