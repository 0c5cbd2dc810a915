use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::guards::RequireUser;
use crate::features::profiles::dtos::{
    CompleteOnboardingDto, ProfileResponseDto, UpdateProfileDto,
};
use crate::features::profiles::services::ProfileService;
use crate::shared::types::ApiResponse;

/// Fetch the caller's profile
#[utoipa::path(
    get,
    path = "/api/profiles/me",
    tag = "profiles",
    responses(
        (status = 200, description = "Profile found", body = ApiResponse<ProfileResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Onboarding not completed yet")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    RequireUser(user): RequireUser,
    State(service): State<Arc<ProfileService>>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>, AppError> {
    let profile = service.get_by_user(user.user_id).await?;

    Ok(Json(ApiResponse::success(
        Some(profile.into()),
        None,
        None,
    )))
}

/// Complete onboarding
///
/// Creates the profile row and stamps `onboarding_completed_at`, which gates
/// access to donor and charity features.
#[utoipa::path(
    post,
    path = "/api/profiles/onboarding",
    tag = "profiles",
    request_body = CompleteOnboardingDto,
    responses(
        (status = 201, description = "Onboarding completed", body = ApiResponse<ProfileResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 409, description = "Onboarding already completed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn complete_onboarding(
    RequireUser(user): RequireUser,
    State(service): State<Arc<ProfileService>>,
    Json(dto): Json<CompleteOnboardingDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProfileResponseDto>>), AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = service.complete_onboarding(user.user_id, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(profile), None, None)),
    ))
}

/// Update profile settings
#[utoipa::path(
    put,
    path = "/api/profiles/me",
    tag = "profiles",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<ProfileResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Profile not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_me(
    RequireUser(user): RequireUser,
    State(service): State<Arc<ProfileService>>,
    Json(dto): Json<UpdateProfileDto>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = service.update_profile(user.user_id, dto).await?;

    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}
