use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::auth::guards::RequireDonor;
use crate::features::certificates::dtos::{CertificateDownloadDto, TaxCertificateDto};
use crate::features::certificates::services::CertificateService;
use crate::shared::types::{ApiResponse, Meta};

/// List the caller's tax certificates
#[utoipa::path(
    get,
    path = "/api/certificates",
    tag = "certificates",
    responses(
        (status = 200, description = "Certificates", body = ApiResponse<Vec<TaxCertificateDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_certificates(
    RequireDonor(user): RequireDonor,
    State(service): State<Arc<CertificateService>>,
) -> Result<Json<ApiResponse<Vec<TaxCertificateDto>>>, AppError> {
    let certificates = service.list_for_donor(user.user_id).await?;
    let total = certificates.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(certificates),
        None,
        Some(Meta { total }),
    )))
}

/// Get a presigned download URL for an available certificate
#[utoipa::path(
    get,
    path = "/api/certificates/{id}/download",
    tag = "certificates",
    params(
        ("id" = Uuid, Path, description = "Certificate ID")
    ),
    responses(
        (status = 200, description = "Download URL", body = ApiResponse<CertificateDownloadDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Certificate not found"),
        (status = 409, description = "Certificate not available yet")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn download_certificate(
    RequireDonor(user): RequireDonor,
    State(service): State<Arc<CertificateService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CertificateDownloadDto>>, AppError> {
    let url = service.download_url(id, &user).await?;

    Ok(Json(ApiResponse::success(
        Some(CertificateDownloadDto { url }),
        None,
        None,
    )))
}
