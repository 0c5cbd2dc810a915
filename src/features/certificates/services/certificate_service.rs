use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::certificates::dtos::TaxCertificateDto;
use crate::features::certificates::models::{
    CertificateStatus, CertificateWithCharity, TaxCertificate,
};
use crate::modules::storage::ObjectStore;

/// Service for donor-facing tax certificate reads. Issuance is external.
pub struct CertificateService {
    pool: PgPool,
    storage: Arc<ObjectStore>,
}

impl CertificateService {
    pub fn new(pool: PgPool, storage: Arc<ObjectStore>) -> Self {
        Self { pool, storage }
    }

    /// The donor's own certificates, newest tax year first.
    pub async fn list_for_donor(&self, donor_id: Uuid) -> Result<Vec<TaxCertificateDto>> {
        let certificates = sqlx::query_as::<_, CertificateWithCharity>(
            r#"
            SELECT
                tc.certificate_id, tc.charity_id,
                c.public_name AS charity_name,
                tc.tax_year, tc.currency, tc.total_amount_cents,
                tc.status, tc.issued_at, tc.created_at
            FROM tax_certificates tc
            JOIN charities c ON c.charity_id = tc.charity_id
            WHERE tc.donor_user_id = $1
            ORDER BY tc.tax_year DESC, tc.created_at DESC
            "#,
        )
        .bind(donor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list certificates: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(certificates.into_iter().map(Into::into).collect())
    }

    /// Presigned URL for an available certificate document. Owner only;
    /// pending certificates have nothing to download.
    pub async fn download_url(
        &self,
        certificate_id: Uuid,
        actor: &AuthenticatedUser,
    ) -> Result<String> {
        let certificate = sqlx::query_as::<_, TaxCertificate>(
            "SELECT * FROM tax_certificates WHERE certificate_id = $1",
        )
        .bind(certificate_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch certificate: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Certificate not found".to_string()))?;

        if certificate.donor_user_id != actor.user_id && !actor.is_admin() {
            // Hide other donors' certificates entirely
            return Err(AppError::NotFound("Certificate not found".to_string()));
        }

        if certificate.status != CertificateStatus::Available {
            return Err(AppError::InvalidState(
                "Certificate is not available yet".to_string(),
            ));
        }

        let key = certificate.certificate_key.ok_or_else(|| {
            AppError::Internal("Available certificate has no stored document".to_string())
        })?;

        self.storage.presigned_url(&key).await
    }
}
