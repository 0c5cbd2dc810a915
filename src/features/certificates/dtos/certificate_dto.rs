use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::certificates::models::{CertificateStatus, CertificateWithCharity};
use crate::shared::currency::{format_amount, Currency};

/// Response DTO for a tax certificate
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxCertificateDto {
    pub certificate_id: Uuid,
    pub charity_id: Uuid,
    pub charity_name: String,
    pub tax_year: String,
    pub currency: Currency,
    pub total_amount_cents: i64,
    pub total_amount_formatted: String,
    pub status: CertificateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<CertificateWithCharity> for TaxCertificateDto {
    fn from(c: CertificateWithCharity) -> Self {
        Self {
            certificate_id: c.certificate_id,
            charity_id: c.charity_id,
            charity_name: c.charity_name,
            tax_year: c.tax_year,
            currency: c.currency,
            total_amount_cents: c.total_amount_cents,
            total_amount_formatted: format_amount(c.total_amount_cents, c.currency),
            status: c.status,
            issued_at: c.issued_at,
            created_at: c.created_at,
        }
    }
}

/// Response DTO carrying a presigned document URL
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDownloadDto {
    pub url: String,
}
