use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::currency::Currency;

/// Certificate status enum matching the `certificate_status` database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "certificate_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    Pending,
    Available,
}

impl std::fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CertificateStatus::Pending => write!(f, "pending"),
            CertificateStatus::Available => write!(f, "available"),
        }
    }
}

/// Database model for a charity-year tax certificate issued to a donor
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct TaxCertificate {
    pub certificate_id: Uuid,
    pub donor_user_id: Uuid,
    pub charity_id: Uuid,
    pub tax_year: String,
    pub currency: Currency,
    pub total_amount_cents: i64,
    /// Storage key of the issued document, set once available
    pub certificate_key: Option<String>,
    pub status: CertificateStatus,
    pub issued_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Certificate joined with its charity's display name
#[derive(Debug, Clone, FromRow)]
pub struct CertificateWithCharity {
    pub certificate_id: Uuid,
    pub charity_id: Uuid,
    pub charity_name: String,
    pub tax_year: String,
    pub currency: Currency,
    pub total_amount_cents: i64,
    pub status: CertificateStatus,
    pub issued_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
